use std::fmt;

use anstream::{eprint, print};

/// Where user-facing output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Printer {
    /// Print to the standard streams.
    Default,
    /// Suppress all output.
    Quiet,
    /// Print to the standard streams, alongside debug messages.
    Verbose,
}

impl Printer {
    pub(crate) fn new(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose > 0 {
            Self::Verbose
        } else {
            Self::Default
        }
    }

    /// The stream for results, e.g. the table of wheels.
    pub(crate) fn stdout(self) -> Stream {
        match self {
            Self::Default | Self::Verbose => Stream::Stdout,
            Self::Quiet => Stream::Disabled,
        }
    }

    /// The stream for diagnostics.
    pub(crate) fn stderr(self) -> Stream {
        match self {
            Self::Default | Self::Verbose => Stream::Stderr,
            Self::Quiet => Stream::Disabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
    Disabled,
}

impl fmt::Write for Stream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self {
            Self::Stdout => {
                #[allow(clippy::print_stdout, clippy::ignored_unit_patterns)]
                {
                    print!("{s}");
                }
            }
            Self::Stderr => {
                #[allow(clippy::print_stderr, clippy::ignored_unit_patterns)]
                {
                    eprint!("{s}");
                }
            }
            Self::Disabled => {}
        }

        Ok(())
    }
}
