use std::path::PathBuf;

use wh_cli::{ArchArgs, Cli, ColorChoice, DisplayArgs, GlobalArgs, PythonArgs};
use wh_platform_tags::PythonVersion;
use wh_requirements::Requirement;
use wh_select::{Column, NotAvailable};

/// The resolved global settings to use for any invocation of the CLI.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlobalSettings {
    pub(crate) quiet: bool,
    pub(crate) verbose: u8,
    pub(crate) color: ColorChoice,
}

impl GlobalSettings {
    pub(crate) fn resolve(args: &GlobalArgs) -> Self {
        Self {
            quiet: args.quiet,
            verbose: args.verbose,
            color: args.color,
        }
    }
}

/// The Python versions to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PythonSelection {
    /// The current Python, or every available Python if there is none.
    Default,
    /// Every available Python.
    All,
    Explicit(Vec<PythonVersion>),
}

impl PythonSelection {
    fn resolve(args: PythonArgs) -> Self {
        if args.all_pythons {
            Self::All
        } else if args.python.is_empty() {
            Self::Default
        } else {
            Self::Explicit(args.python)
        }
    }
}

/// How the selected wheels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    MediaWiki,
    Raw,
}

/// The resolved settings to use for a query.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub(crate) struct AvailSettings {
    /// The requirements given on the command line, in order.
    pub(crate) requirements: Vec<Requirement>,
    pub(crate) requirement_files: Vec<PathBuf>,
    pub(crate) version: Option<String>,
    pub(crate) all_versions: bool,
    pub(crate) python: PythonSelection,
    /// The architectures to search, or `None` for every search path.
    pub(crate) archs: Option<Vec<String>>,
    pub(crate) format: OutputFormat,
    pub(crate) columns: Vec<Column>,
    pub(crate) condense: bool,
    pub(crate) not_available: NotAvailable,
}

impl AvailSettings {
    pub(crate) fn resolve(cli: Cli) -> Self {
        let Cli {
            wheel,
            name,
            requirement,
            version,
            python,
            arch: ArchArgs { arch, all_archs },
            display:
                DisplayArgs {
                    raw,
                    mediawiki,
                    column,
                    condense,
                    not_available,
                    not_available_only,
                },
            global: _,
        } = cli;

        let format = if raw {
            OutputFormat::Raw
        } else if mediawiki {
            OutputFormat::MediaWiki
        } else {
            OutputFormat::Table
        };

        let not_available = if not_available_only {
            NotAvailable::Only
        } else if not_available {
            NotAvailable::Show
        } else {
            NotAvailable::Hide
        };

        Self {
            requirements: wheel.into_iter().chain(name).collect(),
            requirement_files: requirement,
            version: version.version,
            all_versions: version.all_versions,
            python: PythonSelection::resolve(python),
            archs: if all_archs || arch.is_empty() {
                None
            } else {
                Some(arch)
            },
            format,
            columns: column,
            condense,
            not_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn resolve(args: &[&str]) -> AvailSettings {
        let cli = Cli::try_parse_from(std::iter::once("avail-wheels").chain(args.iter().copied()))
            .unwrap();
        AvailSettings::resolve(cli)
    }

    #[test]
    fn defaults() {
        let settings = resolve(&[]);
        assert!(settings.requirements.is_empty());
        assert_eq!(settings.python, PythonSelection::Default);
        assert_eq!(settings.archs, None);
        assert_eq!(settings.format, OutputFormat::Table);
        assert_eq!(settings.not_available, NotAvailable::Hide);
    }

    #[test]
    fn names_follow_wheels() {
        let settings = resolve(&["numpy", "-n", "scipy", "torch*"]);
        assert_eq!(
            settings
                .requirements
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["numpy", "scipy", "torch*"]
        );
    }

    #[test]
    fn selections() {
        let settings = resolve(&["--all-pythons", "--all-archs", "--raw", "--not-available-only"]);
        assert_eq!(settings.python, PythonSelection::All);
        assert_eq!(settings.archs, None);
        assert_eq!(settings.format, OutputFormat::Raw);
        assert_eq!(settings.not_available, NotAvailable::Only);

        let settings = resolve(&["-p", "3.11", "-a", "avx2", "--mediawiki", "--not-available"]);
        assert_eq!(
            settings.python,
            PythonSelection::Explicit(vec![PythonVersion::new(3, 11)])
        );
        assert_eq!(settings.archs, Some(vec!["avx2".to_string()]));
        assert_eq!(settings.format, OutputFormat::MediaWiki);
        assert_eq!(settings.not_available, NotAvailable::Show);
    }
}
