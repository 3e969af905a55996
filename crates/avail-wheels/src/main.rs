use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use wh_cli::Cli;
use wh_environment::RuntimeEnvironment;
use wh_warnings::write_error_chain;

use crate::commands::ExitStatus;
use crate::printer::{Printer, Stream};
use crate::settings::{AvailSettings, GlobalSettings};

mod commands;
mod logging;
mod printer;
mod settings;

fn run() -> Result<ExitStatus> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            // `--help` is not an error; usage errors are invalid input.
            return Ok(if err.use_stderr() {
                ExitStatus::Failure
            } else {
                ExitStatus::Success
            });
        }
    };

    let globals = GlobalSettings::resolve(&cli.global);

    anstream::ColorChoice::write_global(globals.color.into());

    // Configure the `tracing` crate, which controls internal logging.
    logging::setup_logging(if globals.verbose > 0 {
        logging::Level::Verbose
    } else {
        logging::Level::Default
    })?;

    // Configure the `Printer`, which controls user-facing output in the CLI.
    let printer = Printer::new(globals.quiet, globals.verbose);

    // Configure the `warn!` macros, which control user-facing warnings in the CLI.
    if !globals.quiet {
        wh_warnings::enable();
    }

    let settings = AvailSettings::resolve(cli);
    debug!("Settings: {settings:?}");

    let env = RuntimeEnvironment::from_env()?;

    commands::avail_wheels(settings, &env, printer)
}

fn main() -> ExitCode {
    match run() {
        Ok(status) => status.into(),
        Err(err) => {
            // Errors are reported even with `--quiet`.
            let _ = write_error_chain(&*err, Stream::Stderr);
            ExitStatus::Error.into()
        }
    }
}
