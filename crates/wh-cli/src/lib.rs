use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Args, Parser};

use wh_platform_tags::PythonVersion;
use wh_requirements::Requirement;
use wh_select::Column;

// Configures Clap v3-style help menu colors
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

const LONG_ABOUT: &str = "\
List currently available wheels patterns from the wheelhouse. By default, it will:
    - only show you the latest version of a specific package (unless versions are given);
    - only show you versions that are compatible with the Python module (if one is loaded), \
otherwise all Python versions will be shown;
    - show you the wheels of every architecture of the wheelhouse.";

const AFTER_HELP: &str = "\
Examples:
    avail-wheels \"*cdf*\"
    avail-wheels numpy --version \"1.15.*\"
    avail-wheels numpy --all-versions
    avail-wheels \"numpy==1.15.*\" \"torch_cpu==0.4.0\"
    avail-wheels numpy --python 3.10 3.11
    avail-wheels -r requirements.txt --not-available

For more information, see: https://docs.alliancecan.ca/wiki/Python#Listing_available_wheels";

#[derive(Parser, Debug)]
#[command(name = "avail-wheels", author)]
#[command(about = "List the wheels available in the wheelhouse.")]
#[command(long_about = LONG_ABOUT, after_help = AFTER_HELP)]
#[command(disable_version_flag = true)]
#[command(styles = STYLES)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// The packages to look for, e.g. `numpy`, `"*cdf*"` or `"numpy>=1.20"` (case insensitive).
    #[arg(value_name = "WHEEL")]
    pub wheel: Vec<Requirement>,

    /// The packages to look for (case insensitive).
    #[arg(short, long, num_args = 1.., value_name = "NAME")]
    pub name: Vec<Requirement>,

    /// Read the packages to look for from a requirements file.
    ///
    /// Packages given on the command line take precedence over the requirements files.
    #[arg(short, long, num_args = 1.., value_name = "FILE")]
    pub requirement: Vec<PathBuf>,

    #[command(flatten)]
    pub version: VersionArgs,

    #[command(flatten)]
    pub python: PythonArgs,

    #[command(flatten)]
    pub arch: ArchArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Version options")]
pub struct VersionArgs {
    /// The version to look for, applied to every package given without a version specifier,
    /// e.g. `1.15.*`.
    #[arg(short, long, conflicts_with = "all_versions")]
    pub version: Option<String>,

    /// Show all versions of each package.
    #[arg(long, alias = "all_versions")]
    pub all_versions: bool,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Python options")]
pub struct PythonArgs {
    /// The Python versions to look for, e.g. `3.11`.
    ///
    /// Defaults to the Python of the active virtual environment or of the loaded module, and
    /// otherwise to every available Python.
    #[arg(short, long, num_args = 1.., conflicts_with = "all_pythons")]
    pub python: Vec<PythonVersion>,

    /// Show the wheels of every available Python.
    #[arg(long, alias = "all_pythons")]
    pub all_pythons: bool,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Architecture options")]
pub struct ArchArgs {
    /// The architectures to look for, e.g. `avx2` or `x86-64-v3`.
    #[arg(short, long, num_args = 1.., conflicts_with = "all_archs")]
    pub arch: Vec<String>,

    /// Show the wheels of every architecture.
    #[arg(long, alias = "all_archs")]
    pub all_archs: bool,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Display options")]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayArgs {
    /// Print the wheel filenames, one per line.
    #[arg(long, conflicts_with_all = ["mediawiki", "column", "condense"])]
    pub raw: bool,

    /// Print a MediaWiki table.
    #[arg(long, conflicts_with = "column")]
    pub mediawiki: bool,

    /// The columns to display, in order.
    #[arg(long, value_enum, num_args = 1.., default_values_t = Column::DEFAULT)]
    pub column: Vec<Column>,

    /// Show a single row per package, listing the distinct values of its wheels.
    #[arg(long)]
    pub condense: bool,

    /// Also show the requested packages that have no matching wheel.
    #[arg(long, alias = "not_available", conflicts_with = "not_available_only")]
    pub not_available: bool,

    /// Only show the requested packages that have no matching wheel.
    #[arg(long, alias = "not_available_only")]
    pub not_available_only: bool,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Global options")]
pub struct GlobalArgs {
    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose output.
    ///
    /// You can configure fine-grained logging using the `RUST_LOG` environment variable.
    /// (<https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives>)
    #[arg(global = true, action = clap::ArgAction::Count, long, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Control colors in output.
    #[arg(
        global = true,
        long,
        value_enum,
        default_value = "auto",
        value_name = "COLOR_CHOICE"
    )]
    pub color: ColorChoice,
}

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
pub enum ColorChoice {
    /// Enables colored output only when the output is going to a terminal or TTY with support.
    Auto,

    /// Enables colored output regardless of the detected environment.
    Always,

    /// Disables colored output.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("avail-wheels").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert!(cli.wheel.is_empty());
        assert!(cli.name.is_empty());
        assert!(cli.requirement.is_empty());
        assert_eq!(cli.version.version, None);
        assert!(!cli.version.all_versions);
        assert!(cli.python.python.is_empty());
        assert!(!cli.python.all_pythons);
        assert!(cli.arch.arch.is_empty());
        assert!(!cli.arch.all_archs);
        assert!(!cli.display.raw);
        assert!(!cli.display.mediawiki);
        assert_eq!(cli.display.column, Column::DEFAULT);
        assert!(!cli.display.condense);
    }

    #[test]
    fn wheels_and_names() {
        let cli = parse(&["numpy", "*cdf*", "--name", "scipy==1.7.*", "torch"]).unwrap();
        assert_eq!(
            cli.wheel.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["numpy", "*cdf*"]
        );
        assert_eq!(
            cli.name.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["scipy==1.7.*", "torch"]
        );
    }

    #[test]
    fn invalid_requirement() {
        let err = parse(&["*num*py"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn many_values() {
        let cli = parse(&[
            "--python", "3.10", "3.11", "--arch", "avx2", "generic", "-r", "a.txt", "b.txt",
        ])
        .unwrap();
        assert_eq!(
            cli.python.python,
            [PythonVersion::new(3, 10), PythonVersion::new(3, 11)]
        );
        assert_eq!(cli.arch.arch, ["avx2", "generic"]);
        assert_eq!(
            cli.requirement,
            [PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
    }

    #[test]
    fn missing_values() {
        for flag in ["--python", "--arch", "--name", "--requirement", "--version"] {
            assert!(parse(&[flag]).is_err(), "{flag} requires a value");
        }
        assert!(parse(&["--python", "three"]).is_err());
    }

    #[test]
    fn columns() {
        let cli = parse(&["--column", "name", "localversion", "abi", "platform"]).unwrap();
        assert_eq!(
            cli.display.column,
            [
                Column::Name,
                Column::LocalVersion,
                Column::Abi,
                Column::Platform
            ]
        );
        assert!(parse(&["--column", "size"]).is_err());
    }

    #[test]
    fn conflicts() {
        for args in [
            &["--version", "1.0", "--all-versions"][..],
            &["--python", "3.11", "--all-pythons"],
            &["--arch", "avx2", "--all-archs"],
            &["--raw", "--mediawiki"],
            &["--raw", "--column", "name"],
            &["--mediawiki", "--column", "name"],
            &["--not-available", "--not-available-only"],
            &["--quiet", "--verbose"],
        ] {
            let err = parse(args).unwrap_err();
            assert_eq!(
                err.kind(),
                clap::error::ErrorKind::ArgumentConflict,
                "{args:?}"
            );
        }
    }

    #[test]
    fn underscore_aliases() {
        let cli = parse(&["--all_versions", "--all_pythons", "--all_archs"]).unwrap();
        assert!(cli.version.all_versions);
        assert!(cli.python.all_pythons);
        assert!(cli.arch.all_archs);
    }
}
