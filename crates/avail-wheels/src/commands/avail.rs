use std::fmt::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::debug;

use wh_environment::{RuntimeEnvironment, discover, filter_search_paths};
use wh_pep440::VersionSpecifier;
use wh_platform_tags::{CompatibilityResolver, HostPlatform};
use wh_requirements::{Requirement, RequirementSet, RequirementsFile};
use wh_select::WheelQuery;
use wh_warnings::{warn_user_once, write_error_chain};

use crate::commands::ExitStatus;
use crate::commands::table::Table;
use crate::printer::Printer;
use crate::settings::{AvailSettings, OutputFormat, PythonSelection};

/// List the wheels of the wheelhouse that match the query.
pub(crate) fn avail_wheels(
    settings: AvailSettings,
    env: &RuntimeEnvironment,
    printer: Printer,
) -> Result<ExitStatus> {
    let requirements = match read_requirements(&settings) {
        Ok(requirements) => requirements,
        Err(err) => {
            write_error_chain(&*err, printer.stderr())?;
            return Ok(ExitStatus::Failure);
        }
    };

    let targets = target_pythons(&settings.python, env);
    if targets.is_empty() {
        let err = anyhow::anyhow!(
            "No Python version to look for; use `--python` to select one, e.g. `--python 3.11`"
        );
        write_error_chain(&*err, printer.stderr())?;
        return Ok(ExitStatus::Failure);
    }

    let search_paths = env.search_paths()?;
    let search_paths = match &settings.archs {
        Some(archs) => {
            for arch in archs {
                if !env.available_architectures().contains(arch) {
                    warn_user_once!(
                        "Architecture `{arch}` is not one of the available architectures: {}",
                        env.available_architectures().join(", ")
                    );
                }
            }
            filter_search_paths(search_paths, archs)
        }
        None => search_paths,
    };
    if search_paths.is_empty() {
        debug!("No search path to look for wheels in");
    }

    let files = discover(&search_paths);

    let resolver = CompatibilityResolver::new(HostPlatform::from_env());
    let query = WheelQuery::new(targets, requirements)
        .with_all_versions(settings.all_versions)
        .with_not_available(settings.not_available);
    debug!(
        "Looking for {} wheel(s) for Python {}{}",
        if query.requirements.is_empty() {
            "all".to_string()
        } else {
            query.requirements.iter().join(", ")
        },
        query.targets.join(", "),
        if query.latest { ", latest versions only" } else { "" }
    );

    let selection = query.select(&resolver, files);
    for parse in selection.unparseable() {
        if let Some(err) = parse.error() {
            warn_user_once!("{err} (found in `{}`)", parse.wheel().arch());
        }
    }

    let mut stdout = printer.stdout();
    match settings.format {
        OutputFormat::Raw => {
            for filename in selection.filenames() {
                writeln!(stdout, "{filename}")?;
            }
        }
        OutputFormat::Table => {
            let rows = selection.rows(&settings.columns, settings.condense);
            Table::new(&settings.columns, &rows).write_plain(stdout)?;
        }
        OutputFormat::MediaWiki => {
            let rows = selection.rows(&settings.columns, settings.condense);
            Table::new(&settings.columns, &rows).write_mediawiki(stdout)?;
        }
    }

    Ok(ExitStatus::Success)
}

/// Collect the requirements of the requirements files, then those of the command line.
///
/// Requirements given later override earlier ones with the same name. The `--version` applies
/// to the command-line requirements without a version specifier, or to every package when no
/// package is requested at all.
fn read_requirements(settings: &AvailSettings) -> Result<RequirementSet> {
    let mut requirements = RequirementSet::new();
    for path in &settings.requirement_files {
        let file = RequirementsFile::parse(path)?;
        requirements.extend(file.requirements);
    }

    let specifier = settings
        .version
        .as_deref()
        .map(version_specifier)
        .transpose()?;

    let mut cli_requirements = settings.requirements.clone();
    if cli_requirements.is_empty() && settings.requirement_files.is_empty() && specifier.is_some()
    {
        cli_requirements.push(Requirement::any());
    }

    for requirement in cli_requirements {
        let requirement = match &specifier {
            Some(specifier) if requirement.specifier().is_none() => {
                requirement.with_specifier(specifier.clone())
            }
            _ => requirement,
        };
        requirements.insert(requirement);
    }

    Ok(requirements)
}

/// Parse a `--version`, either a bare version (`1.15.*`) or a full specifier (`>=1.15`).
fn version_specifier(version: &str) -> Result<VersionSpecifier> {
    let specifier = if version.starts_with(['=', '!', '<', '>', '~']) {
        VersionSpecifier::from_str(version)
    } else {
        VersionSpecifier::from_str(&format!("=={version}"))
    };
    specifier.with_context(|| format!("Invalid version `{version}`"))
}

fn target_pythons(python: &PythonSelection, env: &RuntimeEnvironment) -> Vec<String> {
    match python {
        PythonSelection::Default => env.default_pythons(),
        PythonSelection::All => env.available_pythons().to_vec(),
        PythonSelection::Explicit(pythons) => {
            let available = env.available_pythons();
            pythons
                .iter()
                .map(ToString::to_string)
                .inspect(|python| {
                    if !available.is_empty() && !available.contains(python) {
                        warn_user_once!(
                            "Python {python} is not one of the available versions: {}",
                            available.join(", ")
                        );
                    }
                })
                .collect()
        }
    }
}
