use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use wh_pep440::Version;
use wh_static::EnvVars;

use crate::EnvironmentError;
use crate::pyvenv::read_python_version;
use crate::search_paths::{read_find_links, wheelhouse_search_paths};

const DEFAULT_WHEELHOUSE: &str = "/cvmfs/soft.computecanada.ca/custom/python/wheelhouse";

const DEFAULT_PYTHON_DIRS: [&str; 3] = [
    "/cvmfs/soft.computecanada.ca/easybuild/software/20*/Core/python",
    "/cvmfs/soft.computecanada.ca/easybuild/software/20*/*/Core/python",
    "/cvmfs/soft.computecanada.ca/easybuild/software/20*/*/Compiler/gcccore/python",
];

/// The architectures of the software stacks prior to 2023.
const LEGACY_ARCHITECTURES: [&str; 5] = ["avx", "avx2", "avx512", "generic", "sse3"];

/// The architectures of the 2023 software stack onward.
const ARCHITECTURES: [&str; 3] = ["generic", "x86-64-v3", "x86-64-v4"];

/// The environment a query runs in.
///
/// Built once, either from the process environment with [`RuntimeEnvironment::from_env`], or
/// assembled with [`RuntimeEnvironment::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    wheelhouse: PathBuf,
    pip_config_file: Option<PathBuf>,
    current_python: Option<String>,
    current_architecture: Option<String>,
    available_architectures: Vec<String>,
    available_pythons: Vec<String>,
}

impl RuntimeEnvironment {
    /// Read the environment from the environment variables of the process.
    pub fn from_env() -> Result<Self, EnvironmentError> {
        let wheelhouse = std::env::var_os(EnvVars::WHEELHOUSE)
            .filter(|wheelhouse| !wheelhouse.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_WHEELHOUSE), PathBuf::from);

        let pip_config_file = std::env::var_os(EnvVars::PIP_CONFIG_FILE)
            .filter(|file| !file.is_empty())
            .map(PathBuf::from);

        // The virtual environment takes priority over the loaded module.
        let mut current_python = None;
        if let Some(venv) = std::env::var_os(EnvVars::VIRTUAL_ENV).filter(|venv| !venv.is_empty()) {
            current_python = read_python_version(Path::new(&venv))?
                .as_deref()
                .and_then(major_minor);
        }
        if current_python.is_none() {
            current_python = std::env::var(EnvVars::EBVERSIONPYTHON)
                .ok()
                .as_deref()
                .and_then(major_minor);
        }

        let python_dirs = std::env::var(EnvVars::PYTHON_DIRS).ok().map_or_else(
            || DEFAULT_PYTHON_DIRS.map(ToString::to_string).to_vec(),
            |dirs| dirs.split(':').map(ToString::to_string).collect(),
        );
        let available_pythons = find_pythons(&python_dirs)?;

        let current_architecture = std::env::var(EnvVars::RSNT_ARCH)
            .ok()
            .filter(|arch| !arch.is_empty());

        let gentoo = std::env::var(EnvVars::EBVERSIONGENTOO).ok();
        let available_architectures = architectures(gentoo.as_deref());

        let environment = Self {
            wheelhouse,
            pip_config_file,
            current_python,
            current_architecture,
            available_architectures,
            available_pythons,
        };
        debug!("Runtime environment: {environment:?}");
        Ok(environment)
    }

    pub fn builder() -> RuntimeEnvironmentBuilder {
        RuntimeEnvironmentBuilder::default()
    }

    /// The root of the wheelhouse.
    pub fn wheelhouse(&self) -> &Path {
        &self.wheelhouse
    }

    pub fn pip_config_file(&self) -> Option<&Path> {
        self.pip_config_file.as_deref()
    }

    /// The `major.minor` version of the active Python, if any.
    pub fn current_python(&self) -> Option<&str> {
        self.current_python.as_deref()
    }

    pub fn current_architecture(&self) -> Option<&str> {
        self.current_architecture.as_deref()
    }

    /// The architectures the wheelhouse is partitioned into, sorted.
    pub fn available_architectures(&self) -> &[String] {
        &self.available_architectures
    }

    /// The installed `major.minor` Python versions, in ascending order.
    pub fn available_pythons(&self) -> &[String] {
        &self.available_pythons
    }

    /// The Python versions to query when none are requested: the current Python if known,
    /// otherwise every available Python.
    pub fn default_pythons(&self) -> Vec<String> {
        match &self.current_python {
            Some(python) => vec![python.clone()],
            None => self.available_pythons.clone(),
        }
    }

    /// The directories to search for wheels.
    ///
    /// With a pip configuration file, the `find-links` of its `[wheel]` section; otherwise, every
    /// directory two levels below the wheelhouse, e.g. `{wheelhouse}/gentoo2023/x86-64-v3`.
    pub fn search_paths(&self) -> Result<Vec<PathBuf>, EnvironmentError> {
        match &self.pip_config_file {
            Some(pip_config_file) => read_find_links(pip_config_file),
            None => wheelhouse_search_paths(&self.wheelhouse),
        }
    }
}

/// Builds a [`RuntimeEnvironment`] from explicit values.
#[derive(Debug, Clone, Default)]
pub struct RuntimeEnvironmentBuilder {
    wheelhouse: Option<PathBuf>,
    pip_config_file: Option<PathBuf>,
    current_python: Option<String>,
    current_architecture: Option<String>,
    available_architectures: Option<Vec<String>>,
    available_pythons: Vec<String>,
}

impl RuntimeEnvironmentBuilder {
    #[must_use]
    pub fn wheelhouse(mut self, wheelhouse: impl Into<PathBuf>) -> Self {
        self.wheelhouse = Some(wheelhouse.into());
        self
    }

    #[must_use]
    pub fn pip_config_file(mut self, pip_config_file: impl Into<PathBuf>) -> Self {
        self.pip_config_file = Some(pip_config_file.into());
        self
    }

    /// The current Python, truncated to `major.minor`.
    #[must_use]
    pub fn current_python(mut self, python: &str) -> Self {
        self.current_python = major_minor(python);
        self
    }

    #[must_use]
    pub fn current_architecture(mut self, arch: impl Into<String>) -> Self {
        self.current_architecture = Some(arch.into());
        self
    }

    #[must_use]
    pub fn available_architectures(
        mut self,
        archs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut archs = archs.into_iter().map(Into::into).collect::<Vec<_>>();
        archs.sort();
        archs.dedup();
        self.available_architectures = Some(archs);
        self
    }

    #[must_use]
    pub fn available_pythons(mut self, pythons: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.available_pythons = sort_pythons(
            pythons
                .into_iter()
                .filter_map(|python| major_minor(python.as_ref())),
        );
        self
    }

    pub fn build(self) -> RuntimeEnvironment {
        RuntimeEnvironment {
            wheelhouse: self
                .wheelhouse
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WHEELHOUSE)),
            pip_config_file: self.pip_config_file,
            current_python: self.current_python,
            current_architecture: self.current_architecture,
            available_architectures: self
                .available_architectures
                .unwrap_or_else(|| architectures(None)),
            available_pythons: self.available_pythons,
        }
    }
}

/// Truncate a version such as `3.10.2` to `3.10`.
fn major_minor(version: &str) -> Option<String> {
    let mut parts = version.trim().split('.');
    let major = parts.next().filter(|major| is_number(major))?;
    let minor = parts.next().filter(|minor| is_number(minor))?;
    Some(format!("{major}.{minor}"))
}

fn is_number(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit())
}

/// The available architectures of a software stack, given its year.
fn architectures(gentoo: Option<&str>) -> Vec<String> {
    let year = gentoo.and_then(|gentoo| gentoo.trim().parse::<u32>().ok());
    let archs: &[&str] = match year {
        Some(year) if year >= 2023 => &ARCHITECTURES,
        _ => &LEGACY_ARCHITECTURES,
    };
    archs.iter().map(ToString::to_string).collect()
}

/// De-duplicate and sort Python versions by version.
fn sort_pythons(pythons: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut pythons = pythons
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    pythons.sort_by_cached_key(|python| Version::new(python.as_str()));
    pythons
}

/// Find the installed Python versions: the children of every directory matching the patterns.
fn find_pythons(patterns: &[String]) -> Result<Vec<String>, EnvironmentError> {
    let mut pythons = Vec::new();
    for pattern in patterns.iter().filter(|pattern| !pattern.is_empty()) {
        for directory in
            glob::glob(pattern).map_err(|err| EnvironmentError::Pattern(pattern.clone(), err))?
        {
            let directory =
                directory.map_err(|err| EnvironmentError::Glob(pattern.clone(), err))?;
            let entries = match fs_err::read_dir(&directory) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("Skipping Python directory: {err}");
                    continue;
                }
            };
            for entry in entries.flatten() {
                if let Some(python) = entry.file_name().to_str().and_then(major_minor) {
                    pythons.push(python);
                }
            }
        }
    }
    Ok(sort_pythons(pythons))
}
