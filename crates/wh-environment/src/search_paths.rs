use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use tracing::{debug, warn};

use crate::EnvironmentError;

/// Read the whitespace-separated `find-links` of the `[wheel]` section of a pip configuration
/// file.
pub(crate) fn read_find_links(pip_config_file: &Path) -> Result<Vec<PathBuf>, EnvironmentError> {
    let content = fs_err::read_to_string(pip_config_file)
        .map_err(|err| EnvironmentError::ReadPipConfig(pip_config_file.to_path_buf(), err))?;

    let mut config = Ini::new();
    config.set_multiline(true);
    config
        .read(content)
        .map_err(|err| EnvironmentError::InvalidPipConfig(pip_config_file.to_path_buf(), err))?;

    let Some(find_links) = config.get("wheel", "find-links") else {
        warn!(
            "No `find-links` in the `[wheel]` section of `{}`",
            pip_config_file.display()
        );
        return Ok(Vec::new());
    };

    let search_paths = find_links
        .split_whitespace()
        .map(PathBuf::from)
        .collect::<Vec<_>>();
    debug!(
        "Found {} search path(s) in `{}`",
        search_paths.len(),
        pip_config_file.display()
    );
    Ok(search_paths)
}

/// Every directory two levels below the wheelhouse.
pub(crate) fn wheelhouse_search_paths(wheelhouse: &Path) -> Result<Vec<PathBuf>, EnvironmentError> {
    let pattern = PathBuf::from(glob::Pattern::escape(&wheelhouse.to_string_lossy()))
        .join("*")
        .join("*")
        .to_string_lossy()
        .to_string();

    let mut search_paths = Vec::new();
    for path in glob::glob(&pattern).map_err(|err| EnvironmentError::Pattern(pattern.clone(), err))? {
        let path = path.map_err(|err| EnvironmentError::Glob(pattern.clone(), err))?;
        if path.is_dir() {
            search_paths.push(path);
        }
    }
    debug!(
        "Found {} search path(s) in `{}`",
        search_paths.len(),
        wheelhouse.display()
    );
    Ok(search_paths)
}

/// Keep the search paths whose final component is one of the given architectures.
///
/// Without any architecture, every search path is kept.
pub fn filter_search_paths<S: AsRef<str>>(search_paths: Vec<PathBuf>, archs: &[S]) -> Vec<PathBuf> {
    if archs.is_empty() {
        return search_paths;
    }
    search_paths
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| archs.iter().any(|arch| arch.as_ref() == name))
        })
        .collect()
}
