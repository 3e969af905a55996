use std::path::Path;

use tracing::debug;

use crate::EnvironmentError;

/// Read the Python version of a virtual environment from its `pyvenv.cfg`.
///
/// Returns `None` if the file does not exist or has no version key.
pub(crate) fn read_python_version(venv: &Path) -> Result<Option<String>, EnvironmentError> {
    let cfg = venv.join("pyvenv.cfg");

    // `pyvenv.cfg` is not a valid INI file; each line is partitioned on the first equals sign.
    let content = match fs_err::read_to_string(&cfg) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("No `pyvenv.cfg` in `{}`", venv.display());
            return Ok(None);
        }
        Err(err) => return Err(EnvironmentError::ReadPyVenvCfg(cfg, err)),
    };

    let mut version = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            // Written by `venv`.
            "version" => version = Some(value.trim().to_string()),
            // Written by `virtualenv` and `uv`.
            "version_info" if version.is_none() => version = Some(value.trim().to_string()),
            _ => {}
        }
    }
    Ok(version)
}
