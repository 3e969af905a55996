use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::{Requirement, RequirementParseError};

/// A requirements file: one requirement per line.
///
/// Blank lines and comments (`# ...`, either on their own line or after whitespace) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementsFile {
    pub requirements: Vec<Requirement>,
}

impl RequirementsFile {
    /// Read and parse a requirements file.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, RequirementsFileError> {
        let path = path.as_ref();
        let content = fs_err::read_to_string(path).map_err(|err| RequirementsFileError::Io {
            file: path.to_path_buf(),
            err,
        })?;
        let requirements = Self::parse_inner(&content, path)?;
        debug!(
            "Read {} requirement(s) from `{}`",
            requirements.requirements.len(),
            path.display()
        );
        Ok(requirements)
    }

    /// Parse the content of a requirements file; the path is only used in errors.
    pub fn parse_inner(content: &str, path: &Path) -> Result<Self, RequirementsFileError> {
        let mut requirements = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            let requirement =
                Requirement::from_str(line).map_err(|err| RequirementsFileError::Parse {
                    file: path.to_path_buf(),
                    line: index + 1,
                    err,
                })?;
            requirements.push(requirement);
        }
        Ok(Self { requirements })
    }
}

/// Remove a `#` comment that starts the line or follows whitespace.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(index) => &line[..index],
        None => line,
    }
}

#[derive(Debug, Error)]
pub enum RequirementsFileError {
    #[error("Failed to read `{}`", file.display())]
    Io {
        file: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("Couldn't parse requirement in `{}` at line {line}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        #[source]
        err: RequirementParseError,
    },
}
