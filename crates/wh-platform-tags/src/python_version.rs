use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PythonVersionError {
    #[error("Python version must not be empty")]
    Empty,
    #[error("Python version `{0}` must be of the form `major.minor` or `major.minor.patch`")]
    InvalidFormat(String),
}

/// A target interpreter version, reduced to `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    major: u8,
    minor: u8,
}

impl PythonVersion {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn major(self) -> u8 {
        self.major
    }

    pub fn minor(self) -> u8 {
        self.minor
    }

    /// The compact form used in tags, e.g. `311` for Python 3.11.
    pub fn compact(self) -> String {
        format!("{}{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = PythonVersionError;

    /// Accepts `3.11` and `3.11.2`; the patch component is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PythonVersionError::Empty);
        }
        let invalid = || PythonVersionError::InvalidFormat(s.to_string());
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|major| major.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|minor| minor.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        match (parts.next(), parts.next()) {
            (None, None) => {}
            (Some(patch), None) if !patch.is_empty() && patch.bytes().all(|b| b.is_ascii_digit()) => {}
            _ => return Err(invalid()),
        }
        Ok(Self { major, minor })
    }
}

impl Display for PythonVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
