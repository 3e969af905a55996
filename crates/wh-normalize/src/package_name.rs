use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use crate::{is_normalized, normalize};

/// The normalized name of a package.
///
/// Converts the name to lowercase and collapses runs of `-`, `_`, and `.` down to a single `_`.
/// For example, `Torch-CPU`, `torch.cpu` and `torch__cpu` all normalize to `torch_cpu`.
///
/// Unlike a registry name, a [`PackageName`] is never rejected: names read from wheel filenames
/// are normalized as-is, and the requirement grammar validates user input before it gets here.
/// Patterns such as `*scipy*` are normalized the same way, with the wildcard preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Create a normalized package name.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if is_normalized(name) {
            Self(name.to_string())
        } else {
            Self(normalize(name))
        }
    }

    /// Returns the underlying normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name contains a `*` wildcard.
    pub fn is_pattern(&self) -> bool {
        self.0.contains('*')
    }

    /// Returns `true` if the name is empty, as it is for wheels whose filename could not be parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Display for PackageName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

