use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single `(interpreter, abi, platform)` compatibility triple, e.g. `cp36-cp36m-linux_x86_64`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    interpreter: String,
    abi: String,
    platform: String,
}

impl Tag {
    pub fn new(
        interpreter: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }

    /// The interpreter component, e.g. `cp36` or `py3`.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// The ABI component, e.g. `cp36m`, `abi3` or `none`.
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// The platform component, e.g. `linux_x86_64` or `any`.
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Expected a tag of the form `interpreter-abi-platform`, found `{0}`")]
pub struct TagParseError(String);

/// Parses a single, uncompressed tag.
impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(interpreter), Some(abi), Some(platform))
                if !interpreter.is_empty() && !abi.is_empty() && !platform.is_empty() =>
            {
                Ok(Self::new(interpreter, abi, platform))
            }
            _ => Err(TagParseError(s.to_string())),
        }
    }
}

/// Expand a compressed tag cluster into every triple it stands for.
///
/// Each component may be a `.`-separated list of alternatives, and the cluster stands for their
/// Cartesian product: `cp35.cp36`, `abi3`, `linux_x86_64` yields two tags.
pub fn expand_tags(interpreters: &str, abis: &str, platforms: &str) -> BTreeSet<Tag> {
    let mut tags = BTreeSet::new();
    for interpreter in interpreters.split('.') {
        for abi in abis.split('.') {
            for platform in platforms.split('.') {
                tags.insert(Tag::new(interpreter, abi, platform));
            }
        }
    }
    tags
}
