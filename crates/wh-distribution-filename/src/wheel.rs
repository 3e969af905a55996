use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use wh_normalize::PackageName;
use wh_pep440::Version;
use wh_platform_tags::{Tag, expand_tags};

use crate::splitter::MemchrSplitter;

/// The parsed identity of one wheel file found in the wheelhouse.
///
/// The filename is `{name}-{version}(-{build tag})?-{python tag}-{abi tag}-{platform tag}.whl`,
/// where each tag may be a `.`-separated list of alternatives
/// (<https://peps.python.org/pep-0427/#file-name-convention>). The architecture label is the
/// wheelhouse partition the file was found in, not part of the filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    filename: String,
    arch: String,
    name: String,
    normalized_name: PackageName,
    /// The public version, without the local version.
    version: Version,
    local_version: Option<String>,
    build: String,
    tags: BTreeSet<Tag>,
    /// The version including its local version, used for ordering.
    full_version: Version,
}

impl Wheel {
    /// Parse a wheel filename found under the given architecture label.
    ///
    /// Never fails: a filename that is not a valid wheel filename yields a
    /// [`WheelParse::Unparseable`] wheel whose name is guessed from the leading segment, with
    /// every other field empty.
    pub fn parse(arch: impl Into<String>, filename: impl Into<String>) -> WheelParse {
        let arch = arch.into();
        let filename = filename.into();
        match Self::from_filename(&arch, &filename) {
            Ok(wheel) => WheelParse::Parsed(wheel),
            Err(error) => {
                let stem = filename.strip_suffix(".whl").unwrap_or(&filename);
                let name = MemchrSplitter::split(stem, b'-').next().unwrap_or_default();
                let wheel = Self::builder(&filename).arch(arch).name(name).build();
                WheelParse::Unparseable { wheel, error }
            }
        }
    }

    /// Parse a wheel filename, failing if it does not follow the wheel filename convention.
    pub fn from_filename(arch: &str, filename: &str) -> Result<Self, WheelFilenameError> {
        let invalid = |reason: &str| {
            WheelFilenameError::InvalidWheelFileName(filename.to_string(), reason.to_string())
        };

        let stem = filename
            .strip_suffix(".whl")
            .ok_or_else(|| invalid("Must end with .whl"))?;

        // The wheel filename should contain either five or six entries. If six, then the third
        // entry is the build tag. If five, then the third entry is the Python tag.
        let mut splitter = MemchrSplitter::split(stem, b'-');
        let name = splitter.next().unwrap_or_default();
        let Some(version) = splitter.next() else {
            return Err(invalid("Must have a version"));
        };
        let Some(build_tag_or_python_tag) = splitter.next() else {
            return Err(invalid("Must have a Python tag"));
        };
        let Some(python_tag_or_abi_tag) = splitter.next() else {
            return Err(invalid("Must have an ABI tag"));
        };
        let Some(abi_tag_or_platform_tag) = splitter.next() else {
            return Err(invalid("Must have a platform tag"));
        };

        let (build, python_tag, abi_tag, platform_tag) =
            if let Some(platform_tag) = splitter.next() {
                if splitter.next().is_some() {
                    return Err(invalid("Must have 5 or 6 components, but has more"));
                }
                // A build tag must start with a digit, anything else is a misplaced segment.
                if !build_tag_or_python_tag.starts_with(|char: char| char.is_ascii_digit()) {
                    return Err(WheelFilenameError::InvalidBuildTag(
                        filename.to_string(),
                        build_tag_or_python_tag.to_string(),
                    ));
                }
                (
                    build_tag_or_python_tag,
                    python_tag_or_abi_tag,
                    abi_tag_or_platform_tag,
                    platform_tag,
                )
            } else {
                (
                    "",
                    build_tag_or_python_tag,
                    python_tag_or_abi_tag,
                    abi_tag_or_platform_tag,
                )
            };

        if name.is_empty() {
            return Err(invalid("Must have a name"));
        }
        if version.is_empty() || version.starts_with('+') {
            return Err(invalid("Must have a version"));
        }
        if [python_tag, abi_tag, platform_tag]
            .iter()
            .any(|tag| MemchrSplitter::split(tag, b'.').any(str::is_empty))
        {
            return Err(invalid("Must not have empty tags"));
        }

        Ok(Self::builder(filename)
            .arch(arch)
            .name(name)
            .version(version)
            .build_tag(build)
            .tags(expand_tags(python_tag, abi_tag, platform_tag))
            .build())
    }

    /// Start building a wheel with explicit fields, e.g. for a placeholder or a test fixture.
    pub fn builder(filename: impl Into<String>) -> WheelBuilder {
        WheelBuilder {
            filename: filename.into(),
            ..WheelBuilder::default()
        }
    }

    /// A wheel that stands for a requirement without any available wheel.
    ///
    /// It carries the requirement's literal name as both its filename and name, and no metadata.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::builder(&name).name(name).build()
    }

    /// The original filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The wheelhouse partition the wheel was found in, e.g. `avx2` or `generic`.
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// The package name as it appears in the filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> &PackageName {
        &self.normalized_name
    }

    /// The public version, e.g. `1.8.0` for `1.8.0+computecanada`.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The local version, e.g. `computecanada` for `1.8.0+computecanada`.
    pub fn local_version(&self) -> Option<&str> {
        self.local_version.as_deref()
    }

    /// The version including the local version.
    pub fn full_version(&self) -> &Version {
        &self.full_version
    }

    /// The build tag, or the empty string.
    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// The distinct interpreter tags, sorted and comma-joined, e.g. `py2,py3`.
    pub fn python(&self) -> String {
        Self::join(self.tags.iter().map(Tag::interpreter))
    }

    /// The distinct ABI tags, sorted and comma-joined.
    pub fn abi(&self) -> String {
        Self::join(self.tags.iter().map(Tag::abi))
    }

    /// The distinct platform tags, sorted and comma-joined.
    pub fn platform(&self) -> String {
        Self::join(self.tags.iter().map(Tag::platform))
    }

    fn join<'a>(components: impl Iterator<Item = &'a str>) -> String {
        components
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Display for Wheel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filename)
    }
}

/// Builds a [`Wheel`] from named fields.
#[derive(Debug, Clone, Default)]
pub struct WheelBuilder {
    filename: String,
    arch: String,
    name: String,
    version: String,
    build: String,
    tags: BTreeSet<Tag>,
}

impl WheelBuilder {
    #[must_use]
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The version, optionally with a `+local` suffix.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn build_tag(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn build(self) -> Wheel {
        let (public, local) = match self.version.split_once('+') {
            Some((public, local)) => (public, Some(local.to_string())),
            None => (self.version.as_str(), None),
        };
        Wheel {
            normalized_name: PackageName::new(&self.name),
            version: Version::new(public),
            local_version: local,
            full_version: Version::new(self.version.as_str()),
            filename: self.filename,
            arch: self.arch,
            name: self.name,
            build: self.build,
            tags: self.tags,
        }
    }
}

/// The outcome of parsing a wheel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelParse {
    Parsed(Wheel),
    /// The filename is not a valid wheel filename; the wheel only carries the filename, the
    /// architecture and a guessed name.
    Unparseable {
        wheel: Wheel,
        error: WheelFilenameError,
    },
}

impl WheelParse {
    pub fn wheel(&self) -> &Wheel {
        match self {
            Self::Parsed(wheel) | Self::Unparseable { wheel, .. } => wheel,
        }
    }

    pub fn into_wheel(self) -> Wheel {
        match self {
            Self::Parsed(wheel) | Self::Unparseable { wheel, .. } => wheel,
        }
    }

    pub fn error(&self) -> Option<&WheelFilenameError> {
        match self {
            Self::Parsed(_) => None,
            Self::Unparseable { error, .. } => Some(error),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WheelFilenameError {
    #[error("The wheel filename \"{0}\" is invalid: {1}")]
    InvalidWheelFileName(String, String),
    #[error("The wheel filename \"{0}\" has an invalid build tag: `{1}` must start with a digit")]
    InvalidBuildTag(String, String),
}

impl WheelFilenameError {
    /// The filename that failed to parse.
    pub fn filename(&self) -> &str {
        match self {
            Self::InvalidWheelFileName(filename, _) | Self::InvalidBuildTag(filename, _) => filename,
        }
    }
}
