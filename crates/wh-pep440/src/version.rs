use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

/// A regex adapted from <https://peps.python.org/pep-0440/#appendix-b-parsing-version-strings-with-regular-expressions>
const VERSION_RE_INNER: &str = r"
(?:
    (?:v?)                                            # <https://peps.python.org/pep-0440/#preceding-v-character>
    (?:(?P<epoch>[0-9]+)!)?                           # epoch
    (?P<release>[0-9]+(?:\.[0-9]+)*)                  # release segment
    (?P<pre_field>                                    # pre-release
        [-_\.]?
        (?P<pre_name>(alpha|a|beta|b|preview|pre|rc|c))
        [-_\.]?
        (?P<pre>[0-9]+)?
    )?
    (?P<post_field>                                   # post release
        (?:-(?P<post_old>[0-9]+))
        |
        (?:
            [-_\.]?
            (?P<post_l>post|rev|r)
            [-_\.]?
            (?P<post_new>[0-9]+)?
        )
    )?
    (?P<dev_field>                                    # dev release
        [-_\.]?
        (?P<dev_l>dev)
        [-_\.]?
        (?P<dev>[0-9]+)?
    )?
)
(?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?       # local version
";

/// Matches a python version, such as `1.19.a1`.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?xi)^(?:\s*){VERSION_RE_INNER}(?:\s*)$")).unwrap()
});

/// A version that is not PEP 440 compliant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Version `{0}` doesn't match PEP 440 rules")]
pub struct VersionParseError(String);

/// Optional pre-release modifier (alpha, beta or release candidate) appended to version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrereleaseKind {
    /// alpha prerelease
    Alpha,
    /// beta prerelease
    Beta,
    /// release candidate prerelease
    Rc,
}

impl PrereleaseKind {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Self::Alpha,
            "b" | "beta" => Self::Beta,
            _ => Self::Rc,
        }
    }
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "a"),
            Self::Beta => write!(f, "b"),
            Self::Rc => write!(f, "rc"),
        }
    }
}

/// A pre-release, such as the `rc2` in `1.0rc2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prerelease {
    pub kind: PrereleaseKind,
    pub number: u64,
}

/// A part of the [local version identifier](<https://peps.python.org/pep-0440/#local-version-identifiers>)
///
/// Local versions are a mess:
///
/// > Comparison and ordering of local versions considers each segment of the local version
/// > (divided by a .) separately. If a segment consists entirely of ASCII digits then that section
/// > should be considered an integer for comparison purposes and if a segment contains any ASCII
/// > letters then that segment is compared lexicographically with case insensitivity. When
/// > comparing a numeric and lexicographic segment, the numeric section always compares as greater
/// > than the lexicographic segment. Additionally a local version with a great number of segments
/// > will always compare as greater than a local version with fewer segments, as long as the
/// > shorter local version's segments match the beginning of the longer local version's segments
/// > exactly.
///
/// The variant order gives `String < Number`, and `Vec` comparison handles the segment counts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    /// Not-parseable as integer segment of local version
    String(String),
    /// Inferred integer segment of local version
    Number(u64),
}

impl LocalSegment {
    fn parse(segment: &str) -> Self {
        segment
            .parse::<u64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::String(segment.to_ascii_lowercase()))
    }
}

/// A part of a version that could not be parsed as PEP 440.
///
/// Loose versions are split into runs of digits, runs of letters, and single other characters;
/// dots only separate components. A number always compares greater than text at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LooseSegment {
    Text(String),
    Number(u64),
}

/// A PEP 440 version, as parsed by [`VERSION_RE`].
#[derive(Debug, Clone)]
struct Pep440 {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<Prerelease>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Vec<LocalSegment>,
}

impl Pep440 {
    fn parse(version: &str) -> Option<Self> {
        let captures = VERSION_RE.captures(version)?;
        Self::from_captures(&captures)
    }

    /// Returns `None` when a number does not fit in a `u64`.
    fn from_captures(captures: &Captures) -> Option<Self> {
        let number = |name: &str| -> Option<Option<u64>> {
            match captures.name(name) {
                Some(value) => value.as_str().parse::<u64>().ok().map(Some),
                None => Some(None),
            }
        };

        let epoch = number("epoch")?.unwrap_or(0);
        let release = captures
            .name("release")?
            .as_str()
            .split('.')
            .map(|segment| segment.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;

        let pre = match captures.name("pre_name") {
            Some(label) => Some(Prerelease {
                kind: PrereleaseKind::from_label(label.as_str()),
                number: number("pre")?.unwrap_or(0),
            }),
            None => None,
        };

        let post = if captures.name("post_field").is_some() {
            Some(
                number("post_old")?
                    .or(number("post_new")?)
                    .unwrap_or(0),
            )
        } else {
            None
        };

        let dev = if captures.name("dev_field").is_some() {
            Some(number("dev")?.unwrap_or(0))
        } else {
            None
        };

        let local = captures
            .name("local")
            .map(|local| {
                local
                    .as_str()
                    .split(['-', '_', '.'])
                    .map(LocalSegment::parse)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// The pre, post and dev parts as a sortable key.
    ///
    /// A bare `dev` release sorts before every pre-release of the same release, a release without
    /// a `dev` part sorts after the same release with one.
    fn suffix(&self) -> (u8, Option<Prerelease>, Option<u64>, u64) {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(dev)) => (0, None, None, dev),
            (Some(pre), post, dev) => (1, Some(pre), post, dev.unwrap_or(u64::MAX)),
            (None, post, dev) => (2, None, post, dev.unwrap_or(u64::MAX)),
        }
    }
}

impl Ord for Pep440 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_release(&self.release, &other.release))
            .then_with(|| self.suffix().cmp(&other.suffix()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Pep440 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pep440 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pep440 {}

/// Compare the release parts of two versions, e.g. `4.3.1` > `4.2`, `1.1.0` == `1.1` and
/// `1.16` < `1.19`
pub(crate) fn compare_release(this: &[u64], other: &[u64]) -> Ordering {
    let len = this.len().max(other.len());
    (0..len)
        .map(|idx| {
            let left = this.get(idx).copied().unwrap_or(0);
            let right = other.get(idx).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn parse_loose(version: &str) -> Vec<LooseSegment> {
    let mut segments = Vec::new();
    let mut chars = version.char_indices().peekable();
    while let Some((start, char)) = chars.next() {
        if char.is_ascii_digit() {
            let mut end = start + char.len_utf8();
            while let Some((idx, next)) = chars.next_if(|(_, next)| next.is_ascii_digit()) {
                end = idx + next.len_utf8();
            }
            let digits = &version[start..end];
            segments.push(
                digits
                    .parse::<u64>()
                    .map(LooseSegment::Number)
                    .unwrap_or_else(|_| LooseSegment::Text(digits.to_string())),
            );
        } else if char.is_alphabetic() {
            let mut end = start + char.len_utf8();
            while let Some((idx, next)) = chars.next_if(|(_, next)| next.is_alphabetic()) {
                end = idx + next.len_utf8();
            }
            segments.push(LooseSegment::Text(version[start..end].to_string()));
        } else if char != '.' {
            segments.push(LooseSegment::Text(char.to_string()));
        }
    }
    segments
}

#[derive(Debug, Clone)]
enum VersionKind {
    Pep440(Pep440),
    Loose(Vec<LooseSegment>),
}

/// A version string with a total order.
///
/// The string is kept as given for display; ordering and equality use the parsed form, so
/// `Version::new("1.0") == Version::new("1.0.0")` but `Version::new("1.0") != Version::new("1.0+cc")`.
#[derive(Debug, Clone)]
pub struct Version {
    given: String,
    kind: VersionKind,
}

impl Version {
    /// Parse a version, falling back to a loose version if it is not PEP 440 compliant.
    pub fn new(version: impl Into<String>) -> Self {
        let given = version.into();
        let kind = match Pep440::parse(&given) {
            Some(pep440) => VersionKind::Pep440(pep440),
            None => VersionKind::Loose(parse_loose(given.trim())),
        };
        Self { given, kind }
    }

    /// The version string, as given.
    pub fn as_str(&self) -> &str {
        &self.given
    }

    /// Returns `true` for the empty version, e.g. the version of an unparseable wheel.
    pub fn is_empty(&self) -> bool {
        self.given.trim().is_empty()
    }

    /// Returns `true` if the version is PEP 440 compliant.
    pub fn is_pep440(&self) -> bool {
        matches!(self.kind, VersionKind::Pep440(_))
    }

    /// The epoch, `0` for loose versions.
    pub fn epoch(&self) -> u64 {
        match &self.kind {
            VersionKind::Pep440(pep440) => pep440.epoch,
            VersionKind::Loose(_) => 0,
        }
    }

    /// The release segments, empty for loose versions.
    pub fn release(&self) -> &[u64] {
        match &self.kind {
            VersionKind::Pep440(pep440) => &pep440.release,
            VersionKind::Loose(_) => &[],
        }
    }

    /// The pre-release, if any.
    pub fn pre(&self) -> Option<Prerelease> {
        match &self.kind {
            VersionKind::Pep440(pep440) => pep440.pre,
            VersionKind::Loose(_) => None,
        }
    }

    /// The post-release number, if any.
    pub fn post(&self) -> Option<u64> {
        match &self.kind {
            VersionKind::Pep440(pep440) => pep440.post,
            VersionKind::Loose(_) => None,
        }
    }

    /// The dev-release number, if any.
    pub fn dev(&self) -> Option<u64> {
        match &self.kind {
            VersionKind::Pep440(pep440) => pep440.dev,
            VersionKind::Loose(_) => None,
        }
    }

    /// The local version segments, empty for loose versions.
    pub fn local(&self) -> &[LocalSegment] {
        match &self.kind {
            VersionKind::Pep440(pep440) => &pep440.local,
            VersionKind::Loose(_) => &[],
        }
    }

    /// Whether this is a pre-release or dev-release.
    pub fn any_prerelease(&self) -> bool {
        self.pre().is_some() || self.dev().is_some()
    }

    /// The same version without its local segment.
    #[must_use]
    pub fn without_local(&self) -> Self {
        match &self.kind {
            VersionKind::Pep440(pep440) if !pep440.local.is_empty() => {
                let given = self
                    .given
                    .split_once('+')
                    .map_or(self.given.as_str(), |(public, _)| public)
                    .to_string();
                Self {
                    given,
                    kind: VersionKind::Pep440(Pep440 {
                        local: Vec::new(),
                        ..pep440.clone()
                    }),
                }
            }
            _ => self.clone(),
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new("")
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.kind, &other.kind) {
            (VersionKind::Pep440(this), VersionKind::Pep440(other)) => this.cmp(other),
            (VersionKind::Loose(this), VersionKind::Loose(other)) => this.cmp(other),
            (VersionKind::Loose(_), VersionKind::Pep440(_)) => Ordering::Less,
            (VersionKind::Pep440(_), VersionKind::Loose(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Strict parsing: only PEP 440 compliant versions are accepted.
impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let pep440 = Pep440::parse(version).ok_or_else(|| VersionParseError(version.to_string()))?;
        Ok(Self {
            given: version.trim().to_string(),
            kind: VersionKind::Pep440(pep440),
        })
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.given.trim())
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}
