use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::version::compare_release;
use crate::{Version, VersionParseError};

/// One of `~=` `==` `!=` `<=` `>=` `<` `>` `===`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `== 1.2.3`
    Equal,
    /// `== 1.2.*`, `== 1.2*` or `== *`
    EqualStar,
    /// `===` (discouraged)
    ///
    /// <https://peps.python.org/pep-0440/#arbitrary-equality>
    ExactEqual,
    /// `!= 1.2.3`
    NotEqual,
    /// `~=`
    TildeEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
}

impl Operator {
    /// Returns `true` if the operator selects one version (or one version prefix) rather than a
    /// range.
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Equal | Self::EqualStar | Self::ExactEqual)
    }
}

impl FromStr for Operator {
    type Err = VersionSpecifierParseError;

    /// Notably, this does not know about star versions, it just assumes the base operator
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operator = match s {
            "==" => Self::Equal,
            "===" => Self::ExactEqual,
            "!=" => Self::NotEqual,
            "~=" => Self::TildeEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessThanEqual,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanEqual,
            other => return Err(VersionSpecifierParseError::InvalidOperator(other.to_string())),
        };
        Ok(operator)
    }
}

impl Display for Operator {
    /// Note the `EqualStar` is also `==`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Equal | Self::EqualStar => "==",
            Self::ExactEqual => "===",
            Self::NotEqual => "!=",
            Self::TildeEqual => "~=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
        };
        write!(f, "{operator}")
    }
}

/// An error that occurred while parsing a version specifier such as `>= 1.19` or `== 1.2.*`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionSpecifierParseError {
    #[error("Unexpected end of version specifier, expected operator")]
    MissingOperator,
    #[error("No such comparison operator `{0}`, must be one of `~=` `==` `!=` `<=` `>=` `<` `>` `===`")]
    InvalidOperator(String),
    #[error("Unexpected end of version specifier, expected version")]
    MissingVersion,
    #[error(transparent)]
    InvalidVersion(#[from] VersionParseError),
    #[error("Operator `{0}` cannot be used with a wildcard version specifier, only `==` can")]
    OperatorWithStar(Operator),
    #[error("The wildcard `*` must be the last character of the version, found `{0}`")]
    MisplacedStar(String),
    #[error("A wildcard version may only contain release segments, found `{0}`")]
    StarWithSuffix(String),
    #[error(
        "You can't mix a local version (`{version}`) with the `{operator}` operator, only `==` and `!=` allow local versions"
    )]
    OperatorLocalCombo { operator: Operator, version: String },
    #[error("The `~=` operator requires at least two segments in the release version")]
    CompatibleRelease,
}

/// A version range such as `>1.2.3`, `<=4!5.6.7-a8.post9.dev0` or `~=4.1`.
///
/// Unlike pip, pre-releases are never excluded implicitly: every version that falls into the range
/// is contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpecifier {
    operator: Operator,
    /// For [`Operator::EqualStar`], the release prefix, which is empty for `==*`.
    version: Version,
}

impl VersionSpecifier {
    /// Build from parts, validating that the operator is allowed with that version.
    pub fn from_version(
        operator: Operator,
        version: Version,
    ) -> Result<Self, VersionSpecifierParseError> {
        if matches!(operator, Operator::EqualStar | Operator::ExactEqual) {
            return Ok(Self { operator, version });
        }
        if !version.local().is_empty()
            && !matches!(operator, Operator::Equal | Operator::NotEqual)
        {
            return Err(VersionSpecifierParseError::OperatorLocalCombo {
                operator,
                version: version.to_string(),
            });
        }
        if operator == Operator::TildeEqual && version.release().len() < 2 {
            return Err(VersionSpecifierParseError::CompatibleRelease);
        }
        Ok(Self { operator, version })
    }

    /// `==<version>`
    pub fn equals_version(version: Version) -> Self {
        Self {
            operator: Operator::Equal,
            version,
        }
    }

    /// `==*`, which matches every version.
    pub fn any() -> Self {
        Self {
            operator: Operator::EqualStar,
            version: Version::default(),
        }
    }

    /// Get the operator, e.g. `>=` in `>= 2.0.0`
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the version, e.g. `2.0.0` in `<= 2.0.0`
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns `true` if this specifier pins an exact version or version prefix.
    pub fn is_exact(&self) -> bool {
        self.operator.is_exact()
    }

    /// Whether the given version satisfies the version range.
    ///
    /// e.g. `>=1.19,<2.0` and `1.21` -> true
    /// <https://peps.python.org/pep-0440/#version-specifiers>
    ///
    /// Loose versions can only satisfy `==*`, `===`, a string comparison for `==` and `!=`, and a
    /// string prefix comparison for wildcards.
    pub fn contains(&self, version: &Version) -> bool {
        if self.operator == Operator::EqualStar && self.version.is_empty() {
            return true;
        }
        if !version.is_pep440() {
            return self.contains_loose(version);
        }

        // "Except where specifically noted below, local version identifiers MUST NOT be permitted
        // in version specifiers, and local version labels MUST be ignored entirely when checking
        // if candidate versions match a given version specifier."
        let this = &self.version;
        let other = if this.local().is_empty() {
            version.without_local()
        } else {
            version.clone()
        };

        match self.operator {
            Operator::Equal => other == *this,
            Operator::EqualStar => {
                this.epoch() == other.epoch()
                    && Self::release_prefix(this.release(), other.release())
            }
            Operator::ExactEqual => this
                .as_str()
                .trim()
                .eq_ignore_ascii_case(version.as_str().trim()),
            Operator::NotEqual => other != *this,
            Operator::TildeEqual => {
                // "For a given release identifier V.N, the compatible release clause is
                // approximately equivalent to the pair of comparison clauses: `>= V.N, == V.*`"
                let release = this.release();
                this.epoch() == other.epoch()
                    && Self::release_prefix(&release[..release.len() - 1], other.release())
                    && other >= *this
            }
            Operator::GreaterThan => Self::greater_than(this, &other),
            Operator::GreaterThanEqual => Self::greater_than(this, &other) || other >= *this,
            Operator::LessThan => Self::less_than(this, &other),
            Operator::LessThanEqual => Self::less_than(this, &other) || other <= *this,
        }
    }

    fn contains_loose(&self, version: &Version) -> bool {
        let given = version.as_str().trim();
        let this = self.version.as_str().trim();
        match self.operator {
            Operator::Equal | Operator::ExactEqual => given.eq_ignore_ascii_case(this),
            Operator::NotEqual => !given.eq_ignore_ascii_case(this),
            Operator::EqualStar => {
                given == this
                    || given
                        .strip_prefix(this)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
            _ => false,
        }
    }

    /// Whether every segment of `prefix` matches `release`, padding `release` with zeros.
    fn release_prefix(prefix: &[u64], release: &[u64]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(idx, segment)| release.get(idx).copied().unwrap_or(0) == *segment)
    }

    fn less_than(this: &Version, other: &Version) -> bool {
        if other.epoch() < this.epoch() {
            return true;
        }

        // Unless the specifier itself is a pre-release, `<3.1` does not match `3.1.dev0`.
        if !this.any_prerelease()
            && other.any_prerelease()
            && compare_release(this.release(), other.release()).is_eq()
        {
            return false;
        }

        other < this
    }

    fn greater_than(this: &Version, other: &Version) -> bool {
        if other.epoch() > this.epoch() {
            return true;
        }

        // Unless the specifier itself is a post-release, `>3.1` does not match `3.1.post0`.
        if compare_release(this.release(), other.release()).is_eq()
            && this.post().is_none()
            && other.post().is_some()
        {
            return false;
        }

        other > this
    }
}

impl FromStr for VersionSpecifier {
    type Err = VersionSpecifierParseError;

    /// Parses a version such as `>= 1.19`, `== 1.1.*`, `==1.1*`, `==*` or `<=1!2012.2`
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        let operator_len = spec
            .find(|char: char| !matches!(char, '=' | '!' | '<' | '>' | '~'))
            .unwrap_or(spec.len());
        let (operator, version) = spec.split_at(operator_len);
        if operator.is_empty() {
            return Err(VersionSpecifierParseError::MissingOperator);
        }
        let operator = Operator::from_str(operator)?;
        let version = version.trim();
        if version.is_empty() {
            return Err(VersionSpecifierParseError::MissingVersion);
        }

        if operator == Operator::ExactEqual {
            warn!("Using arbitrary equality (`===`) is discouraged");
            return Self::from_version(operator, Version::new(version));
        }

        if let Some(star) = version.find('*') {
            if operator != Operator::Equal {
                return Err(VersionSpecifierParseError::OperatorWithStar(operator));
            }
            if star != version.len() - 1 {
                return Err(VersionSpecifierParseError::MisplacedStar(version.to_string()));
            }
            let prefix = &version[..star];
            let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
            if prefix.is_empty() {
                return Ok(Self::any());
            }
            let prefix = Version::from_str(prefix)?;
            if prefix.any_prerelease() || prefix.post().is_some() || !prefix.local().is_empty() {
                return Err(VersionSpecifierParseError::StarWithSuffix(version.to_string()));
            }
            return Self::from_version(Operator::EqualStar, prefix);
        }

        Self::from_version(operator, Version::from_str(version)?)
    }
}

impl Display for VersionSpecifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.operator {
            Operator::EqualStar if self.version.is_empty() => write!(f, "==*"),
            Operator::EqualStar => write!(f, "=={}.*", self.version),
            operator => write!(f, "{operator}{}", self.version),
        }
    }
}
