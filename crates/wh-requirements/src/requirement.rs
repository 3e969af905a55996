use std::fmt::{Display, Formatter};
use std::str::FromStr;

use globset::{GlobBuilder, GlobMatcher};
use unicode_width::UnicodeWidthChar;

use wh_distribution_filename::Wheel;
use wh_normalize::PackageName;
use wh_pep440::{Version, VersionSpecifier};

use crate::cursor::Cursor;

/// A requirement: a package name or name pattern, and an optional version specifier.
///
/// The name is normalized (`SpaCy-metrics` becomes `spacy_metrics`), so that it compares equal to
/// the normalized name of a wheel.
#[derive(Debug, Clone)]
pub struct Requirement {
    name: PackageName,
    specifier: Option<VersionSpecifier>,
    /// Case-insensitive glob for names with a wildcard.
    matcher: Option<GlobMatcher>,
}

impl Requirement {
    /// The requirement matching every package, `*`.
    pub fn any() -> Self {
        Self {
            name: PackageName::new("*"),
            specifier: None,
            matcher: None,
        }
    }

    /// The normalized name, which may contain wildcards.
    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn specifier(&self) -> Option<&VersionSpecifier> {
        self.specifier.as_ref()
    }

    /// Replace the version specifier.
    #[must_use]
    pub fn with_specifier(self, specifier: VersionSpecifier) -> Self {
        Self {
            specifier: Some(specifier),
            ..self
        }
    }

    /// Returns `true` if the name contains a wildcard.
    pub fn is_pattern(&self) -> bool {
        self.name.is_pattern()
    }

    /// Returns `true` if the requirement pins an exact version, with `==`, `==1.2.*` or `===`.
    pub fn pins_exact_version(&self) -> bool {
        self.specifier
            .as_ref()
            .is_some_and(VersionSpecifier::is_exact)
    }

    /// Returns `true` if the normalized package name matches this requirement's name or pattern.
    pub fn matches_name(&self, name: &PackageName) -> bool {
        if self.name.as_str() == "*" {
            return true;
        }
        match &self.matcher {
            Some(matcher) => matcher.is_match(name.as_str()),
            None => self.name == *name,
        }
    }

    /// Returns `true` if the version satisfies the version specifier, if any.
    pub fn contains(&self, version: &Version) -> bool {
        self.specifier
            .as_ref()
            .is_none_or(|specifier| specifier.contains(version))
    }

    /// Returns `true` if both the wheel's name and its version satisfy this requirement.
    pub fn matches(&self, wheel: &Wheel) -> bool {
        self.matches_name(wheel.normalized_name()) && self.contains(wheel.full_version())
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.specifier == other.specifier
    }
}

impl Eq for Requirement {}

impl Display for Requirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(specifier) = &self.specifier {
            write!(f, "{specifier}")?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = RequirementParseError;

    /// Parse a requirement such as `NumPy==1.21.*`, `*scipy*` or `torch*>=1.8`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_requirement(&mut Cursor::new(input))
    }
}

/// A requirement that does not follow the grammar, with the span of the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementParseError {
    message: String,
    /// Span start, as a byte offset.
    start: usize,
    /// Span length, in bytes.
    len: usize,
    /// The input string so we can print it underlined.
    input: String,
}

impl RequirementParseError {
    fn new(message: impl Into<String>, start: usize, len: usize, cursor: &Cursor) -> Self {
        Self {
            message: message.into(),
            start,
            len,
            input: cursor.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for RequirementParseError {
    /// Pretty formatting with underline.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let start_offset = self.input[..self.start]
            .chars()
            .filter_map(UnicodeWidthChar::width)
            .sum::<usize>();
        let underline_len = if self.start == self.input.len() {
            // One past the end of the input
            1
        } else {
            self.input[self.start..self.start + self.len]
                .chars()
                .filter_map(UnicodeWidthChar::width)
                .sum::<usize>()
                .max(1)
        };
        write!(
            f,
            "{}\n{}\n{}{}",
            self.message,
            self.input,
            " ".repeat(start_offset),
            "^".repeat(underline_len)
        )
    }
}

impl std::error::Error for RequirementParseError {}

fn is_name_char(char: char) -> bool {
    char.is_ascii_alphanumeric() || matches!(char, '.' | '-' | '_')
}

fn is_separator(char: char) -> bool {
    matches!(char, '.' | '-' | '_')
}

fn is_operator_char(char: char) -> bool {
    matches!(char, '=' | '!' | '<' | '>' | '~')
}

fn parse_requirement(cursor: &mut Cursor) -> Result<Requirement, RequirementParseError> {
    cursor.eat_whitespace();
    let name = parse_name(cursor)?;
    cursor.eat_whitespace();
    let specifier = parse_specifier(cursor)?;

    let name = PackageName::new(name);
    let matcher = if name.is_pattern() && name.as_str() != "*" {
        let glob = GlobBuilder::new(name.as_str())
            .case_insensitive(true)
            .build()
            .map_err(|err| RequirementParseError::new(err.to_string(), 0, cursor.pos(), cursor))?;
        Some(glob.compile_matcher())
    } else {
        None
    };

    Ok(Requirement {
        name,
        specifier,
        matcher,
    })
}

/// Parse a name, with an optional `*` before it, and an optional `*`, `-*` or `*-*` after it.
///
/// A lone `*` matches every name.
fn parse_name<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, RequirementParseError> {
    let start = cursor.pos();
    let leading = cursor.eat_char('*').is_some();

    let (ident_start, ident_len) = match cursor.peek() {
        Some((_, char)) if char.is_ascii_alphanumeric() => cursor.take_while(is_name_char),
        // `*` on its own, optionally followed by a version specifier.
        Some((_, char)) if leading && (char.is_whitespace() || is_operator_char(char)) => {
            (cursor.pos(), 0)
        }
        None if leading => (cursor.pos(), 0),
        Some((index, char)) => {
            return Err(RequirementParseError::new(
                format!(
                    "Expected package name starting with an alphanumeric character, found `{char}`"
                ),
                index,
                char.len_utf8(),
                cursor,
            ));
        }
        None => {
            return Err(RequirementParseError::new(
                "Empty field is not allowed for a requirement",
                start,
                1,
                cursor,
            ));
        }
    };

    if ident_len == 0 {
        return Ok(cursor.slice(start, cursor.pos() - start));
    }

    if let Some(star) = cursor.eat_char('*') {
        // `*-*`, `*_*` or `*.*` at the end of the name.
        if cursor.peek_char().is_some_and(is_separator) && cursor.peek_second_char() == Some('*') {
            cursor.next();
            cursor.next();
        }
        if let Some((index, char)) = cursor.peek() {
            if is_name_char(char) || char == '*' {
                return Err(RequirementParseError::new(
                    "Wildcards (`*`) are only allowed at the start and the end of a package name",
                    star,
                    index + char.len_utf8() - star,
                    cursor,
                ));
            }
        }
    } else {
        let ident = cursor.slice(ident_start, ident_len);
        if let Some(last) = ident.chars().last().filter(|char| is_separator(*char)) {
            return Err(RequirementParseError::new(
                format!("Package name must end with an alphanumeric character, not `{last}`"),
                ident_start + ident_len - 1,
                1,
                cursor,
            ));
        }
    }

    Ok(cursor.slice(start, cursor.pos() - start))
}

fn parse_specifier(cursor: &mut Cursor) -> Result<Option<VersionSpecifier>, RequirementParseError> {
    let Some((start, char)) = cursor.peek() else {
        return Ok(None);
    };
    if !is_operator_char(char) {
        return Err(RequirementParseError::new(
            format!("Expected a version specifier such as `==1.0`, found `{char}`"),
            start,
            char.len_utf8(),
            cursor,
        ));
    }

    let rest = cursor.rest().trim_end();
    let specifier = VersionSpecifier::from_str(rest)
        .map_err(|err| RequirementParseError::new(err.to_string(), start, rest.len(), cursor))?;
    cursor.take_while(|_| true);
    Ok(Some(specifier))
}
