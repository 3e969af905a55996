//! Python version numbers and version specifiers.
//!
//! Wheel filenames in a wheelhouse do not always carry a [PEP 440](https://peps.python.org/pep-0440)
//! conforming version, and the same ordering is also used for build tags and interpreter tags. A
//! [`Version`] therefore never fails to parse: strings that are not valid PEP 440 versions fall
//! back to a "loose" lexical ordering that is still a total order.
//!
//! ```text
//! Version::new("1.2.0") < Version::new("1.2.0+cc")
//! Version::new("cp27") < Version::new("cp36")
//! "==1.2.*".parse::<VersionSpecifier>()?.contains(&Version::new("1.2.3"))
//! ```
//!
//! Ordering rules worth knowing:
//!
//! * Release segments are compared as if padded with zeros (`1.0 == 1.0.0`).
//! * `dev` releases sort before pre-releases, pre-releases before the release, and post-releases
//!   after it.
//! * A local version sorts after the same version without one, and is part of equality.
//! * Any loose version sorts below every PEP 440 version.

pub use {
    version::{LocalSegment, LooseSegment, Prerelease, PrereleaseKind, Version, VersionParseError},
    version_specifier::{Operator, VersionSpecifier, VersionSpecifierParseError},
};

mod version;
mod version_specifier;
