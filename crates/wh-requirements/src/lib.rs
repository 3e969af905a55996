//! Requirements as typed on the command line or listed in a requirements file.
//!
//! A requirement is a package name, optionally with `*` wildcards at its start and end, followed
//! by an optional version specifier:
//!
//! ```text
//! numpy
//! NumPy==1.21.*
//! *scipy*==1.1.*
//! torch*>=1.8
//! *numpy*-*
//! ```
//!
//! Extras, markers and URLs are not supported.

pub use requirement::{Requirement, RequirementParseError};
pub use requirement_set::RequirementSet;
pub use requirements_file::{RequirementsFile, RequirementsFileError};

mod cursor;
mod requirement;
mod requirement_set;
mod requirements_file;
