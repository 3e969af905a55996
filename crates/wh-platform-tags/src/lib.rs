pub use platform::HostPlatform;
pub use python_version::{PythonVersion, PythonVersionError};
pub use resolver::CompatibilityResolver;
pub use tag::{Tag, TagParseError, expand_tags};
pub use tags::Tags;

mod platform;
mod python_version;
mod resolver;
mod tag;
mod tags;
