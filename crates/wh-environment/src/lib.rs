//! The environment `avail-wheels` runs in: where the wheelhouse is, which Python versions and
//! architectures are available, and which directories to search for wheels.

use std::path::PathBuf;

use thiserror::Error;

pub use discovery::discover;
pub use runtime::{RuntimeEnvironment, RuntimeEnvironmentBuilder};
pub use search_paths::filter_search_paths;

mod discovery;
mod pyvenv;
mod runtime;
mod search_paths;

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Failed to read pip configuration file `{}`", _0.display())]
    ReadPipConfig(PathBuf, #[source] std::io::Error),

    #[error("Invalid pip configuration file `{}`: {}", _0.display(), _1)]
    InvalidPipConfig(PathBuf, String),

    #[error("Failed to read `{}`", _0.display())]
    ReadPyVenvCfg(PathBuf, #[source] std::io::Error),

    #[error("Invalid glob pattern `{0}`")]
    Pattern(String, #[source] glob::PatternError),

    #[error("Failed to expand glob pattern `{0}`")]
    Glob(String, #[source] glob::GlobError),
}
