use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::{HostPlatform, PythonVersion, Tag, Tags};

/// Resolves and memoizes the compatible [`Tags`] of each target Python version.
///
/// The cache is keyed by the target version string as given. Recomputing an entry is always safe,
/// since it only depends on the key and the host platform.
#[derive(Debug)]
pub struct CompatibilityResolver {
    platform: HostPlatform,
    cache: Mutex<FxHashMap<String, Tags>>,
}

impl CompatibilityResolver {
    pub fn new(platform: HostPlatform) -> Self {
        Self {
            platform,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn platform(&self) -> &HostPlatform {
        &self.platform
    }

    /// The compatible tags of a target version such as `3.11`.
    ///
    /// A target that does not parse as a Python version resolves to an empty set, i.e. it matches
    /// nothing.
    pub fn tags(&self, target: &str) -> Tags {
        if let Some(tags) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
        {
            return tags.clone();
        }

        let tags = match PythonVersion::from_str(target) {
            Ok(python_version) => {
                let tags = Tags::from_env(&self.platform, python_version);
                trace!(
                    "Resolved {} compatible tags for Python {python_version}",
                    tags.len()
                );
                tags
            }
            Err(err) => {
                warn!("No compatible tags for `{target}`: {err}");
                Tags::default()
            }
        };

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(target.to_string(), tags.clone());
        tags
    }

    /// Returns `true` if the wheel tags are compatible with any of the targets.
    pub fn is_compatible<S: AsRef<str>>(&self, wheel_tags: &BTreeSet<Tag>, targets: &[S]) -> bool {
        targets
            .iter()
            .any(|target| self.tags(target.as_ref()).is_compatible(wheel_tags))
    }
}
