use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{HostPlatform, PythonVersion, Tag};

/// The frozen set of tags a wheel may declare to run under one target Python version.
///
/// Its principle function is to determine whether the tags of a particular wheel are compatible
/// with the target: a wheel is compatible if any one of its tags is in the set.
#[derive(Debug, Clone, Default)]
pub struct Tags {
    set: Arc<FxHashSet<Tag>>,
}

impl Tags {
    /// Returns the compatible tags for CPython at the given version on the given platform.
    ///
    /// The tags are generated the same way as for an installer (exact ABI, `abi3` and `none` for
    /// every older minor version, then the pure-Python tags), and then restricted to the
    /// interpreters `py{major}`, `py{major}{minor}` and `cp{major}{minor}`.
    pub fn from_env(platform: &HostPlatform, python_version: PythonVersion) -> Self {
        let interpreters = [
            format!("py{}", python_version.major()),
            format!("py{}", python_version.compact()),
            format!("cp{}", python_version.compact()),
        ];
        let set = generate(platform, python_version)
            .into_iter()
            .filter(|tag| interpreters.iter().any(|interpreter| interpreter == tag.interpreter()))
            .collect::<FxHashSet<_>>();
        Self { set: Arc::new(set) }
    }

    /// Returns `true` if the set shares at least one tag with the wheel's tags.
    pub fn is_compatible(&self, wheel_tags: &BTreeSet<Tag>) -> bool {
        wheel_tags.iter().any(|tag| self.set.contains(tag))
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.set.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.set.iter()
    }
}

/// The CPython ABI tag, e.g. `cp36m` for 3.6 and `cp27mu` for 2.7.
///
/// Pre-3.8 CPython was generally built with pymalloc (`m`), and pre-3.3 with a UCS-4 unicode
/// representation (`u`).
fn cpython_abi(python_version: PythonVersion) -> String {
    let version = (python_version.major(), python_version.minor());
    let pymalloc = if version < (3, 8) { "m" } else { "" };
    let ucs4 = if version < (3, 3) { "u" } else { "" };
    format!("cp{}{pymalloc}{ucs4}", python_version.compact())
}

/// Every tag CPython at the given version can install, in decreasing priority.
fn generate(platform: &HostPlatform, python_version: PythonVersion) -> Vec<Tag> {
    let major = python_version.major();
    let cpython = format!("cp{}", python_version.compact());
    let platforms = platform.platforms();
    let mut tags = Vec::with_capacity(5 * platforms.len());

    // 1. This exact c api version
    for platform in platforms {
        tags.push(Tag::new(&cpython, cpython_abi(python_version), platform));
    }
    // 2. abi3 and no abi (e.g. executable binary)
    for minor in (0..=python_version.minor()).rev() {
        // abi3 exists from Python 3.2 onwards
        if (major, minor) >= (3, 2) {
            for platform in platforms {
                tags.push(Tag::new(format!("cp{major}{minor}"), "abi3", platform));
            }
        }
        // Only include `none` tags for the current CPython version
        if minor == python_version.minor() {
            for platform in platforms {
                tags.push(Tag::new(&cpython, "none", platform));
            }
        }
    }
    // 3. no abi (e.g. executable binary)
    for minor in (0..=python_version.minor()).rev() {
        for platform in platforms {
            tags.push(Tag::new(format!("py{major}{minor}"), "none", platform));
        }
        // After the matching version emit `none` tags for the major version i.e. `py3`
        if minor == python_version.minor() {
            for platform in platforms {
                tags.push(Tag::new(format!("py{major}"), "none", platform));
            }
        }
    }
    // 4. no binary
    for minor in (0..=python_version.minor()).rev() {
        tags.push(Tag::new(format!("py{major}{minor}"), "none", "any"));
        if minor == python_version.minor() {
            tags.push(Tag::new(format!("py{major}"), "none", "any"));
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use insta::assert_snapshot;

    use super::*;
    use crate::expand_tags;

    fn sorted(tags: &Tags) -> String {
        let mut tags = tags.iter().map(ToString::to_string).collect::<Vec<_>>();
        tags.sort();
        tags.join("\n")
    }

    #[test]
    fn python_38() {
        let tags = Tags::from_env(&HostPlatform::new(["linux_x86_64"]), PythonVersion::new(3, 8));
        assert_snapshot!(sorted(&tags), @r"
        cp38-abi3-linux_x86_64
        cp38-cp38-linux_x86_64
        cp38-none-linux_x86_64
        py3-none-any
        py3-none-linux_x86_64
        py38-none-any
        py38-none-linux_x86_64
        ");
    }

    #[test]
    fn python_310() {
        let tags = Tags::from_env(&HostPlatform::new(["linux_x86_64"]), PythonVersion::new(3, 10));
        assert_eq!(tags.len(), 7);
        assert!(tags.contains(&Tag::from_str("cp310-cp310-linux_x86_64").unwrap()));
        assert!(tags.contains(&Tag::from_str("py310-none-any").unwrap()));
        // Older minor versions are generated, then filtered out.
        assert!(!tags.contains(&Tag::from_str("cp39-abi3-linux_x86_64").unwrap()));
        assert!(!tags.contains(&Tag::from_str("py39-none-any").unwrap()));
    }

    #[test]
    fn python_27() {
        let tags = Tags::from_env(&HostPlatform::new(["linux_x86_64"]), PythonVersion::new(2, 7));
        assert_snapshot!(sorted(&tags), @r"
        cp27-cp27mu-linux_x86_64
        cp27-none-linux_x86_64
        py2-none-any
        py2-none-linux_x86_64
        py27-none-any
        py27-none-linux_x86_64
        ");
    }

    #[test]
    fn pymalloc_abi() {
        let tags = Tags::from_env(&HostPlatform::new(["linux_x86_64"]), PythonVersion::new(3, 6));
        assert!(tags.contains(&Tag::from_str("cp36-cp36m-linux_x86_64").unwrap()));
        assert!(!tags.contains(&Tag::from_str("cp36-cp36-linux_x86_64").unwrap()));
    }

    #[test]
    fn intersection_not_subset() {
        let tags = Tags::from_env(&HostPlatform::new(["linux_x86_64"]), PythonVersion::new(3, 8));
        // Only `py3-none-any` is shared.
        assert!(tags.is_compatible(&expand_tags("py2.py3", "none", "any")));
        assert!(tags.is_compatible(&expand_tags("cp37.cp38", "abi3", "linux_x86_64")));
        assert!(!tags.is_compatible(&expand_tags("cp37", "cp37m", "linux_x86_64")));
        assert!(!tags.is_compatible(&expand_tags("cp38", "cp38", "win_amd64")));
    }
}
