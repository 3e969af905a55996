//! The host's generic platform identifiers.

/// The platform identifiers a wheel built for this host may carry, most specific first.
///
/// Only the generic identifier of the host is considered (e.g. `linux_x86_64`), the same one
/// `sysconfig.get_platform()` reports; wheelhouse wheels are built locally and never carry
/// `manylinux` tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    platforms: Vec<String>,
}

impl HostPlatform {
    /// Use the given platform identifiers, e.g. to resolve tags for another host.
    pub fn new(platforms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
        }
    }

    /// Detect the generic platform identifier of the running host.
    pub fn from_env() -> Self {
        Self::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
    }

    fn from_os_arch(os: &str, arch: &str) -> Self {
        let platform = match (os, arch) {
            ("windows", "x86_64") => "win_amd64".to_string(),
            ("windows", "x86") => "win32".to_string(),
            ("windows", "aarch64") => "win_arm64".to_string(),
            ("macos", "aarch64") => "macosx_11_0_arm64".to_string(),
            ("macos", arch) => format!("macosx_10_9_{arch}"),
            (os, arch) => format!("{os}_{arch}"),
        };
        Self::new([platform])
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_platforms() {
        for (os, arch, expected) in [
            ("linux", "x86_64", "linux_x86_64"),
            ("linux", "aarch64", "linux_aarch64"),
            ("windows", "x86_64", "win_amd64"),
            ("macos", "aarch64", "macosx_11_0_arm64"),
            ("macos", "x86_64", "macosx_10_9_x86_64"),
            ("freebsd", "x86_64", "freebsd_x86_64"),
        ] {
            assert_eq!(
                HostPlatform::from_os_arch(os, arch).platforms(),
                &[expected.to_string()]
            );
        }
    }
}
