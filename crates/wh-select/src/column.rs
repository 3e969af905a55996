use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use wh_distribution_filename::Wheel;
use wh_pep440::Version;

/// A column of the wheel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Column {
    /// The package name, as spelled in the filename.
    Name,
    /// The public version.
    Version,
    /// The local version, e.g. `computecanada` in `1.8.0+computecanada`.
    #[cfg_attr(feature = "clap", value(name = "localversion"))]
    LocalVersion,
    /// The build tag.
    Build,
    /// The interpreter tags.
    Python,
    /// The ABI tags.
    Abi,
    /// The platform tags.
    Platform,
    /// The wheelhouse architecture the wheel was found in.
    Arch,
}

impl Column {
    /// The columns displayed when none are requested.
    pub const DEFAULT: [Self; 6] = [
        Self::Name,
        Self::Version,
        Self::LocalVersion,
        Self::Build,
        Self::Python,
        Self::Arch,
    ];

    /// The header of the column.
    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::LocalVersion => "localversion",
            Self::Build => "build",
            Self::Python => "python",
            Self::Abi => "abi",
            Self::Platform => "platform",
            Self::Arch => "arch",
        }
    }

    /// The value of this column for a wheel.
    pub fn value(self, wheel: &Wheel) -> String {
        match self {
            Self::Name => wheel.name().to_string(),
            Self::Version => wheel.version().to_string(),
            Self::LocalVersion => wheel.local_version().unwrap_or_default().to_string(),
            Self::Build => wheel.build().to_string(),
            Self::Python => wheel.python(),
            Self::Abi => wheel.abi(),
            Self::Platform => wheel.platform(),
            Self::Arch => wheel.arch().to_string(),
        }
    }

    /// Whether the values of this column are ordered as versions rather than as text.
    fn is_version_like(self) -> bool {
        matches!(
            self,
            Self::Version | Self::LocalVersion | Self::Build | Self::Python
        )
    }

    /// Compare two values of this column, in ascending order.
    pub(crate) fn compare(self, a: &str, b: &str) -> Ordering {
        if self.is_version_like() {
            Version::new(a)
                .cmp(&Version::new(b))
                .then_with(|| a.cmp(b))
        } else {
            a.cmp(b)
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        let wheel = Wheel::from_filename(
            "avx2",
            "tensorflow_gpu-1.8.0+computecanada-cp36-cp36m-linux_x86_64.whl",
        )
        .unwrap();
        let values = [
            Column::Name,
            Column::Version,
            Column::LocalVersion,
            Column::Build,
            Column::Python,
            Column::Abi,
            Column::Platform,
            Column::Arch,
        ]
        .map(|column| column.value(&wheel));
        assert_eq!(
            values,
            [
                "tensorflow_gpu",
                "1.8.0",
                "computecanada",
                "",
                "cp36",
                "cp36m",
                "linux_x86_64",
                "avx2"
            ]
        );
    }

    #[test]
    fn compare() {
        assert_eq!(Column::Version.compare("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(Column::Python.compare("cp36", "cp310"), Ordering::Less);
        assert_eq!(Column::Arch.compare("avx2", "avx"), Ordering::Greater);
        assert_eq!(Column::Arch.compare("avx", "sse3"), Ordering::Less);
    }
}
