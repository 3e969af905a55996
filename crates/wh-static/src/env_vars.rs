/// Declares all environment variables used throughout `avail-wheels` and its crates.
pub struct EnvVars;

impl EnvVars {
    /// The root of the wheelhouse, partitioned into one directory per architecture.
    ///
    /// Defaults to `/cvmfs/soft.computecanada.ca/custom/python/wheelhouse`.
    pub const WHEELHOUSE: &'static str = "WHEELHOUSE";

    /// The pip configuration file. When set (and non-empty), the `find-links` entry of its
    /// `[wheel]` section lists the directories to search instead of the whole wheelhouse.
    pub const PIP_CONFIG_FILE: &'static str = "PIP_CONFIG_FILE";

    /// The version of the Python module currently loaded, e.g., `3.10.2`.
    pub const EBVERSIONPYTHON: &'static str = "EBVERSIONPYTHON";

    /// The year of the Gentoo-based software stack, e.g., `2023`. Determines which
    /// architectures are available.
    pub const EBVERSIONGENTOO: &'static str = "EBVERSIONGENTOO";

    /// The active virtual environment. Its Python version takes priority over the loaded module.
    pub const VIRTUAL_ENV: &'static str = "VIRTUAL_ENV";

    /// A `:`-separated list of glob patterns matching directories that contain one
    /// subdirectory per installed Python version.
    pub const PYTHON_DIRS: &'static str = "PYTHON_DIRS";

    /// The CPU architecture of the current node, e.g., `avx2`.
    pub const RSNT_ARCH: &'static str = "RSNT_ARCH";

    /// Used to set the log level and filters for `tracing`.
    pub const RUST_LOG: &'static str = "RUST_LOG";

    /// Disables line wrapping of warnings.
    pub const AVAIL_WHEELS_NO_WRAP: &'static str = "AVAIL_WHEELS_NO_WRAP";

    /// Overrides terminal width used for wrapping warnings.
    pub const COLUMNS: &'static str = "COLUMNS";
}
