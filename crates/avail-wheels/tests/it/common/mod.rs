// The `unreachable_pub` is to silence false positives in RustRover.
#![allow(dead_code, unreachable_pub)]

use std::borrow::BorrowMut;
use std::path::PathBuf;
use std::process::{Command, Output};

use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use regex::Regex;

use wh_static::EnvVars;

/// The wheels of the test wheelhouse, by partition.
pub const WHEELHOUSE: &[(&str, &[&str])] = &[
    (
        "gentoo/avx2",
        &[
            "numpy-1.21.2+computecanada-cp39-cp39-linux_x86_64.whl",
            "numpy-1.21.2+computecanada-cp310-cp310-linux_x86_64.whl",
            "torch_cpu-1.10.0+computecanada-cp310-cp310-linux_x86_64.whl",
        ],
    ),
    (
        "gentoo/generic",
        &[
            "cftime-1.5.1-cp310-cp310-linux_x86_64.whl",
            "netCDF4-1.5.8+computecanada-cp310-cp310-linux_x86_64.whl",
            "numpy-1.20.0+computecanada-cp310-cp310-linux_x86_64.whl",
            "numpy-1.21.2+computecanada-cp310-cp310-linux_x86_64.whl",
            "six-1.16.0-py2.py3-none-any.whl",
        ],
    ),
];

pub struct TestContext {
    pub root: assert_fs::TempDir,
    pub wheelhouse: ChildPath,
    /// A directory with one subdirectory per installed Python, `3.10.2` and `3.11.5`.
    pub python_dir: ChildPath,

    /// Standard filters for this test context.
    filters: Vec<(String, String)>,
}

impl TestContext {
    /// Create a context with an empty wheelhouse.
    pub fn new() -> Self {
        let root = assert_fs::TempDir::new().expect("Failed to create test root directory");

        let wheelhouse = root.child("wheelhouse");
        wheelhouse
            .create_dir_all()
            .expect("Failed to create wheelhouse");

        let python_dir = root.child("python");
        for version in ["3.10.2", "3.11.5"] {
            python_dir
                .child(version)
                .create_dir_all()
                .expect("Failed to create Python directory");
        }

        let mut filters = Vec::new();
        for path in [
            root.path().to_path_buf(),
            canonicalize_or_keep(root.path()),
        ] {
            filters.push((
                regex::escape(&path.display().to_string()),
                "[ROOT]".to_string(),
            ));
        }

        Self {
            root,
            wheelhouse,
            python_dir,
            filters,
        }
    }

    /// Create a context with the wheels of [`WHEELHOUSE`].
    pub fn with_wheelhouse() -> Self {
        let context = Self::new();
        for (partition, filenames) in WHEELHOUSE {
            context.add_wheels(partition, filenames);
        }
        context
    }

    /// Add empty files to a partition of the wheelhouse, e.g. `gentoo/avx2`.
    pub fn add_wheels(&self, partition: &str, filenames: &[&str]) {
        let partition = self.wheelhouse.child(partition);
        partition
            .create_dir_all()
            .expect("Failed to create partition");
        for filename in filenames {
            partition
                .child(filename)
                .touch()
                .expect("Failed to create wheel");
        }
    }

    /// Create an `avail-wheels` command that only sees this context, whatever the host
    /// environment.
    pub fn command(&self) -> Command {
        let mut command = Command::new(get_bin());
        command
            .env(EnvVars::WHEELHOUSE, self.wheelhouse.path())
            .env(EnvVars::PYTHON_DIRS, self.python_dir.path())
            .env(EnvVars::AVAIL_WHEELS_NO_WRAP, "1")
            .env_remove(EnvVars::PIP_CONFIG_FILE)
            .env_remove(EnvVars::VIRTUAL_ENV)
            .env_remove(EnvVars::EBVERSIONPYTHON)
            .env_remove(EnvVars::EBVERSIONGENTOO)
            .env_remove(EnvVars::RSNT_ARCH)
            .env_remove(EnvVars::RUST_LOG)
            .env_remove(EnvVars::COLUMNS)
            .current_dir(self.root.path());
        command
    }

    pub fn filters(&self) -> Vec<(&str, &str)> {
        self.filters
            .iter()
            .map(|(pattern, replacement)| (pattern.as_str(), replacement.as_str()))
            .collect()
    }
}

fn canonicalize_or_keep(path: &std::path::Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Returns the `avail-wheels` binary that cargo built before launching the tests.
pub fn get_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_avail-wheels"))
}

pub fn apply_filters<T: AsRef<str>>(mut snapshot: String, filters: impl AsRef<[(T, T)]>) -> String {
    for (matcher, replacement) in filters.as_ref() {
        let re = Regex::new(matcher.as_ref()).expect("Do you need to regex::escape your filter?");
        if re.is_match(&snapshot) {
            snapshot = re.replace_all(&snapshot, replacement.as_ref()).to_string();
        }
    }
    snapshot
}

/// Execute the command and format its output status, stdout and stderr into a snapshot string.
#[allow(clippy::print_stderr)]
pub fn run_and_format<T: AsRef<str>>(
    mut command: impl BorrowMut<Command>,
    filters: impl AsRef<[(T, T)]>,
) -> (String, Output) {
    let program = command
        .borrow_mut()
        .get_program()
        .to_string_lossy()
        .to_string();

    let output = command
        .borrow_mut()
        .output()
        .unwrap_or_else(|err| panic!("Failed to spawn {program}: {err}"));

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ Unfiltered output ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "----- stdout -----\n{}\n----- stderr -----\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
    eprintln!("────────────────────────────────────────────────────────────────────────────────\n");

    let snapshot = apply_filters(
        format!(
            "success: {:?}\nexit_code: {}\n----- stdout -----\n{}\n----- stderr -----\n{}",
            output.status.success(),
            output.status.code().unwrap_or(!0),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ),
        filters,
    );

    (snapshot, output)
}

/// Run `avail-wheels` and snapshot its exit status, stdout and stderr.
#[allow(unused_macros)]
macro_rules! avail_wheels_snapshot {
    ($context:expr, $spawnable:expr, @$snapshot:literal) => {{
        let (snapshot, output) = $crate::common::run_and_format($spawnable, $context.filters());
        ::insta::assert_snapshot!(snapshot, @$snapshot);
        output
    }};
}

#[allow(unused_imports)]
pub(crate) use avail_wheels_snapshot;
