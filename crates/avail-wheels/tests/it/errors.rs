use assert_cmd::assert::OutputAssertExt;
use assert_fs::prelude::*;
use predicates::prelude::*;

use wh_static::EnvVars;

use crate::common::{TestContext, avail_wheels_snapshot};

#[test]
fn help() {
    let context = TestContext::new();

    context
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List currently available wheels patterns"))
        .stdout(predicate::str::contains("avail-wheels numpy --all-versions"));
}

/// Grammar errors in requirements abort before the wheelhouse is searched.
#[test]
fn invalid_requirement() {
    let context = TestContext::new();

    context
        .command()
        .arg("*num*py")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value '*num*py'"));
}

#[test]
fn conflicting_options() {
    let context = TestContext::new();

    context
        .command()
        .arg("--raw")
        .arg("--mediawiki")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn invalid_version() {
    let context = TestContext::new();

    context
        .command()
        .arg("numpy")
        .arg("--version")
        .arg("1.*.2")
        .arg("--python")
        .arg("3.10")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: Invalid version `1.*.2`"))
        .stderr(predicate::str::contains("Caused by:"));
}

#[test]
fn invalid_requirements_file() {
    let context = TestContext::new();
    context
        .root
        .child("requirements.txt")
        .write_str("numpy\n*num*py\n")
        .unwrap();

    context
        .command()
        .arg("-r")
        .arg("requirements.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "error: Couldn't parse requirement in `requirements.txt` at line 2",
        ));
}

#[test]
fn missing_requirements_file() {
    let context = TestContext::new();

    context
        .command()
        .arg("-r")
        .arg("missing.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: Failed to read `missing.txt`"));
}

#[test]
fn no_python() {
    let context = TestContext::new();

    avail_wheels_snapshot!(context, context
        .command()
        .env(EnvVars::PYTHON_DIRS, context.root.child("missing").path()), @r###"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: No Python version to look for; use `--python` to select one, e.g. `--python 3.11`
    "###
    );
}

/// Unexpected errors exit with 2.
#[test]
fn missing_pip_config_file() {
    let context = TestContext::new();
    let pip_config_file = context.root.child("missing.conf");

    context
        .command()
        .env(EnvVars::PIP_CONFIG_FILE, pip_config_file.path())
        .arg("--python")
        .arg("3.10")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with(format!(
            "error: Failed to read pip configuration file `{}`",
            pip_config_file.path().display()
        )))
        .stderr(predicate::str::contains("Caused by:"));
}

#[test]
fn invalid_rust_log() {
    let context = TestContext::new();

    context
        .command()
        .env(EnvVars::RUST_LOG, "avail_wheels=loud")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: Invalid RUST_LOG directives"));
}
