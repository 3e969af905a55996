use anyhow::Result;
use assert_fs::prelude::*;

use wh_static::EnvVars;

use crate::common::{TestContext, avail_wheels_snapshot};

#[test]
fn latest_versions() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context.command().arg("--python").arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name       version  localversion   build  python   arch
    ---------  -------  -------------  -----  -------  -------
    cftime     1.5.1                          cp310    generic
    netCDF4    1.5.8    computecanada         cp310    generic
    numpy      1.21.2   computecanada         cp310    generic
    numpy      1.21.2   computecanada         cp310    avx2
    six        1.16.0                         py2,py3  generic
    torch_cpu  1.10.0   computecanada         cp310    avx2

    ----- stderr -----
    "###
    );
}

/// Without `--python`, the loaded Python module is used.
#[test]
fn loaded_python_module() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context.command().env(EnvVars::EBVERSIONPYTHON, "3.9.6"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python   arch
    -----  -------  -------------  -----  -------  -------
    numpy  1.21.2   computecanada         cp39     avx2
    six    1.16.0                         py2,py3  generic

    ----- stderr -----
    "###
    );
}

/// The Python of the active virtual environment takes priority over the loaded module.
#[test]
fn virtual_environment() -> Result<()> {
    let context = TestContext::with_wheelhouse();
    let venv = context.root.child("venv");
    venv.child("pyvenv.cfg")
        .write_str("home = /usr/bin\ninclude-system-site-packages = false\nversion = 3.9.7\n")?;

    avail_wheels_snapshot!(context, context
        .command()
        .env(EnvVars::VIRTUAL_ENV, venv.path())
        .env(EnvVars::EBVERSIONPYTHON, "3.10.2"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python   arch
    -----  -------  -------------  -----  -------  -------
    numpy  1.21.2   computecanada         cp39     avx2
    six    1.16.0                         py2,py3  generic

    ----- stderr -----
    "###
    );

    Ok(())
}

/// An exact version shows every matching version, not only the latest.
#[test]
fn version() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--version")
        .arg("1.20*")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python  arch
    -----  -------  -------------  -----  ------  -------
    numpy  1.20.0   computecanada         cp310   generic

    ----- stderr -----
    "###
    );
}

#[test]
fn all_versions() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--all-versions")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python  arch
    -----  -------  -------------  -----  ------  -------
    numpy  1.21.2   computecanada         cp310   generic
    numpy  1.21.2   computecanada         cp310   avx2
    numpy  1.20.0   computecanada         cp310   generic

    ----- stderr -----
    "###
    );
}

#[test]
fn wildcard_is_case_insensitive() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("*CDF*")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name     version  localversion   build  python  arch
    -------  -------  -------------  -----  ------  -------
    netCDF4  1.5.8    computecanada         cp310   generic

    ----- stderr -----
    "###
    );
}

#[test]
fn arch() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("--arch")
        .arg("avx2")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name       version  localversion   build  python  arch
    ---------  -------  -------------  -----  ------  ----
    numpy      1.21.2   computecanada         cp310   avx2
    torch_cpu  1.10.0   computecanada         cp310   avx2

    ----- stderr -----
    "###
    );
}

/// An architecture that is not available is reported, and matches nothing.
#[test]
fn unknown_arch() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("--arch")
        .arg("x86-64-v3")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name  version  localversion  build  python  arch
    ----  -------  ------------  -----  ------  ----

    ----- stderr -----
    warning: Architecture `x86-64-v3` is not one of the available architectures: avx, avx2, avx512, generic, sse3
    "###
    );
}

#[test]
fn not_available() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("scipy")
        .arg("--not-available")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python  arch
    -----  -------  -------------  -----  ------  -------
    numpy  1.21.2   computecanada         cp310   generic
    numpy  1.21.2   computecanada         cp310   avx2
    scipy

    ----- stderr -----
    "###
    );

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("scipy")
        .arg("--not-available-only")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion  build  python  arch
    -----  -------  ------------  -----  ------  ----
    scipy

    ----- stderr -----
    "###
    );
}

#[test]
fn requirements_file() -> Result<()> {
    let context = TestContext::with_wheelhouse();
    context
        .root
        .child("requirements.txt")
        .write_str("# Pinned\nnumpy==1.20.*\ncftime  # any version\n")?;

    avail_wheels_snapshot!(context, context
        .command()
        .arg("-r")
        .arg("requirements.txt")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name    version  localversion   build  python  arch
    ------  -------  -------------  -----  ------  -------
    cftime  1.5.1                          cp310   generic
    numpy   1.20.0   computecanada         cp310   generic

    ----- stderr -----
    "###
    );

    Ok(())
}

/// The command line takes precedence over the requirements files.
#[test]
fn requirements_file_override() -> Result<()> {
    let context = TestContext::with_wheelhouse();
    context
        .root
        .child("requirements.txt")
        .write_str("numpy==1.20.*\n")?;

    avail_wheels_snapshot!(context, context
        .command()
        .arg("-r")
        .arg("requirements.txt")
        .arg("NumPy==1.21.*")
        .arg("--python")
        .arg("3.10")
        .arg("--arch")
        .arg("generic"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version  localversion   build  python  arch
    -----  -------  -------------  -----  ------  -------
    numpy  1.21.2   computecanada         cp310   generic

    ----- stderr -----
    "###
    );

    Ok(())
}

#[test]
fn unparseable_filename() {
    let context = TestContext::with_wheelhouse();
    context.add_wheels("gentoo/generic", &["broken.whl"]);

    avail_wheels_snapshot!(context, context
        .command()
        .arg("six")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name  version  localversion  build  python   arch
    ----  -------  ------------  -----  -------  -------
    six   1.16.0                        py2,py3  generic

    ----- stderr -----
    warning: The wheel filename "broken.whl" is invalid: Must have a version (found in `generic`)
    "###
    );
}

/// With a pip configuration file, only its `find-links` are searched.
#[test]
fn pip_config_file() -> Result<()> {
    let context = TestContext::with_wheelhouse();
    let pip_config_file = context.root.child("pip.conf");
    pip_config_file.write_str(&format!(
        "[wheel]\nfind-links = {}\n",
        context.wheelhouse.child("gentoo/avx2").path().display()
    ))?;

    avail_wheels_snapshot!(context, context
        .command()
        .env(EnvVars::PIP_CONFIG_FILE, pip_config_file.path())
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name       version  localversion   build  python  arch
    ---------  -------  -------------  -----  ------  ----
    numpy      1.21.2   computecanada         cp310   avx2
    torch_cpu  1.10.0   computecanada         cp310   avx2

    ----- stderr -----
    "###
    );

    Ok(())
}

#[test]
fn no_match() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("tensorflow")
        .arg("--python")
        .arg("3.10"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name  version  localversion  build  python  arch
    ----  -------  ------------  -----  ------  ----

    ----- stderr -----
    "###
    );
}
