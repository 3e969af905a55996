use assert_cmd::assert::OutputAssertExt;

use crate::common::{TestContext, avail_wheels_snapshot};

#[test]
fn raw() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--all-versions")
        .arg("--python")
        .arg("3.10")
        .arg("--raw"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    numpy-1.21.2+computecanada-cp310-cp310-linux_x86_64.whl
    numpy-1.21.2+computecanada-cp310-cp310-linux_x86_64.whl
    numpy-1.20.0+computecanada-cp310-cp310-linux_x86_64.whl

    ----- stderr -----
    "###
    );
}

#[test]
fn mediawiki() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--python")
        .arg("3.10")
        .arg("--mediawiki"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    {| class="wikitable"
    |-
    ! name !! version !! localversion !! build !! python !! arch
    |-
    | numpy || 1.21.2 || computecanada ||  || cp310 || generic
    |-
    | numpy || 1.21.2 || computecanada ||  || cp310 || avx2
    |}

    ----- stderr -----
    "###
    );
}

#[test]
fn columns() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--python")
        .arg("3.10")
        .arg("--column")
        .arg("name")
        .arg("abi")
        .arg("platform")
        .arg("arch"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   abi    platform      arch
    -----  -----  ------------  -------
    numpy  cp310  linux_x86_64  generic
    numpy  cp310  linux_x86_64  avx2

    ----- stderr -----
    "###
    );
}

#[test]
fn condense() {
    let context = TestContext::with_wheelhouse();

    avail_wheels_snapshot!(context, context
        .command()
        .arg("numpy")
        .arg("--all-versions")
        .arg("--python")
        .arg("3.10")
        .arg("--condense"), @r###"
    success: true
    exit_code: 0
    ----- stdout -----
    name   version         localversion   build  python  arch
    -----  --------------  -------------  -----  ------  -------------
    numpy  1.21.2, 1.20.0  computecanada         cp310   generic, avx2

    ----- stderr -----
    "###
    );
}

#[test]
fn quiet() {
    let context = TestContext::with_wheelhouse();
    context.add_wheels("gentoo/generic", &["broken.whl"]);

    context
        .command()
        .arg("--quiet")
        .arg("--python")
        .arg("3.10")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn verbose() {
    let context = TestContext::with_wheelhouse();

    context
        .command()
        .arg("numpy")
        .arg("--verbose")
        .arg("--python")
        .arg("3.10")
        .assert()
        .success()
        .stderr(predicates::str::contains(
            "DEBUG Looking for numpy wheel(s) for Python 3.10, latest versions only",
        ));
}
