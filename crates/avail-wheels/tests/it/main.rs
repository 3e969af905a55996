//! this is the single integration test, as documented by matklad
//! in <https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html>

pub(crate) mod common;

// The test wheelhouse holds `linux_x86_64` wheels.
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod avail;

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod display;

mod errors;
