//! Select the wheels matching a query, then group and order them for display.
//!
//! A [`WheelQuery`] filters `(arch, filename)` pairs by requirement and by compatibility with
//! the target Python versions, keeps the latest version of each package unless told otherwise,
//! and returns a [`Selection`] that projects onto table [`Column`]s.

pub use column::Column;
pub use query::{NotAvailable, WheelQuery};
pub use selection::Selection;

mod column;
mod query;
mod selection;
