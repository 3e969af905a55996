use std::cmp::Reverse;

use indexmap::IndexMap;
use itertools::Itertools;

use wh_distribution_filename::{Wheel, WheelParse};
use wh_normalize::PackageName;
use wh_pep440::Version;

use crate::Column;

/// The wheels selected by a [`crate::WheelQuery`], grouped by package and sorted for display.
///
/// Groups are ordered by name, ascending. Within a group, wheels are ordered by version, then
/// architecture, then interpreter tag, all descending.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    groups: IndexMap<PackageName, Vec<Wheel>>,
    unparseable: Vec<WheelParse>,
}

impl Selection {
    pub(crate) fn new(
        mut groups: IndexMap<PackageName, Vec<Wheel>>,
        unparseable: Vec<WheelParse>,
    ) -> Self {
        sort(&mut groups);
        Self {
            groups,
            unparseable,
        }
    }

    /// The selected wheels, keyed by normalized package name.
    pub fn groups(&self) -> &IndexMap<PackageName, Vec<Wheel>> {
        &self.groups
    }

    /// The files that were not valid wheel filenames.
    pub fn unparseable(&self) -> &[WheelParse] {
        &self.unparseable
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn wheels(&self) -> impl Iterator<Item = &Wheel> {
        self.groups.values().flatten()
    }

    /// The filename of every selected wheel, in display order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.wheels().map(Wheel::filename)
    }

    /// Project the selection onto the given columns.
    ///
    /// With `condense`, each package is reduced to a single row whose cells list the distinct
    /// values of its wheels, greatest first.
    pub fn rows(&self, columns: &[Column], condense: bool) -> Vec<Vec<String>> {
        if condense {
            self.groups
                .values()
                .map(|wheels| {
                    columns
                        .iter()
                        .map(|column| condensed(*column, wheels))
                        .collect()
                })
                .collect()
        } else {
            self.wheels()
                .map(|wheel| columns.iter().map(|column| column.value(wheel)).collect())
                .collect()
        }
    }
}

/// The distinct values of a column across wheels, greatest first, joined with `, `.
fn condensed(column: Column, wheels: &[Wheel]) -> String {
    wheels
        .iter()
        .map(|wheel| column.value(wheel))
        .unique()
        .sorted_by(|a, b| column.compare(b, a))
        .join(", ")
}

/// Sort groups by name, and the wheels of each group for display.
///
/// The wheel sort is stable, so sorting by the least significant key first yields the combined
/// ordering.
fn sort(groups: &mut IndexMap<PackageName, Vec<Wheel>>) {
    groups.sort_by(|a, _, b, _| {
        a.as_str()
            .to_lowercase()
            .cmp(&b.as_str().to_lowercase())
            .then_with(|| a.cmp(b))
    });
    for wheels in groups.values_mut() {
        wheels.sort_by_cached_key(|wheel| Reverse(Version::new(wheel.python())));
        wheels.sort_by(|a, b| b.arch().cmp(a.arch()));
        wheels.sort_by(|a, b| b.full_version().cmp(a.full_version()));
    }
}
