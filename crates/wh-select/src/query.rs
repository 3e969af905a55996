use indexmap::IndexMap;
use tracing::debug;

use wh_distribution_filename::{Wheel, WheelParse};
use wh_normalize::PackageName;
use wh_platform_tags::CompatibilityResolver;
use wh_requirements::RequirementSet;

use crate::Selection;

/// Whether requirements without any matching wheel are reported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NotAvailable {
    /// Only report the matching wheels.
    #[default]
    Hide,
    /// Report the matching wheels, plus a placeholder for each requirement without a match.
    Show,
    /// Only report a placeholder for each requirement without a match.
    Only,
}

/// A query against the wheels found in the wheelhouse.
#[derive(Debug, Clone)]
pub struct WheelQuery {
    /// The target Python versions, e.g. `["3.10", "3.11"]`.
    pub targets: Vec<String>,
    pub requirements: RequirementSet,
    /// Keep only the wheels at the latest version of each package.
    pub latest: bool,
    pub not_available: NotAvailable,
}

impl WheelQuery {
    /// Create a query for the latest versions, unless a requirement pins an exact version.
    pub fn new(targets: Vec<String>, requirements: RequirementSet) -> Self {
        let latest = !requirements.pins_exact_version();
        Self {
            targets,
            requirements,
            latest,
            not_available: NotAvailable::default(),
        }
    }

    /// Report every version of each package, rather than only the latest.
    #[must_use]
    pub fn with_all_versions(mut self, all_versions: bool) -> Self {
        self.latest = !all_versions && !self.requirements.pins_exact_version();
        self
    }

    #[must_use]
    pub fn with_not_available(mut self, not_available: NotAvailable) -> Self {
        self.not_available = not_available;
        self
    }

    /// Select the wheels matching the query among the given `(arch, filename)` pairs.
    pub fn select<A, F>(
        &self,
        resolver: &CompatibilityResolver,
        files: impl IntoIterator<Item = (A, F)>,
    ) -> Selection
    where
        A: Into<String>,
        F: Into<String>,
    {
        let mut groups: IndexMap<PackageName, Vec<Wheel>> = IndexMap::new();
        let mut unparseable = Vec::new();
        let mut seen = 0usize;

        for (arch, filename) in files {
            seen += 1;
            let wheel = match Wheel::parse(arch, filename) {
                WheelParse::Parsed(wheel) => wheel,
                parse @ WheelParse::Unparseable { .. } => {
                    unparseable.push(parse);
                    continue;
                }
            };
            if !self.requirements.matches(&wheel) {
                continue;
            }
            if !resolver.is_compatible(wheel.tags(), &self.targets) {
                continue;
            }
            groups
                .entry(wheel.normalized_name().clone())
                .or_default()
                .push(wheel);
        }

        debug!(
            "Found {} matching package(s) among {seen} file(s) ({} unparseable)",
            groups.len(),
            unparseable.len()
        );

        if self.latest {
            latest_versions(&mut groups);
        }

        match self.not_available {
            NotAvailable::Hide => {}
            NotAvailable::Show => {
                let placeholders = not_available(&groups, &self.requirements);
                groups.extend(placeholders);
            }
            NotAvailable::Only => {
                groups = not_available(&groups, &self.requirements)
                    .into_iter()
                    .collect();
            }
        }

        Selection::new(groups, unparseable)
    }
}

/// Retain, in each group, every wheel at the group's greatest version.
pub(crate) fn latest_versions(groups: &mut IndexMap<PackageName, Vec<Wheel>>) {
    for wheels in groups.values_mut() {
        let Some(latest) = wheels.iter().map(Wheel::full_version).max().cloned() else {
            continue;
        };
        wheels.retain(|wheel| *wheel.full_version() == latest);
    }
}

/// A placeholder group for each requirement that matches none of the groups.
pub(crate) fn not_available(
    groups: &IndexMap<PackageName, Vec<Wheel>>,
    requirements: &RequirementSet,
) -> Vec<(PackageName, Vec<Wheel>)> {
    requirements
        .iter()
        .filter(|requirement| !groups.keys().any(|name| requirement.matches_name(name)))
        .map(|requirement| {
            debug!("No wheel available for `{}`", requirement.name());
            let placeholder = Wheel::placeholder(requirement.name().as_str());
            (requirement.name().clone(), vec![placeholder])
        })
        .collect()
}
