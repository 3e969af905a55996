use indexmap::IndexMap;
use tracing::trace;

use wh_distribution_filename::Wheel;
use wh_normalize::PackageName;

use crate::Requirement;

/// The active requirements of a query, keyed by normalized name.
///
/// Inserting a requirement whose name is already present replaces the previous one, so
/// requirements given later (e.g. on the command line, after the requirements files) take
/// precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    requirements: IndexMap<PackageName, Requirement>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a requirement, replacing any requirement with the same name.
    pub fn insert(&mut self, requirement: Requirement) -> Option<Requirement> {
        let previous = self
            .requirements
            .insert(requirement.name().clone(), requirement);
        if let Some(previous) = &previous {
            trace!("Overriding requirement `{previous}`");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.get(name)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// An empty set places no constraint on names.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }

    /// Returns `true` if any requirement pins an exact version.
    pub fn pins_exact_version(&self) -> bool {
        self.iter().any(Requirement::pins_exact_version)
    }

    /// Returns `true` if the wheel satisfies the requirements.
    ///
    /// If a requirement has exactly the wheel's normalized name, only that requirement is
    /// evaluated. Otherwise the wheel must match the name pattern and version specifier of at
    /// least one wildcard requirement.
    pub fn matches(&self, wheel: &Wheel) -> bool {
        if self.is_empty() {
            return true;
        }
        if let Some(requirement) = self.get(wheel.normalized_name().as_str()) {
            return requirement.contains(wheel.full_version());
        }
        self.iter()
            .filter(|requirement| requirement.is_pattern())
            .any(|requirement| requirement.matches(wheel))
    }
}

impl FromIterator<Requirement> for RequirementSet {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        let mut requirements = Self::new();
        requirements.extend(iter);
        requirements
    }
}

impl Extend<Requirement> for RequirementSet {
    fn extend<T: IntoIterator<Item = Requirement>>(&mut self, iter: T) {
        for requirement in iter {
            self.insert(requirement);
        }
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Requirement;
    type IntoIter = indexmap::map::Values<'a, PackageName, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.values()
    }
}
