//! The closed set of measure names a caller may ask for.

use std::collections::HashSet;

/// Every measure the service answers for, spelled exactly as stored.
pub const MEASURE_NAMES: [&str; 12] = [
    "Violent crime rate",
    "Unemployment",
    "Children in poverty",
    "Diabetic screening",
    "Mammography screening",
    "Preventable hospital stays",
    "Uninsured",
    "Sexually transmitted infections",
    "Physical inactivity",
    "Adult obesity",
    "Premature Death",
    "Daily fine particulate matter",
];

/// Immutable membership set built once at startup.
///
/// Matching is exact and case-sensitive: `"adult obesity"` is not a member.
#[derive(Debug, Clone)]
pub struct MeasureCatalog {
    names: HashSet<&'static str>,
}

impl MeasureCatalog {
    /// Catalog of the twelve published measures.
    pub fn standard() -> Self {
        Self {
            names: MEASURE_NAMES.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MeasureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
