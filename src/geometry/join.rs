use crate::geometry::catalog::GeometryCatalog;
use crate::types::district::normalize_district_key;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// District → fill color for one map.
///
/// Keys are normalized with [`normalize_district_key`] on insertion, so a
/// table spelling ("Dera Ghazi Khan") and a geometry key ("Dera_Ghazi_Khan")
/// address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictColorAssignment(BTreeMap<String, String>);

impl DistrictColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, district: &str, color: impl Into<String>) {
        self.0.insert(normalize_district_key(district), color.into());
    }

    pub fn get(&self, district: &str) -> Option<&str> {
        self.0
            .get(&normalize_district_key(district))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<D: AsRef<str>, C: Into<String>> FromIterator<(D, C)> for DistrictColorAssignment {
    fn from_iter<T: IntoIterator<Item = (D, C)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (district, color) in iter {
            assignment.insert(district.as_ref(), color);
        }
        assignment
    }
}

/// Restricts an assignment to districts the catalog can draw. Colors are kept
/// as they are; districts without geometry are dropped.
pub fn join(
    assignment: &DistrictColorAssignment,
    catalog: &GeometryCatalog,
) -> DistrictColorAssignment {
    let mut joined = DistrictColorAssignment::new();
    let mut dropped = Vec::new();
    for (key, color) in assignment.iter() {
        if catalog.contains(key) {
            joined.0.insert(key.to_string(), color.to_string());
        } else {
            dropped.push(key);
        }
    }

    if !dropped.is_empty() {
        warn!(
            "No geometry for {} district(s): {}",
            dropped.len(),
            dropped.join(", ")
        );
    }
    debug!("Joined {} of {} districts", joined.len(), assignment.len());
    joined
}
