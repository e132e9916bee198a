use std::collections::BTreeSet;

use serde::Serialize;

use crate::aggregate::CategoryAggregate;

pub const DEFAULT_ARTS_COLOR: &str = "#7f1d1d";
pub const DEFAULT_SPORTS_COLOR: &str = "#991b1b";

/// Color tags handed out to merged standings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Used for every department with at least one arts score.
    pub arts: String,
    /// Used for departments that only have sports scores.
    pub sports: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            arts: DEFAULT_ARTS_COLOR.into(),
            sports: DEFAULT_SPORTS_COLOR.into(),
        }
    }
}

/// A department's combined arts and sports result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentStanding {
    pub name: String,
    pub short_name: String,
    pub arts_points: u64,
    pub sports_points: u64,
    /// Always `arts_points + sports_points`.
    pub total_points: u64,
    pub color: String,
}

impl DepartmentStanding {
    fn new(name: &str, arts_points: u64, sports_points: u64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name(name),
            arts_points,
            sports_points,
            total_points: arts_points + sports_points,
            color: color.to_string(),
        }
    }
}

/// First two characters of the department name, uppercased.
pub fn short_name(name: &str) -> String {
    name.trim().chars().take(2).flat_map(char::to_uppercase).collect()
}

/// Join the two category aggregates on department name.
///
/// Every department present in either aggregate yields exactly one standing;
/// a missing side counts as zero.
pub fn merge(
    arts: &CategoryAggregate,
    sports: &CategoryAggregate,
    palette: &Palette,
) -> Vec<DepartmentStanding> {
    let names: BTreeSet<&str> = arts.departments().chain(sports.departments()).collect();

    names
        .into_iter()
        .map(|name| {
            let arts_points = arts.get(name);
            let sports_points = sports.get(name).unwrap_or(0);
            let color = if arts_points.is_some() {
                &palette.arts
            } else {
                &palette.sports
            };
            DepartmentStanding::new(name, arts_points.unwrap_or(0), sports_points, color)
        })
        .collect()
}
