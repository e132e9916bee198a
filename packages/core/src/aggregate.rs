use std::collections::BTreeMap;

use serde::Serialize;

/// One active score row as read from the store: the owning department's
/// display name and the mark awarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentMark {
    pub department: String,
    pub mark: u32,
}

impl DepartmentMark {
    pub fn new(department: impl Into<String>, mark: u32) -> Self {
        Self {
            department: department.into(),
            mark,
        }
    }
}

/// Summed marks per department name within a single category.
///
/// Only departments with at least one contributing row are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    totals: BTreeMap<String, u64>,
}

/// A row of a per-category point table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct CategoryPoints {
    /// Department display name.
    #[schema(example = "Computer Science")]
    pub department: String,
    /// Sum of marks for this department in the category.
    #[schema(example = 40)]
    pub marks: u64,
}

impl CategoryAggregate {
    pub fn get(&self, department: &str) -> Option<u64> {
        self.totals.get(department).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Department names in ascending order.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(name, sum)| (name.as_str(), *sum))
    }

    /// Point table for this category: marks descending, ties by name ascending.
    pub fn ranked(&self) -> Vec<CategoryPoints> {
        let mut rows: Vec<CategoryPoints> = self
            .iter()
            .map(|(department, marks)| CategoryPoints {
                department: department.to_string(),
                marks,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.marks
                .cmp(&a.marks)
                .then_with(|| a.department.cmp(&b.department))
        });
        rows
    }
}

impl FromIterator<(String, u64)> for CategoryAggregate {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut totals = BTreeMap::new();
        for (department, sum) in iter {
            *totals.entry(department).or_insert(0) += sum;
        }
        Self { totals }
    }
}

/// Sum marks per department.
pub fn aggregate<I>(records: I) -> CategoryAggregate
where
    I: IntoIterator<Item = DepartmentMark>,
{
    records
        .into_iter()
        .map(|r| (r.department, u64::from(r.mark)))
        .collect()
}
