use crate::types::{FilterCriteria, ShipmentRow};
use crate::util::normalize;
use std::collections::BTreeSet;

/// Keep the rows that pass every active predicate of `criteria`.
///
/// Categorical selections compare exactly (case-sensitive). The search text is
/// normalized and matched as a substring of the row's search haystack; an
/// empty or whitespace-only search matches everything.
pub fn apply(rows: &[ShipmentRow], criteria: &FilterCriteria) -> Vec<ShipmentRow> {
    let needle = normalize(&criteria.search_text);
    rows.iter()
        .filter(|r| criteria.vendor.matches(&r.vendor))
        .filter(|r| criteria.origin.matches(&r.country_origin))
        .filter(|r| criteria.season.matches(&r.season))
        .filter(|r| needle.is_empty() || r.search_haystack().contains(&needle))
        .cloned()
        .collect()
}

/// Sorted, de-duplicated, non-empty values of one field.
pub fn distinct_values<F>(rows: &[ShipmentRow], field: F) -> Vec<String>
where
    F: Fn(&ShipmentRow) -> &str,
{
    let set: BTreeSet<&str> = rows.iter().map(&field).filter(|v| !v.is_empty()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Values offered by the vendor/origin/season selectors.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub vendors: Vec<String>,
    pub origins: Vec<String>,
    pub seasons: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[ShipmentRow]) -> Self {
        Self {
            vendors: distinct_values(rows, |r| r.vendor.as_str()),
            origins: distinct_values(rows, |r| r.country_origin.as_str()),
            seasons: distinct_values(rows, |r| r.season.as_str()),
        }
    }
}
