use crate::types::{FilterCriteria, KpiResult, SeriesResult, ShipmentRow};
use crate::{filter, group, kpi};
use serde::Serialize;
use tracing::debug;

/// Everything the presentation layer needs for one set of criteria.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub kpis: KpiResult,
    pub vendor_series: SeriesResult,
    pub origin_series: SeriesResult,
    pub eta_series: SeriesResult,
    #[serde(skip)]
    pub rows: Vec<ShipmentRow>,
}

/// Filter once, then derive KPIs and series from the filtered rows.
///
/// Nothing is cached; callers rebuild the view whenever rows or criteria
/// change.
pub fn build(rows: &[ShipmentRow], criteria: &FilterCriteria) -> DashboardView {
    let filtered = filter::apply(rows, criteria);
    debug!(input = rows.len(), kept = filtered.len(), "filter applied");
    DashboardView {
        criteria: criteria.clone(),
        kpis: kpi::compute(&filtered),
        vendor_series: group::by_vendor(&filtered),
        origin_series: group::by_origin(&filtered),
        eta_series: group::by_eta_day(&filtered),
        rows: filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Selection;

    fn row(vendor: &str, status: &str, on_time: &str) -> ShipmentRow {
        ShipmentRow {
            vendor: vendor.into(),
            status: status.into(),
            on_time: on_time.into(),
            ..ShipmentRow::default()
        }
    }

    #[test]
    fn kpis_cover_rows_without_group_key() {
        let rows = vec![
            row("A", "Arrived", "Yes"),
            row("", "Arrived", "No"),
        ];
        let view = build(&rows, &FilterCriteria::default());
        assert_eq!(view.kpis.arrived_count, 2);
        assert_eq!(view.kpis.on_time_rate_percent, 50.0);
        assert_eq!(view.vendor_series.labels, vec!["A"]);
        assert_eq!(view.vendor_series.values, vec![100.0]);
        assert!(view.eta_series.is_empty());
    }

    #[test]
    fn everything_is_derived_from_filtered_rows() {
        let rows = vec![row("A", "Arrived", "Yes"), row("B", "Arrived", "No")];
        let criteria = FilterCriteria {
            vendor: Selection::from("B"),
            ..FilterCriteria::default()
        };
        let view = build(&rows, &criteria);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.kpis.total_count, 1);
        assert_eq!(view.kpis.on_time_rate_percent, 0.0);
        assert_eq!(view.vendor_series.labels, vec!["B"]);
    }

    #[test]
    fn serializes_criteria_with_sentinel() {
        let view = build(&[], &FilterCriteria::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["criteria"]["vendor"], "ALL");
        assert_eq!(json["kpis"]["total_count"], 0);
        assert!(json.get("rows").is_none());
    }
}
