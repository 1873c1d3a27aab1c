// On-time rate grouped by a key.
//
// Every grouping has the same shape: walk the rows once, accumulate a
// `GroupTally` per key in an insertion-ordered map, then turn each tally into
// a rate. Rows without a key never reach the map. A key with rows but no
// arrivals stays in the output with rate 0.
use crate::types::{SeriesResult, ShipmentRow};
use crate::util::rate_percent;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub total: usize,
    pub arrived: usize,
    pub on_time_arrived: usize,
}

impl GroupTally {
    fn add(&mut self, row: &ShipmentRow) {
        self.total += 1;
        if row.is_arrived() {
            self.arrived += 1;
            if row.is_on_time() {
                self.on_time_arrived += 1;
            }
        }
    }

    pub fn rate(&self) -> f64 {
        rate_percent(self.on_time_arrived, self.arrived)
    }
}

/// Labels in first-seen order.
pub type Tallies = IndexMap<String, GroupTally>;

/// Tally rows by `key_fn`. `None` and blank keys are skipped.
pub fn tally_by_category<F>(rows: &[ShipmentRow], key_fn: F) -> Tallies
where
    F: Fn(&ShipmentRow) -> Option<&str>,
{
    let mut map = Tallies::new();
    for r in rows {
        let Some(key) = key_fn(r).map(str::trim).filter(|k| !k.is_empty()) else {
            continue;
        };
        match map.get_mut(key) {
            Some(t) => t.add(r),
            None => {
                let mut t = GroupTally::default();
                t.add(r);
                map.insert(key.to_string(), t);
            }
        }
    }
    map
}

/// Tally rows by ETA day, labels sorted ascending. Rows without a parsable
/// ETA are skipped.
pub fn tally_by_eta_day(rows: &[ShipmentRow]) -> Tallies {
    let mut map = Tallies::new();
    for r in rows {
        if let Some(day) = r.eta_day_key() {
            map.entry(day).or_default().add(r);
        }
    }
    map.sort_keys();
    map
}

pub fn to_series(tallies: &Tallies) -> SeriesResult {
    let (labels, values) = tallies
        .iter()
        .map(|(k, t)| (k.clone(), t.rate()))
        .unzip();
    SeriesResult { labels, values }
}

pub fn by_category<F>(rows: &[ShipmentRow], key_fn: F) -> SeriesResult
where
    F: Fn(&ShipmentRow) -> Option<&str>,
{
    to_series(&tally_by_category(rows, key_fn))
}

pub fn by_vendor(rows: &[ShipmentRow]) -> SeriesResult {
    by_category(rows, |r| Some(r.vendor.as_str()))
}

pub fn by_origin(rows: &[ShipmentRow]) -> SeriesResult {
    by_category(rows, |r| Some(r.country_origin.as_str()))
}

pub fn by_eta_day(rows: &[ShipmentRow]) -> SeriesResult {
    to_series(&tally_by_eta_day(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(vendor: &str, status: &str, on_time: &str) -> ShipmentRow {
        ShipmentRow {
            vendor: vendor.into(),
            status: status.into(),
            on_time: on_time.into(),
            ..ShipmentRow::default()
        }
    }

    fn dated(day: Option<(i32, u32, u32)>, status: &str, on_time: &str) -> ShipmentRow {
        ShipmentRow {
            eta_day: day.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            status: status.into(),
            on_time: on_time.into(),
            ..ShipmentRow::default()
        }
    }

    #[test]
    fn vendor_series_skips_empty_vendor() {
        let rows = vec![
            row("A", "Arrived", "Yes"),
            row("A", "Arrived", "No"),
            row("", "Arrived", "Yes"),
        ];
        let s = by_vendor(&rows);
        assert_eq!(s.labels, vec!["A"]);
        assert_eq!(s.values, vec![50.0]);
    }

    #[test]
    fn labels_keep_first_seen_order() {
        let rows = vec![
            row("Zeta", "Arrived", "Yes"),
            row("Alpha", "Arrived", "No"),
            row("Zeta", "Arrived", "No"),
            row("Mid", "Arrived", "Yes"),
        ];
        let s = by_vendor(&rows);
        assert_eq!(s.labels, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(s.values, vec![50.0, 0.0, 100.0]);
    }

    #[test]
    fn group_without_arrivals_stays_with_zero() {
        let rows = vec![row("A", "In-Transit", "Yes"), row("B", "Arrived", "Yes")];
        let s = by_vendor(&rows);
        assert_eq!(s.labels, vec!["A", "B"]);
        assert_eq!(s.values, vec![0.0, 100.0]);
    }

    #[test]
    fn one_of_three_rounds_to_one_decimal() {
        let rows = vec![
            row("A", "Arrived", "Yes"),
            row("A", "Arrived", "No"),
            row("A", "Arrived", "No"),
        ];
        assert_eq!(by_vendor(&rows).values, vec![33.3]);
    }

    #[test]
    fn tallies_count_all_rows_of_a_group() {
        let rows = vec![
            row("A", "Arrived", "Yes"),
            row("A", "In-Transit", ""),
            row("A", "Arrived", "no"),
        ];
        let t = tally_by_category(&rows, |r| Some(r.vendor.as_str()));
        assert_eq!(
            t["A"],
            GroupTally {
                total: 3,
                arrived: 2,
                on_time_arrived: 1
            }
        );
    }

    #[test]
    fn custom_key_none_is_skipped() {
        let rows = vec![row("A", "Arrived", "Yes"), row("B", "Arrived", "No")];
        let s = by_category(&rows, |r| (r.vendor != "B").then_some(r.vendor.as_str()));
        assert_eq!(s.labels, vec!["A"]);
    }

    #[test]
    fn eta_days_sorted_and_unparsable_excluded() {
        let rows = vec![
            dated(Some((2024, 3, 10)), "Arrived", "Yes"),
            dated(Some((2024, 1, 2)), "Arrived", "No"),
            dated(None, "Arrived", "Yes"),
            dated(Some((2024, 3, 10)), "Arrived", "No"),
            dated(Some((2024, 2, 1)), "In-Transit", ""),
        ];
        let s = by_eta_day(&rows);
        assert_eq!(s.labels, vec!["2024-01-02", "2024-02-01", "2024-03-10"]);
        assert_eq!(s.values, vec![0.0, 0.0, 50.0]);
    }

    #[test]
    fn empty_rows_give_empty_series() {
        assert!(by_vendor(&[]).is_empty());
        assert!(by_eta_day(&[]).is_empty());
    }
}
