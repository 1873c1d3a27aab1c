use crate::group::Tallies;
use crate::types::{
    GroupTableRow, KpiResult, KpiTableRow, SeriesResult, ShipmentRow, ShipmentTableRow,
};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    println!("{}\n", render_table(slice));
}

pub fn kpi_table(k: &KpiResult) -> Vec<KpiTableRow> {
    vec![KpiTableRow {
        on_time_rate: format_number(k.on_time_rate_percent, 1),
        avg_delay: format_number(k.avg_delay_days, 2),
        total: format_int(k.total_count),
        arrived: format_int(k.arrived_count),
        in_transit: format_int(k.in_transit_count),
    }]
}

/// Counts next to rates. Falls back to the bare series when a label has no
/// tally.
pub fn group_table(series: &SeriesResult, tallies: &Tallies) -> Vec<GroupTableRow> {
    series
        .points()
        .map(|(label, rate)| {
            let t = tallies.get(label).copied().unwrap_or_default();
            GroupTableRow {
                label: label.to_string(),
                total: format_int(t.total),
                arrived: format_int(t.arrived),
                on_time: format_int(t.on_time_arrived),
                rate: format_number(rate, 1),
            }
        })
        .collect()
}

pub fn shipment_table(rows: &[ShipmentRow]) -> Vec<ShipmentTableRow> {
    rows.iter()
        .map(|r| ShipmentTableRow {
            po_no: r.po_no.clone(),
            vendor: r.vendor.clone(),
            origin: r.country_origin.clone(),
            season: r.season.clone(),
            status: r.status.clone(),
            eta: r.eta.clone(),
            delay_days: r.delay_days.clone(),
            on_time: r.on_time.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group;

    fn row(vendor: &str, status: &str, on_time: &str) -> ShipmentRow {
        ShipmentRow {
            vendor: vendor.into(),
            status: status.into(),
            on_time: on_time.into(),
            ..ShipmentRow::default()
        }
    }

    #[test]
    fn kpi_table_formats_numbers() {
        let k = KpiResult {
            on_time_rate_percent: 50.0,
            avg_delay_days: 2.5,
            total_count: 1200,
            arrived_count: 2,
            in_transit_count: 1,
        };
        let t = kpi_table(&k);
        assert_eq!(t[0].on_time_rate, "50.0");
        assert_eq!(t[0].avg_delay, "2.50");
        assert_eq!(t[0].total, "1,200");
    }

    #[test]
    fn group_table_joins_counts() {
        let rows = vec![row("A", "Arrived", "Yes"), row("A", "In-Transit", "")];
        let tallies = group::tally_by_category(&rows, |r| Some(r.vendor.as_str()));
        let series = group::to_series(&tallies);
        let t = group_table(&series, &tallies);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].total, "2");
        assert_eq!(t[0].arrived, "1");
        assert_eq!(t[0].rate, "100.0");
    }

    #[test]
    fn origin_table_matches_dashboard_series() {
        let mut rows = vec![row("A", "Arrived", "Yes"), row("B", "Arrived", "No")];
        rows[0].country_origin = "VN".into();
        rows[1].country_origin = "CN".into();
        let view = crate::dashboard::build(&rows, &Default::default());
        let tallies = group::tally_by_category(&view.rows, |r| Some(r.country_origin.as_str()));
        let t = group_table(&view.origin_series, &tallies);
        let labels: Vec<&str> = t.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["VN", "CN"]);
        assert_eq!(t[1].arrived, "1");
        assert_eq!(t[1].rate, "0.0");
    }

    #[test]
    fn empty_table_renders_placeholder() {
        assert_eq!(render_table(Vec::<KpiTableRow>::new()), "(no rows)");
        let rendered = render_table(shipment_table(&[row("A", "Arrived", "Yes")]));
        assert!(rendered.contains("| A "));
    }

    #[test]
    fn exports_filtered_rows_with_template_headers() {
        let dir = std::env::temp_dir().join(format!("shipment_dashboard_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.csv");
        let mut r = row("Acme", "Arrived", "Yes");
        r.delay_days = "n/a".into();
        write_csv(&path, &[r]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert!(text.contains(",Arrived,n/a,Yes,"));
        assert!(header.starts_with("PO_No,Season,Style,SKU"));
        assert!(header.contains("On_Time(YesNo)"));
        assert!(!header.contains("eta_day"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
