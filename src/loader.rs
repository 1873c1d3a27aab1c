use crate::schema;
use crate::types::{RawRow, ShipmentRow};
use crate::util::{parse_date_safe, parse_f64_safe};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read CSV header: {0}")]
    Header(#[from] csv::Error),
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub missing_fields: Vec<String>,
    pub unparsable_eta: usize,
    pub non_numeric_delay: usize,
}

pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<(Vec<ShipmentRow>, LoadReport), LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "loading shipments");
    load_from_reader(file)
}

/// Read shipment rows from any CSV source with a header line.
///
/// Blank lines are skipped and records may be shorter or longer than the
/// header. A record that cannot be deserialized is counted and dropped; the
/// only hard failure is an unreadable header.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<ShipmentRow>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing = schema::missing_fields(headers.iter());
    if !missing.is_empty() {
        warn!(missing = ?missing, "CSV header lacks recognized columns; they default to empty");
    }

    let mut report = LoadReport {
        missing_fields: missing.iter().map(|s| s.to_string()).collect(),
        ..LoadReport::default()
    };
    let mut rows = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        report.total_rows += 1;
        let raw = match result {
            Ok(r) => r,
            Err(e) => {
                // header is line 1
                debug!(line = idx + 2, error = %e, "skipping record");
                report.parse_errors += 1;
                continue;
            }
        };

        if raw.eta.as_deref().is_some_and(|s| !s.trim().is_empty())
            && parse_date_safe(raw.eta.as_deref()).is_none()
        {
            report.unparsable_eta += 1;
        }
        if raw.delay_days.as_deref().is_some_and(|s| !s.trim().is_empty())
            && parse_f64_safe(raw.delay_days.as_deref()).is_none()
        {
            report.non_numeric_delay += 1;
        }

        rows.push(ShipmentRow::from(raw));
    }

    report.loaded_rows = rows.len();
    info!(
        total = report.total_rows,
        loaded = report.loaded_rows,
        parse_errors = report.parse_errors,
        unparsable_eta = report.unparsable_eta,
        non_numeric_delay = report.non_numeric_delay,
        "shipments loaded"
    );
    Ok((rows, report))
}
