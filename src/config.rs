use std::path::PathBuf;

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("shipments.csv"),
            output_dir: PathBuf::from("."),
            preview_rows: 10,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// `SHIPMENT_CSV`, `DASHBOARD_OUTPUT_DIR`, `DASHBOARD_PREVIEW_ROWS` and
    /// `DASHBOARD_LOG`; unset or invalid values keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            csv_path: lookup("SHIPMENT_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            output_dir: lookup("DASHBOARD_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            preview_rows: lookup("DASHBOARD_PREVIEW_ROWS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.preview_rows),
            log_level: lookup("DASHBOARD_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Max level for the log subscriber. Unknown names fall back to INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.trim().parse().unwrap_or(tracing::Level::INFO)
    }
}
