//! Shipment dashboard engine.
//!
//! Loads purchase-order shipment rows from CSV, filters them, and derives
//! on-time KPIs plus vendor and ETA-day series. `filter`, `kpi` and `group`
//! are pure functions over row slices; `loader`, `output` and the binary are
//! the edges.
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod group;
pub mod kpi;
pub mod loader;
pub mod output;
pub mod schema;
pub mod types;
pub mod util;

pub use config::AppConfig;
pub use dashboard::{build as build_dashboard, DashboardView};
pub use loader::{load_from_reader, load_rows, LoadError, LoadReport};
pub use types::{FilterCriteria, KpiResult, Selection, SeriesResult, ShipmentRow};
