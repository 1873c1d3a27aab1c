// Entry point and interactive menu.
//
// - Option [1] loads the CSV and prints load diagnostics.
// - Option [2] edits the vendor/origin/season/search filters.
// - Option [3] prints KPIs, vendor/origin/ETA-day on-time rates, and a preview
//   of the filtered rows.
// - Option [4] exports the filtered rows (CSV) and the dashboard (JSON).
use once_cell::sync::Lazy;
use shipment_dashboard::filter::FilterOptions;
use shipment_dashboard::{
    build_dashboard, group, load_rows, output, util, AppConfig, DashboardView, FilterCriteria,
    Selection, ShipmentRow,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

// Loaded rows and the current criteria survive across menu iterations so the
// file is parsed once but the dashboard can be rebuilt many times.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState::default()));

#[derive(Default)]
struct AppState {
    data: Option<Vec<ShipmentRow>>,
    criteria: FilterCriteria,
}

fn state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn handle_load(path: &Path) {
    match load_rows(path) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows read, {} loaded)",
                util::format_int(report.total_rows),
                util::format_int(report.loaded_rows)
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse errors.",
                    util::format_int(report.parse_errors)
                );
            }
            if report.unparsable_eta > 0 || report.non_numeric_delay > 0 {
                println!(
                    "Note: {} unparsable ETA values, {} non-numeric delays (treated as missing / 0).",
                    util::format_int(report.unparsable_eta),
                    util::format_int(report.non_numeric_delay)
                );
            }
            if !report.missing_fields.is_empty() {
                println!("Missing columns: {}", report.missing_fields.join(", "));
            }
            println!();
            let mut st = state();
            st.data = Some(data);
            st.criteria = FilterCriteria::default();
        }
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn ask_selection(name: &str, options: &[String], current: &Selection) -> Selection {
    println!("{} options: ALL, {}", name, options.join(", "));
    let answer = prompt(&format!("{} [{}]: ", name, current));
    if answer.is_empty() {
        current.clone()
    } else {
        Selection::from(answer.as_str())
    }
}

fn handle_filters() {
    let (options, current) = {
        let st = state();
        let Some(data) = st.data.as_ref() else {
            println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
            return;
        };
        (FilterOptions::from_rows(data), st.criteria.clone())
    };

    let vendor = ask_selection("Vendor", &options.vendors, &current.vendor);
    let origin = ask_selection("Origin", &options.origins, &current.origin);
    let season = ask_selection("Season", &options.seasons, &current.season);
    let search_text = prompt(&format!(
        "Search PO/SKU/Style/Waybill/Notes [{}] (\"-\" clears): ",
        current.search_text
    ));
    let search_text = match search_text.as_str() {
        "" => current.search_text,
        "-" => String::new(),
        _ => search_text,
    };

    let criteria = FilterCriteria {
        vendor,
        origin,
        season,
        search_text,
    };
    info!(?criteria, "filters updated");
    state().criteria = criteria;
    println!();
}

/// Build the dashboard for the current criteria without copying the loaded
/// rows out of the state.
fn current_view() -> Option<DashboardView> {
    let st = state();
    let Some(data) = st.data.as_ref() else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return None;
    };
    Some(build_dashboard(data, &st.criteria))
}

fn handle_show(cfg: &AppConfig) {
    let Some(view) = current_view() else {
        return;
    };
    let criteria = &view.criteria;
    println!(
        "Filters: Vendor={} Origin={} Season={} Search=\"{}\"\n",
        criteria.vendor, criteria.origin, criteria.season, criteria.search_text
    );

    println!("Summary KPIs\n");
    output::preview_table_rows(&output::kpi_table(&view.kpis), 1);

    println!("On-Time Rate by Vendor\n");
    let vendor_tallies = group::tally_by_category(&view.rows, |r| Some(r.vendor.as_str()));
    let vendor_rows = output::group_table(&view.vendor_series, &vendor_tallies);
    output::preview_table_rows(&vendor_rows, vendor_rows.len());

    println!("On-Time Rate by Origin\n");
    let origin_tallies =
        group::tally_by_category(&view.rows, |r| Some(r.country_origin.as_str()));
    let origin_rows = output::group_table(&view.origin_series, &origin_tallies);
    output::preview_table_rows(&origin_rows, origin_rows.len());

    println!("On-Time Rate by ETA Day\n");
    let day_tallies = group::tally_by_eta_day(&view.rows);
    let day_rows = output::group_table(&view.eta_series, &day_tallies);
    output::preview_table_rows(&day_rows, day_rows.len());

    println!(
        "Shipments (first {} of {})\n",
        cfg.preview_rows.min(view.rows.len()),
        util::format_int(view.rows.len())
    );
    output::preview_table_rows(&output::shipment_table(&view.rows), cfg.preview_rows);
}

fn handle_export(cfg: &AppConfig) {
    let Some(view) = current_view() else {
        return;
    };
    let rows_file = cfg.output_dir.join("filtered_shipments.csv");
    let view_file = cfg.output_dir.join("dashboard.json");
    let written = output::write_csv(&rows_file, &view.rows)
        .and_then(|_| output::write_json(&view_file, &view));
    if let Err(e) = written {
        error!(error = %e, "export failed");
        eprintln!("Write error: {}\n", e);
        return;
    }
    info!(rows = view.rows.len(), "exported dashboard");
    println!(
        "Exported {} rows to {} and the dashboard to {}\n",
        util::format_int(view.rows.len()),
        rows_file.display(),
        view_file.display()
    );
}

fn main() {
    let mut cfg = AppConfig::from_env();
    if let Some(arg) = std::env::args().nth(1) {
        cfg.csv_path = PathBuf::from(arg);
    }

    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_max_level(cfg.tracing_level())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    info!(?cfg, "starting shipment dashboard");

    loop {
        println!("Shipment Dashboard ({})", cfg.csv_path.display());
        println!("[1] Load the file");
        println!("[2] Set filters");
        println!("[3] Show dashboard");
        println!("[4] Export filtered rows");
        println!("[5] Exit\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&cfg.csv_path),
            "2" => handle_filters(),
            "3" => handle_show(&cfg),
            "4" => handle_export(&cfg),
            "5" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
}
