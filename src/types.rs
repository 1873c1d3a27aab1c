use crate::schema::{self, ON_TIME_YES, STATUS_ARRIVED, STATUS_IN_TRANSIT};
use crate::util::{normalize, parse_date_safe, parse_f64_safe};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV record exactly as the parser hands it over. Every column is
/// optional so short or partial files still deserialize.
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "PO_No")]
    pub po_no: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<String>,
    #[serde(rename = "Style")]
    pub style: Option<String>,
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    #[serde(rename = "Product_Type")]
    pub product_type: Option<String>,
    #[serde(rename = "Vendor")]
    pub vendor: Option<String>,
    #[serde(rename = "Factory")]
    pub factory: Option<String>,
    #[serde(rename = "Country_Origin")]
    pub country_origin: Option<String>,
    #[serde(rename = "Shipping_Method")]
    pub shipping_method: Option<String>,
    #[serde(rename = "Waybill_No")]
    pub waybill_no: Option<String>,
    #[serde(rename = "Order_Qty")]
    pub order_qty: Option<String>,
    #[serde(rename = "Unit")]
    pub unit: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "RDD(N)")]
    pub rdd: Option<String>,
    #[serde(rename = "ETD")]
    pub etd: Option<String>,
    #[serde(rename = "ETA")]
    pub eta: Option<String>,
    #[serde(rename = "Actual_Arrival")]
    pub actual_arrival: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Delay_Days")]
    pub delay_days: Option<String>,
    #[serde(rename = "On_Time(YesNo)")]
    pub on_time: Option<String>,
    #[serde(rename = "T_Arrival_Possible")]
    pub t_arrival_possible: Option<String>,
    #[serde(rename = "U_Main_Supply_or_Rework(O/X)")]
    pub u_main_supply_or_rework: Option<String>,
    #[serde(rename = "V_Substitute_Material_Memo")]
    pub v_substitute_material_memo: Option<String>,
    #[serde(rename = "W_CN_Direct_Ship_Date")]
    pub w_cn_direct_ship_date: Option<String>,
    #[serde(rename = "X_CN_Direct_Waybill")]
    pub x_cn_direct_waybill: Option<String>,
    #[serde(rename = "SMS_Arrival_Date")]
    pub sms_arrival_date: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

/// A typed shipment line. Built once at ingestion and never mutated.
///
/// String fields keep the file's text (trimmed, missing -> empty), so an
/// export writes back what was read. The two values the engine computes on
/// are coerced next to their text: `delay_value` falls back to 0 and
/// `eta_day` is `None` when the ETA is missing or unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipmentRow {
    #[serde(rename = "PO_No")]
    pub po_no: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Style")]
    pub style: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Product_Type")]
    pub product_type: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Factory")]
    pub factory: String,
    #[serde(rename = "Country_Origin")]
    pub country_origin: String,
    #[serde(rename = "Shipping_Method")]
    pub shipping_method: String,
    #[serde(rename = "Waybill_No")]
    pub waybill_no: String,
    #[serde(rename = "Order_Qty")]
    pub order_qty: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "RDD(N)")]
    pub rdd: String,
    #[serde(rename = "ETD")]
    pub etd: String,
    #[serde(rename = "ETA")]
    pub eta: String,
    #[serde(rename = "Actual_Arrival")]
    pub actual_arrival: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Delay_Days")]
    pub delay_days: String,
    #[serde(rename = "On_Time(YesNo)")]
    pub on_time: String,
    #[serde(rename = "T_Arrival_Possible")]
    pub t_arrival_possible: String,
    #[serde(rename = "U_Main_Supply_or_Rework(O/X)")]
    pub u_main_supply_or_rework: String,
    #[serde(rename = "V_Substitute_Material_Memo")]
    pub v_substitute_material_memo: String,
    #[serde(rename = "W_CN_Direct_Ship_Date")]
    pub w_cn_direct_ship_date: String,
    #[serde(rename = "X_CN_Direct_Waybill")]
    pub x_cn_direct_waybill: String,
    #[serde(rename = "SMS_Arrival_Date")]
    pub sms_arrival_date: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(skip)]
    pub delay_value: f64,
    #[serde(skip)]
    pub eta_day: Option<NaiveDate>,
}

fn text(v: Option<String>) -> String {
    v.map(|s| s.trim().to_string()).unwrap_or_default()
}

impl From<RawRow> for ShipmentRow {
    fn from(raw: RawRow) -> Self {
        let delay_value = parse_f64_safe(raw.delay_days.as_deref()).unwrap_or(0.0);
        let eta_day = parse_date_safe(raw.eta.as_deref());
        ShipmentRow {
            po_no: text(raw.po_no),
            season: text(raw.season),
            style: text(raw.style),
            sku: text(raw.sku),
            product_type: text(raw.product_type),
            vendor: text(raw.vendor),
            factory: text(raw.factory),
            country_origin: text(raw.country_origin),
            shipping_method: text(raw.shipping_method),
            waybill_no: text(raw.waybill_no),
            order_qty: text(raw.order_qty),
            unit: text(raw.unit),
            currency: text(raw.currency),
            rdd: text(raw.rdd),
            etd: text(raw.etd),
            eta: text(raw.eta),
            actual_arrival: text(raw.actual_arrival),
            status: text(raw.status),
            delay_days: text(raw.delay_days),
            on_time: text(raw.on_time),
            t_arrival_possible: text(raw.t_arrival_possible),
            u_main_supply_or_rework: text(raw.u_main_supply_or_rework),
            v_substitute_material_memo: text(raw.v_substitute_material_memo),
            w_cn_direct_ship_date: text(raw.w_cn_direct_ship_date),
            x_cn_direct_waybill: text(raw.x_cn_direct_waybill),
            sms_arrival_date: text(raw.sms_arrival_date),
            notes: text(raw.notes),
            delay_value,
            eta_day,
        }
    }
}

impl ShipmentRow {
    pub fn is_arrived(&self) -> bool {
        normalize(&self.status) == STATUS_ARRIVED
    }

    pub fn is_in_transit(&self) -> bool {
        normalize(&self.status) == STATUS_IN_TRANSIT
    }

    pub fn is_on_time(&self) -> bool {
        normalize(&self.on_time) == ON_TIME_YES
    }

    /// Lower-cased `PO_No SKU Style Waybill_No Notes`, space-joined, for the
    /// free-text filter.
    pub fn search_haystack(&self) -> String {
        [
            self.po_no.as_str(),
            self.sku.as_str(),
            self.style.as_str(),
            self.waybill_no.as_str(),
            self.notes.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// ETA as a `YYYY-MM-DD` day key.
    pub fn eta_day_key(&self) -> Option<String> {
        self.eta_day.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// One categorical filter: either the "ALL" sentinel or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == schema::SENTINEL_ALL {
            Selection::All
        } else {
            Selection::Only(s.to_string())
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => f.write_str(schema::SENTINEL_ALL),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub vendor: Selection,
    pub origin: Selection,
    pub season: Selection,
    pub search_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiResult {
    pub on_time_rate_percent: f64,
    pub avg_delay_days: f64,
    pub total_count: usize,
    pub arrived_count: usize,
    pub in_transit_count: usize,
}

/// Index-aligned chart series: `labels[i]` belongs to `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesResult {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[derive(Debug, Tabled, Clone)]
pub struct KpiTableRow {
    #[tabled(rename = "OnTimeRate%")]
    pub on_time_rate: String,
    #[tabled(rename = "AvgDelayDays")]
    pub avg_delay: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Arrived")]
    pub arrived: String,
    #[tabled(rename = "InTransit")]
    pub in_transit: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct GroupTableRow {
    #[tabled(rename = "Group")]
    pub label: String,
    #[tabled(rename = "Rows")]
    pub total: String,
    #[tabled(rename = "Arrived")]
    pub arrived: String,
    #[tabled(rename = "OnTime")]
    pub on_time: String,
    #[tabled(rename = "OnTimeRate%")]
    pub rate: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct ShipmentTableRow {
    #[tabled(rename = "PO_No")]
    pub po_no: String,
    #[tabled(rename = "Vendor")]
    pub vendor: String,
    #[tabled(rename = "Origin")]
    pub origin: String,
    #[tabled(rename = "Season")]
    pub season: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "ETA")]
    pub eta: String,
    #[tabled(rename = "DelayDays")]
    pub delay_days: String,
    #[tabled(rename = "OnTime")]
    pub on_time: String,
}
