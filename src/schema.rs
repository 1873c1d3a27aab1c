// Header keys of the upstream shipment template.
//
// The names are exact and case-sensitive. `types::RawRow` uses the same
// strings as serde renames; this module keeps the full list in one place so
// the loader can report which columns a file is missing.

pub const PO_NO: &str = "PO_No";
pub const SEASON: &str = "Season";
pub const STYLE: &str = "Style";
pub const SKU: &str = "SKU";
pub const PRODUCT_TYPE: &str = "Product_Type";
pub const VENDOR: &str = "Vendor";
pub const FACTORY: &str = "Factory";
pub const COUNTRY_ORIGIN: &str = "Country_Origin";
pub const SHIPPING_METHOD: &str = "Shipping_Method";
pub const WAYBILL_NO: &str = "Waybill_No";
pub const ORDER_QTY: &str = "Order_Qty";
pub const UNIT: &str = "Unit";
pub const CURRENCY: &str = "Currency";
pub const RDD: &str = "RDD(N)";
pub const ETD: &str = "ETD";
pub const ETA: &str = "ETA";
pub const ACTUAL_ARRIVAL: &str = "Actual_Arrival";
pub const STATUS: &str = "Status";
pub const DELAY_DAYS: &str = "Delay_Days";
pub const ON_TIME: &str = "On_Time(YesNo)";
pub const T_ARRIVAL_POSSIBLE: &str = "T_Arrival_Possible";
pub const U_MAIN_SUPPLY_OR_REWORK: &str = "U_Main_Supply_or_Rework(O/X)";
pub const V_SUBSTITUTE_MATERIAL_MEMO: &str = "V_Substitute_Material_Memo";
pub const W_CN_DIRECT_SHIP_DATE: &str = "W_CN_Direct_Ship_Date";
pub const X_CN_DIRECT_WAYBILL: &str = "X_CN_Direct_Waybill";
pub const SMS_ARRIVAL_DATE: &str = "SMS_Arrival_Date";
pub const NOTES: &str = "Notes";

/// Filter value meaning "do not filter on this field".
pub const SENTINEL_ALL: &str = "ALL";

/// Normalized status value for delivered shipments.
pub const STATUS_ARRIVED: &str = "arrived";
/// Normalized status value for shipments still moving.
pub const STATUS_IN_TRANSIT: &str = "in-transit";
/// Normalized on-time flag meaning "on time".
pub const ON_TIME_YES: &str = "yes";

/// Every recognized header, in template order.
pub const RECOGNIZED_FIELDS: [&str; 27] = [
    PO_NO,
    SEASON,
    STYLE,
    SKU,
    PRODUCT_TYPE,
    VENDOR,
    FACTORY,
    COUNTRY_ORIGIN,
    SHIPPING_METHOD,
    WAYBILL_NO,
    ORDER_QTY,
    UNIT,
    CURRENCY,
    RDD,
    ETD,
    ETA,
    ACTUAL_ARRIVAL,
    STATUS,
    DELAY_DAYS,
    ON_TIME,
    T_ARRIVAL_POSSIBLE,
    U_MAIN_SUPPLY_OR_REWORK,
    V_SUBSTITUTE_MATERIAL_MEMO,
    W_CN_DIRECT_SHIP_DATE,
    X_CN_DIRECT_WAYBILL,
    SMS_ARRIVAL_DATE,
    NOTES,
];

/// Recognized headers that do not appear in `headers`.
///
/// Only used for diagnostics. A file with missing columns still loads and the
/// absent fields default to empty.
pub fn missing_fields<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    RECOGNIZED_FIELDS
        .iter()
        .copied()
        .filter(|f| !present.contains(f))
        .collect()
}
