use crate::types::{KpiResult, ShipmentRow};
use crate::util::{average, rate_percent, round_to};

/// Scalar summary over `rows`.
///
/// Rate and average delay are taken over arrived rows only and are 0 when
/// nothing has arrived. Counts cover every row.
pub fn compute(rows: &[ShipmentRow]) -> KpiResult {
    let arrived: Vec<&ShipmentRow> = rows.iter().filter(|r| r.is_arrived()).collect();
    let in_transit_count = rows.iter().filter(|r| r.is_in_transit()).count();
    let on_time = arrived.iter().filter(|r| r.is_on_time()).count();
    let delays: Vec<f64> = arrived.iter().map(|r| r.delay_value).collect();

    KpiResult {
        on_time_rate_percent: rate_percent(on_time, arrived.len()),
        avg_delay_days: round_to(average(&delays), 2),
        total_count: rows.len(),
        arrived_count: arrived.len(),
        in_transit_count,
    }
}
