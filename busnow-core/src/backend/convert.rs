//! Conversion from wire rows to domain schedule entries.
//!
//! The display-normalization boundary: route, destination, and stop names
//! come out of the database in whatever form they were ingested and are
//! forced onto the canonical glyph form here, before anything downstream
//! sees them.

use crate::domain::{BusTime, ScheduleEntry};
use crate::normalize::VariantTable;

use super::error::BackendError;
use super::types::ScheduleRow;

/// Convert RPC rows into domain entries, preserving row order.
///
/// A row whose departure time does not parse poisons the whole response:
/// the timetable is only useful if it can be ordered.
pub fn convert_rows(
    rows: &[ScheduleRow],
    table: &VariantTable,
) -> Result<Vec<ScheduleEntry>, BackendError> {
    rows.iter().map(|row| convert_row(row, table)).collect()
}

fn convert_row(row: &ScheduleRow, table: &VariantTable) -> Result<ScheduleEntry, BackendError> {
    let departure_time = BusTime::parse(&row.departure_time).map_err(|e| {
        BackendError::InvalidData(format!(
            "bad departure_time {:?}: {e}",
            row.departure_time
        ))
    })?;

    let stops = row
        .stops
        .iter()
        .map(|s| table.normalize_for_display(s))
        .collect();

    Ok(ScheduleEntry::new(
        departure_time,
        table.normalize_for_display(&row.route_name),
        table.normalize_for_display(&row.destination),
        row.platform.clone(),
        row.day_type.clone(),
        stops,
    ))
}
