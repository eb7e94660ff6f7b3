//! Wire types for the schedule RPC.

use serde::{Deserialize, Serialize};

/// Parameters for the schedule RPC function.
///
/// Station names must already be search-normalized; the stored rows carry
/// the marked variant-selector form, so an unnormalized name misses.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleParams {
    pub departure_station: String,
    pub arrival_station: String,
    /// Target calendar date, "YYYY-MM-DD".
    pub target_date: String,
}

/// One timetable row as returned by the RPC.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    /// "HH:MM" or "HH:MM:SS".
    pub departure_time: String,
    pub route_name: String,
    pub destination: String,
    #[serde(default)]
    pub platform: String,
    /// Service/day-type identifier, e.g. "weekday" or "holiday".
    #[serde(default)]
    pub day_type: String,
    /// Intermediate stops in order. Absent for direct services.
    #[serde(default)]
    pub stops: Vec<String>,
}
