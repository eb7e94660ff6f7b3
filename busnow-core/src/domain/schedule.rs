//! Schedule entries and query dimensions.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::time::BusTime;

/// Which timetable variant a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday timetable.
    Weekday,
    /// Saturday/Sunday/holiday timetable.
    Holiday,
}

impl DayType {
    /// The day type a calendar date falls under.
    ///
    /// Public holidays landing on a weekday are not consulted here; the
    /// holiday calendar lives on the backend.
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Holiday,
            _ => DayType::Weekday,
        }
    }

    /// Whether `date` falls under this day type.
    pub fn matches(&self, date: NaiveDate) -> bool {
        DayType::of(date) == *self
    }

    /// The tab label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "平日",
            DayType::Holiday => "土日祝",
        }
    }
}

/// Query orientation relative to the submitted station pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The pair as submitted.
    Outbound,
    /// Departure and arrival exchanged.
    Inbound,
}

impl Direction {
    /// The tab label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Outbound => "行き",
            Direction::Inbound => "帰り",
        }
    }
}

/// One scheduled departure, already display-normalized.
///
/// Entries arrive from the backend in timetable order; the engine scans
/// them in stored order when deriving the next-bus pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Departure time at minute granularity.
    pub departure_time: BusTime,
    /// Route label, e.g. a line number.
    pub route: String,
    /// Destination shown on the vehicle.
    pub destination: String,
    /// Boarding platform label (may be empty).
    pub platform: String,
    /// Service/day-type identifier as reported by the backend.
    pub day_type: String,
    /// Intermediate stop names in order, consecutive duplicates collapsed.
    pub stops: Vec<String>,
}

impl ScheduleEntry {
    /// Create an entry, collapsing consecutive duplicate stops.
    pub fn new(
        departure_time: BusTime,
        route: impl Into<String>,
        destination: impl Into<String>,
        platform: impl Into<String>,
        day_type: impl Into<String>,
        stops: Vec<String>,
    ) -> Self {
        Self {
            departure_time,
            route: route.into(),
            destination: destination.into(),
            platform: platform.into(),
            day_type: day_type.into(),
            stops: collapse_consecutive(stops),
        }
    }
}

/// Drop each stop that repeats the one immediately before it.
pub(crate) fn collapse_consecutive(mut stops: Vec<String>) -> Vec<String> {
    stops.dedup();
    stops
}
