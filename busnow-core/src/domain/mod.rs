//! Domain types for bus-schedule lookups.
//!
//! These are the validated value types the rest of the crate works in
//! terms of. Construction enforces the invariants (a `BusTime` is always a
//! real time of day), so downstream code can trust the values it receives.

mod schedule;
mod station;
mod time;

pub use schedule::{DayType, Direction, ScheduleEntry};
pub use station::StationPair;
pub use time::{BusTime, TimeError};
