//! Next-departure computation.
//!
//! Pure functions over an ordered entry list and a wall-clock time of day,
//! called from the session on every tick. Comparison is at minute
//! granularity: a bus scheduled for the current minute counts as already
//! departed.

use crate::domain::{BusTime, ScheduleEntry};

/// Index of the first entry that has not yet departed, in stored order.
///
/// An entry is "not yet departed" when its time is strictly after `now`;
/// equality means gone. Returns `None` when every entry has departed (or
/// the list is empty).
///
/// # Examples
///
/// ```
/// use busnow_core::domain::{BusTime, ScheduleEntry};
/// use busnow_core::engine::next_bus_index;
///
/// let entry = |t: &str| ScheduleEntry::new(
///     BusTime::parse(t).unwrap(), "幹名駅1", "名古屋駅", "", "", Vec::new(),
/// );
/// let entries = vec![entry("08:00"), entry("08:30"), entry("09:00")];
///
/// let now = BusTime::parse("08:15").unwrap();
/// assert_eq!(next_bus_index(&entries, now), Some(1));
///
/// // At exactly 08:30 that bus is treated as departed.
/// let now = BusTime::parse("08:30").unwrap();
/// assert_eq!(next_bus_index(&entries, now), Some(2));
/// ```
pub fn next_bus_index(entries: &[ScheduleEntry], now: BusTime) -> Option<usize> {
    entries.iter().position(|e| e.departure_time > now)
}

/// Whole minutes until the next departure, `None` when there is none.
pub fn minutes_until_next(entries: &[ScheduleEntry], now: BusTime) -> Option<u32> {
    next_bus_index(entries, now).map(|i| entries[i].departure_time.minutes_from(now))
}
