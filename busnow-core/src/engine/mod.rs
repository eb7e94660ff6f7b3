//! Schedule state engine.
//!
//! Split into a pure date-rollover calculator, a pure next-bus calculator,
//! and the [`ScheduleSession`] orchestrator that wires the schedule
//! service, the clock ticks, and the calculators together. The pure parts
//! are callable from tests without a timer or a backend.

mod dates;
mod next_bus;
mod session;

pub use dates::target_date;
pub use next_bus::{minutes_until_next, next_bus_index};
pub use session::{FetchTicket, ScheduleSession};
