//! Bus-schedule lookup core.
//!
//! The library behind a timetable app for a local bus network: normalizes
//! station names across a Unicode glyph-variant ambiguity, queries a remote
//! schedule database, and tracks which departure is next as the clock
//! advances. The UI shell owns screens, timers, and real persistence; this
//! crate owns the semantics.

pub mod backend;
pub mod domain;
pub mod engine;
pub mod history;
pub mod normalize;
