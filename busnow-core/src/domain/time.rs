//! Timetable time handling.
//!
//! The backend provides departure times as "HH:MM" strings (sometimes
//! "HH:MM:SS" from richer sources; seconds are stripped). Buses on this
//! network do not run overnight, so a time of day with minute granularity
//! is the whole story: comparisons and minutes-until arithmetic ignore
//! dates and seconds.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled time of day at minute granularity.
///
/// # Examples
///
/// ```
/// use busnow_core::domain::BusTime;
///
/// let t = BusTime::parse("08:30").unwrap();
/// assert_eq!(t.to_string(), "08:30");
/// assert_eq!(t.total_minutes(), 510);
///
/// // Seconds from richer source formats are stripped.
/// assert_eq!(BusTime::parse("08:30:45").unwrap(), t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusTime {
    hour: u8,
    minute: u8,
}

impl BusTime {
    /// Create a time from hour and minute components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self { hour, minute })
    }

    /// Parse a time from "HH:MM" or "HH:MM:SS" format.
    ///
    /// Seconds, when present, are validated but discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use busnow_core::domain::BusTime;
    ///
    /// assert!(BusTime::parse("00:00").is_ok());
    /// assert!(BusTime::parse("23:59").is_ok());
    /// assert!(BusTime::parse("07:15:00").is_ok());
    ///
    /// assert!(BusTime::parse("730").is_err());
    /// assert!(BusTime::parse("7:30").is_err());
    /// assert!(BusTime::parse("25:00").is_err());
    /// assert!(BusTime::parse("12:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        match bytes.len() {
            5 => {}
            8 => {
                if bytes[5] != b':' {
                    return Err(TimeError::new("expected colon at position 5"));
                }
                let seconds = parse_two_digits(&bytes[6..8])
                    .ok_or_else(|| TimeError::new("invalid second digits"))?;
                if seconds > 59 {
                    return Err(TimeError::new("second must be 0-59"));
                }
            }
            _ => return Err(TimeError::new("expected HH:MM or HH:MM:SS format")),
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::new(hour as u8, minute as u8)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes from midnight, for time-window arithmetic.
    pub fn total_minutes(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Whole minutes from `now` until this time, clamped at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use busnow_core::domain::BusTime;
    ///
    /// let now = BusTime::parse("08:15").unwrap();
    /// let departure = BusTime::parse("08:30").unwrap();
    /// assert_eq!(departure.minutes_from(now), 15);
    ///
    /// // Already departed: clamped, never negative.
    /// let gone = BusTime::parse("08:00").unwrap();
    /// assert_eq!(gone.minutes_from(now), 0);
    /// ```
    pub fn minutes_from(&self, now: BusTime) -> u32 {
        self.total_minutes().saturating_sub(now.total_minutes())
    }
}

impl From<NaiveTime> for BusTime {
    /// Truncates a wall-clock time to minute granularity.
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl Ord for BusTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_minutes().cmp(&other.total_minutes())
    }
}

impl PartialOrd for BusTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BusTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for BusTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
