//! Station pair value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A departure/arrival station pair as submitted by the user.
///
/// The station names are stored exactly as given: normalization is applied
/// only at the boundaries (deriving a search key, rendering for display),
/// never baked into the stored value, so repeated save/load cycles cannot
/// drift the representation.
///
/// The `id` is an opaque identity token for list-diffing and history rows;
/// two pairs naming the same stations are still distinct entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationPair {
    pub departure: String,
    pub arrival: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
}

impl StationPair {
    /// Create a pair timestamped now.
    pub fn new(departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
            created_at: Utc::now(),
            id: Uuid::new_v4(),
        }
    }

    /// True when either station name is empty.
    pub fn is_empty(&self) -> bool {
        self.departure.is_empty() || self.arrival.is_empty()
    }

    /// The pair with departure and arrival exchanged (a new identity).
    ///
    /// # Examples
    ///
    /// ```
    /// use busnow_core::domain::StationPair;
    ///
    /// let pair = StationPair::new("名古屋駅", "ささしまライブ");
    /// let back = pair.swapped();
    /// assert_eq!(back.departure, "ささしまライブ");
    /// assert_eq!(back.arrival, "名古屋駅");
    /// ```
    pub fn swapped(&self) -> Self {
        Self::new(self.arrival.clone(), self.departure.clone())
    }

    /// Whether `other` names the same departure and arrival stations.
    ///
    /// This is the history de-duplication key; identity tokens and
    /// timestamps are ignored.
    pub fn same_route(&self, other: &StationPair) -> bool {
        self.departure == other.departure && self.arrival == other.arrival
    }

    /// "departure → arrival" label.
    pub fn display_name(&self) -> String {
        format!("{} → {}", self.departure, self.arrival)
    }
}
