//! Search history persistence.
//!
//! The last submitted pair and a bounded most-recent-first history list,
//! JSON-encoded into a generic key-value store. Pairs are search-normalized
//! on the way in, so two spellings of the same station collapse to one
//! history row.

use serde::de::DeserializeOwned;

use crate::domain::StationPair;
use crate::normalize::VariantTable;

/// Store key for the last submitted pair.
const SAVED_PAIR_KEY: &str = "saved_station_pair";

/// Store key for the history list.
const HISTORY_KEY: &str = "station_pair_history";

/// Maximum history rows kept; the oldest is evicted beyond this.
const MAX_HISTORY: usize = 10;

/// A persistent byte-oriented key-value store.
///
/// The platform shell supplies the real store (user defaults, a file, a
/// keychain); [`MemoryStore`] backs tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: Vec<u8>);
    fn remove(&mut self, key: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Error encoding history state for persistence.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode history: {0}")]
pub struct HistoryError(#[from] serde_json::Error);

/// Bounded, de-duplicated station-pair history over a key-value store.
///
/// Saving a pair that already exists (same departure and arrival) removes
/// the prior occurrence and reinserts at the front; the list never exceeds
/// ten rows. Stored pairs are always the search-normalized copies; the
/// originals stay wherever the caller keeps them.
pub struct SearchHistory<S> {
    store: S,
    table: VariantTable,
    entries: Vec<StationPair>,
}

impl<S: KeyValueStore> SearchHistory<S> {
    /// Open the history, loading any persisted list from the store.
    ///
    /// Undecodable persisted state is treated as absent rather than as an
    /// error; history is a convenience, not a source of truth.
    pub fn open(store: S) -> Self {
        let entries = decode(&store, HISTORY_KEY).unwrap_or_default();
        Self {
            store,
            table: VariantTable::default(),
            entries,
        }
    }

    /// Persist `pair` as the last submitted pair and push it onto the
    /// history, normalizing both names for search.
    pub fn save_pair(&mut self, pair: &StationPair) -> Result<(), HistoryError> {
        let normalized = StationPair::new(
            self.table.normalize_for_search(&pair.departure),
            self.table.normalize_for_search(&pair.arrival),
        );

        self.store
            .set(SAVED_PAIR_KEY, serde_json::to_vec(&normalized)?);

        self.entries.retain(|p| !p.same_route(&normalized));
        self.entries.insert(0, normalized);
        self.entries.truncate(MAX_HISTORY);

        self.persist()
    }

    /// The last submitted pair, if one was saved.
    pub fn load_saved_pair(&self) -> Option<StationPair> {
        decode(&self.store, SAVED_PAIR_KEY)
    }

    /// Forget the last submitted pair.
    pub fn clear_saved_pair(&mut self) {
        self.store.remove(SAVED_PAIR_KEY);
    }

    /// History rows, most recent first.
    pub fn entries(&self) -> &[StationPair] {
        &self.entries
    }

    /// Remove one history row. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.entries.len() {
            return Ok(());
        }
        self.entries.remove(index);
        self.persist()
    }

    /// Drop the whole history list.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.remove(HISTORY_KEY);
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        self.store
            .set(HISTORY_KEY, serde_json::to_vec(&self.entries)?);
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let bytes = store.get(key)?;
    serde_json::from_slice(&bytes).ok()
}
