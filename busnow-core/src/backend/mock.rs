//! Mock schedule service for testing without backend access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::domain::ScheduleEntry;

use super::ScheduleService;
use super::error::BackendError;

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub departure: String,
    pub arrival: String,
    pub date: NaiveDate,
}

#[derive(Default)]
struct Inner {
    /// Canned timetables, keyed by (departure, arrival) as the caller
    /// sends them (i.e. already search-normalized).
    boards: HashMap<(String, String), Vec<ScheduleEntry>>,
    /// When set, every fetch fails with this error instead.
    fail_with: Option<BackendError>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`ScheduleService`] serving canned timetables.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the session under test owns another.
#[derive(Clone, Default)]
pub struct MockScheduleService {
    inner: Arc<Mutex<Inner>>,
}

impl MockScheduleService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned timetable for a station pair.
    pub fn with_entries(
        self,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        self.set_entries(departure, arrival, entries);
        self
    }

    /// Replace the canned timetable for a station pair.
    pub fn set_entries(
        &self,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        entries: Vec<ScheduleEntry>,
    ) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .boards
            .insert((departure.into(), arrival.into()), entries);
    }

    /// Make every subsequent fetch fail with `error`.
    pub fn fail_with(&self, error: BackendError) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_with = Some(error);
    }

    /// Stop failing fetches.
    pub fn clear_failure(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_with = None;
    }

    /// Every request issued so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.requests.clone()
    }
}

impl ScheduleService for MockScheduleService {
    async fn fetch_schedules(
        &self,
        departure: &str,
        arrival: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, BackendError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        inner.requests.push(RecordedRequest {
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            date,
        });

        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }

        match inner
            .boards
            .get(&(departure.to_string(), arrival.to_string()))
        {
            Some(entries) => Ok(entries.clone()),
            None => Err(BackendError::EmptyResponse),
        }
    }
}
