//! Schedule backend access.
//!
//! The timetable lives in a hosted database queried through a single RPC
//! function. This module provides the HTTP client for that RPC, the wire
//! types and their conversion into domain entries, the error taxonomy, and
//! a mock implementation for tests.
//!
//! The [`ScheduleService`] trait is the seam: the engine is written against
//! it, so tests run against [`MockScheduleService`] and production wires in
//! [`RpcClient`].

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{RpcClient, RpcConfig};
pub use convert::convert_rows;
pub use error::BackendError;
pub use mock::{MockScheduleService, RecordedRequest};
pub use types::{ScheduleParams, ScheduleRow};

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::ScheduleEntry;

/// A source of timetables for a (normalized) station pair and target date.
///
/// Implementations own their retry policy; an error returned here is
/// terminal for the request. An [`BackendError::EmptyResponse`] outcome
/// means the query matched nothing and is not a user-facing error.
pub trait ScheduleService {
    fn fetch_schedules(
        &self,
        departure: &str,
        arrival: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<ScheduleEntry>, BackendError>> + Send;
}
