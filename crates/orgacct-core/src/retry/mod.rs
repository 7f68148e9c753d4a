//! Retry and backoff policy.
//!
//! This module splits a resilient call into three pieces: status classification
//! (`classify`), wait computation (`policy`) and the attempt loop (`run`), so the
//! client layer only ever sees one final response or one terminal error.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{is_retriable, RetriableStatuses, DEFAULT_RETRIABLE_STATUSES};
pub use error::{ExecuteError, TransportError};
pub use policy::{Backoff, RetryPolicy};
pub use run::{Executor, RetryMachine, State};
