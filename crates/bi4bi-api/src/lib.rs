//! Async client for the bi4bi backend service.
//!
//! The wizard consumes exactly one endpoint:
//! `POST {base}/reports/test-connection`, which validates a set of BI-tool
//! connection parameters server-side. A 2xx response means the credentials
//! work; anything else (non-2xx, transport failure, timeout) is an
//! [`Error`] carrying a human-readable cause. One attempt per call — the
//! UI retries by re-invoking.

mod client;
mod error;

pub use client::{ConnectionParams, ReportsClient};
pub use error::Error;
