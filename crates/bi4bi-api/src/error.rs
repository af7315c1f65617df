//! Error type for backend requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request did not complete within the configured timeout.
    #[error("connection test timed out")]
    Timeout(#[source] reqwest::Error),

    /// DNS, TCP, or TLS level failure before an HTTP status was seen.
    #[error("could not reach the backend: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("connection test failed (HTTP {status}): {message}")]
    Backend { status: u16, message: String },
}

impl Error {
    /// Classify a reqwest failure, keeping timeouts distinguishable.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}
