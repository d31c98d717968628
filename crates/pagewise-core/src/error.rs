//! Error types and handling for pagewise-core operations.
//!
//! Every failure a loader can hit is represented by [`Error`]. Loaders never
//! return these through `Err` from `load`; they wrap them in
//! [`LoadResult::Error`](crate::LoadResult::Error) so the driving list can decide
//! whether to retry, surface, or discard.
//!
//! ## Classification
//!
//! Errors are grouped into an [`ErrorKind`] for the driver:
//!
//! - **Transport failures**: connectivity, timeouts, unreadable bodies
//! - **Remote rejections**: non-success responses from the search API
//! - **Invariant violations**: requests or computed keys that should never exist
//! - **Cancellation**: the load was superseded before it completed
//!
//! ```rust
//! use pagewise_core::{Error, ErrorKind};
//!
//! let error = Error::Rejected { status: 503, message: "unavailable".into() };
//! assert_eq!(error.kind(), ErrorKind::RemoteRejection { status: 503 });
//! assert!(error.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for pagewise-core operations.
///
/// The underlying cause is kept in the variant so the driver can display it or
/// decide on a retry.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a usable response arrived.
    ///
    /// Covers connection failures, timeouts, and bodies that could not be read or
    /// decoded. The underlying `reqwest::Error` is preserved.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The search API answered with a non-success status.
    #[error("Remote rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body or reason phrase, for display.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A load request violated its constraints (for example a zero size).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An internal invariant did not hold.
    ///
    /// Produced when a computed page key would overflow, or when a collaborator
    /// panicked inside a load. Should never happen in a healthy process.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// A failure produced by a configured failure-injection hook.
    #[error("Injected failure: {0}")]
    Injected(String),

    /// The load was cancelled before it completed.
    #[error("Load cancelled")]
    Cancelled,
}

/// Classification of load failures handed to the driving list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity or I/O failure; the request may succeed later.
    TransportFailure,
    /// The remote service answered with a non-success status.
    RemoteRejection {
        /// HTTP status code, when one was received.
        status: u16,
    },
    /// Internal contract breach. Fatal.
    InvariantViolation,
    /// The load was superseded and abandoned.
    Cancelled,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Classify the error for the driving list.
    ///
    /// A `reqwest` error that carries an HTTP status is a rejection; every other
    /// network or I/O failure is a transport failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(e) => e.status().map_or(ErrorKind::TransportFailure, |status| {
                ErrorKind::RemoteRejection {
                    status: status.as_u16(),
                }
            }),
            Self::Rejected { status, .. } => ErrorKind::RemoteRejection { status: *status },
            Self::Io(_) | Self::Serialization(_) | Self::Injected(_) => {
                ErrorKind::TransportFailure
            },
            Self::Config(_) | Self::InvalidRequest(_) | Self::Invariant(_) => {
                ErrorKind::InvariantViolation
            },
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for timeouts, connection failures, server-side rejections
    /// (5xx and 429), interrupted I/O, and injected faults.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            },
            Self::Rejected { status, .. } => *status >= 500 || *status == 429,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Self::Injected(_) => true,
            _ => false,
        }
    }

    /// Get the error category as a stable string identifier for logs.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Io(_) => "io",
            Self::Rejected { .. } => "rejected",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Invariant(_) => "invariant",
            Self::Injected(_) => "injected",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
