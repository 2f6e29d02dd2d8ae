//! Error types for the compass SDK.

use thiserror::Error;

use crate::term::TermParseError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompassError {
    /// The term identifier could not be parsed; correctable by the caller.
    #[error(transparent)]
    InvalidTerm(#[from] TermParseError),

    #[error("Invalid search filter: {message}")]
    InvalidFilter { message: String },

    #[error("Warehouse connection failed: {message}")]
    Connection { message: String },

    #[error("Warehouse query failed: {message}")]
    QueryExecution { message: String },
}

impl CompassError {
    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn query_execution(message: impl Into<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
        }
    }

    /// Whether the caller can fix the request and try again.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidTerm(_) | Self::InvalidFilter { .. })
    }
}
