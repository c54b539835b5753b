//! Tracker error types

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Rejected before reaching storage
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to {action}: {source}")]
    Write {
        action: &'static str,
        #[source]
        source: DbError,
    },

    #[error("Failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: DbError,
    },
}

impl TrackerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Adapter for `map_err` on write paths
    pub fn write(action: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Write { action, source }
    }

    /// Adapter for `map_err` on read paths
    pub fn fetch(what: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Fetch { what, source }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
