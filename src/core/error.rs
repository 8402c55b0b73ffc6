//! Error taxonomy for a session.
//!
//! Cancelling the intake dialog is not an error; it is reported as
//! [`SessionOutcome::Cancelled`](crate::session::SessionOutcome).

use std::io;
use std::path::PathBuf;

/// Failure of an external presentation or prompt surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("input stream closed")]
    Closed,
    #[error("surface i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A label or answer outside the accepted set.
    #[error("invalid {what}: {got:?} (expected {expected})")]
    InvalidInput {
        what: &'static str,
        got: String,
        expected: &'static str,
    },

    #[error("display surface unavailable: {0}")]
    Surface(#[from] SurfaceError),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("trial log encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
