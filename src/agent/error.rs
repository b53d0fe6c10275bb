//! Request-time transition errors.

use thiserror::Error;

/// Errors that can occur when an agent is asked to move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The table has no eligible entry for the requested move. Expected and
    /// recoverable: the caller asked for something the graph disallows.
    #[error("Cannot switch from '{from}' to '{to}'")]
    IllegalTransition { from: String, to: String },

    /// A move matched but its resting entry could not be found. Only a
    /// malformed table can produce this.
    #[error("Cannot find resting entry for '{state}', transition table is inconsistent")]
    TableInconsistency { state: String },
}

impl TransitionError {
    pub fn is_illegal(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }
}
