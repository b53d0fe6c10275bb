//! Table consistency errors.

use super::transition::Visibility;
use thiserror::Error;

/// Static-configuration defects found while validating a transition table
/// or wiring an agent onto it.
///
/// These are construction-time errors. A table and agents that were built
/// successfully never produce them at request time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Transition table is empty")]
    Empty,

    #[error("No entry starts at destination state '{state}'")]
    UnresolvedDestination { state: String },

    #[error("State '{state}' has no {visibility} idle entry to rest on")]
    MissingIdleEntry {
        state: String,
        visibility: Visibility,
    },

    #[error("State '{state}' does not appear in the transition table")]
    UnknownState { state: String },

    #[error("Index {index} is outside the transition table (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Signal cycle starting at '{state}' does not close")]
    BrokenCycle { state: String },
}
