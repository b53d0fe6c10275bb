//! Build errors for transition tables.

use crate::core::TableError;
use thiserror::Error;

/// Errors that can occur when building a transition table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition table failed validation with {} violation(s): {}", .0.len(), join(.0))]
    InvalidTable(Vec<TableError>),
}

impl BuildError {
    /// Every violation found, in discovery order.
    pub fn violations(&self) -> &[TableError] {
        match self {
            Self::InvalidTable(violations) => violations,
        }
    }
}

fn join(violations: &[TableError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
