//! Core transition-table types and lookups.
//!
//! This module contains the pure part of the engine:
//! - Transition records and their visibility
//! - The shared, immutable transition table with its lookups and validation
//! - Immutable history of completed moves
//!
//! Nothing in this module mutates shared state or performs I/O.

mod error;
mod history;
mod table;
mod transition;

pub use error::TableError;
pub use history::{AgentHistory, TransitionRecord};
pub use table::TransitionTable;
pub use transition::{Transition, Visibility};
