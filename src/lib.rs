//! Crossing: table-driven cooperating state machines
//!
//! A car, a pedestrian and a traffic signal move between states according
//! to one shared, declarative transition table instead of hard-coded
//! control flow. When the signal changes colour it forces the other two
//! agents into matching states.
//!
//! # Core Concepts
//!
//! - **Transition**: one edge of the graph, with an event label and a
//!   visibility tag separating user moves from system-forced ones
//! - **TransitionTable**: the ordered, immutable set of transitions shared by
//!   every agent
//! - **Agent**: rests on an idle entry of the table and moves on request
//! - **SignalAgent**: cycles its colours and forces the other agents
//!
//! # Example
//!
//! ```rust
//! use crossing::agent::AgentRole;
//! use crossing::core::TransitionTable;
//! use crossing::intersection::Intersection;
//!
//! let table = TransitionTable::intersection();
//! let mut crossing = Intersection::standard(&table).unwrap();
//!
//! crossing.command(AgentRole::Car, "stop").unwrap();
//! assert_eq!(crossing.car().current_state_name(), "car stop");
//!
//! // green -> orange -> red: the car is held and the pedestrian walks
//! crossing.advance_signal().unwrap();
//! crossing.advance_signal().unwrap();
//! assert_eq!(crossing.car().current_state_name(), "car signalStop");
//! assert_eq!(crossing.pedestrian().current_state_name(), "man walk");
//! ```

pub mod agent;
pub mod builder;
pub mod core;
pub mod intersection;

// Re-export commonly used types
pub use crate::agent::{Agent, SignalAgent, TransitionError};
pub use crate::builder::{BuildError, TransitionTableBuilder};
pub use crate::core::{TableError, Transition, TransitionTable, Visibility};
pub use crate::intersection::{Intersection, IntersectionConfig};
