//! Agents driven by the shared transition table.
//!
//! - [`Agent`]: moves to a requested state when the table allows it
//! - [`SignalAgent`]: cycles through its colours and forces the other
//!   agents into matching states
//!
//! Agents borrow the table and only ever mutate their own position in it.

mod error;
mod machine;
mod role;
mod signal;

pub use error::TransitionError;
pub use machine::Agent;
pub use role::{AgentRole, UnknownRole};
pub use signal::{AdvanceReport, ForcedMove, ForcingRule, SignalAgent, FORCING_POLICY};
