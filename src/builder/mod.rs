//! Builder API for transition tables.
//!
//! Tables built here are validated once, up front, so agents wired onto
//! them never meet a malformed table at request time.

pub mod error;
pub mod table;

pub use error::BuildError;
pub use table::TransitionTableBuilder;
