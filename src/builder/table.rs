//! Builder for constructing validated transition tables.

use crate::builder::error::BuildError;
use crate::core::{Transition, TransitionTable};
use stillwater::validation::Validation;

/// Builder for constructing transition tables with a fluent API.
///
/// # Example
///
/// ```
/// use crossing::builder::TransitionTableBuilder;
///
/// let table = TransitionTableBuilder::new()
///     .visible("door closed", "door closed", "door is closed")
///     .visible("door closed", "door open", "door opening")
///     .visible("door open", "door open", "door is open")
///     .visible("door open", "door closed", "door closing")
///     .invisible("door open", "door locked", "door locked remotely")
///     .invisible("door locked", "door locked", "door is locked")
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 6);
/// ```
#[derive(Debug, Default)]
pub struct TransitionTableBuilder {
    entries: Vec<Transition>,
}

impl TransitionTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a user-requestable transition.
    pub fn visible(
        self,
        from: impl Into<String>,
        to: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        self.transition(Transition::visible(from, to, event))
    }

    /// Add a system-only transition.
    pub fn invisible(
        self,
        from: impl Into<String>,
        to: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        self.transition(Transition::invisible(from, to, event))
    }

    /// Add a pre-built transition.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.entries.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition>) -> Self {
        self.entries.extend(transitions);
        self
    }

    /// Build the table.
    /// Returns every validation violation at once if the table is malformed.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        let table = TransitionTable::new(self.entries);

        match table.validate() {
            Validation::Success(_) => Ok(table),
            Validation::Failure(errors) => {
                Err(BuildError::InvalidTable(errors.iter().cloned().collect()))
            }
        }
    }
}
