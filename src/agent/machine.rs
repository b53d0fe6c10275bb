//! Table-driven agent.

use crate::agent::error::TransitionError;
use crate::core::{AgentHistory, TableError, TransitionRecord, TransitionTable, Visibility};
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, error, warn};

/// A state machine whose legal moves come from a shared [`TransitionTable`].
///
/// The agent rests on an index into the table: the idle self-loop entry of
/// its present state. The table is borrowed, so it outlives every agent.
///
/// # Example
///
/// ```rust
/// use crossing::agent::{Agent, TransitionError};
/// use crossing::core::TransitionTable;
///
/// let table = TransitionTable::intersection();
/// let mut car = Agent::new(&table, "car drive").unwrap();
///
/// assert_eq!(car.request("car stop"), Ok("car stopping from driving"));
/// assert_eq!(car.current_state_name(), "car stop");
///
/// // Only the signal may stop a car at the lights
/// assert!(matches!(
///     car.request("car signalStop"),
///     Err(TransitionError::IllegalTransition { .. })
/// ));
/// assert_eq!(car.force("car signalStop"), Ok("car is contining to stop at signal"));
/// ```
#[derive(Clone, Debug)]
pub struct Agent<'t> {
    table: &'t TransitionTable,
    current: usize,
    history: AgentHistory,
}

impl<'t> Agent<'t> {
    /// Place an agent on the idle entry of `initial`.
    ///
    /// Every state reachable from `initial` is checked up front: each must
    /// have an idle entry the agent can settle on through every edge that
    /// enters it. An agent built here never reports
    /// [`TransitionError::TableInconsistency`].
    pub fn new(table: &'t TransitionTable, initial: &str) -> Result<Self, TableError> {
        let current = table.find_idle_entry(initial, true).ok_or_else(|| {
            if table.contains_state(initial) {
                TableError::MissingIdleEntry {
                    state: initial.to_string(),
                    visibility: Visibility::Visible,
                }
            } else {
                TableError::UnknownState {
                    state: initial.to_string(),
                }
            }
        })?;

        check_reachable(table, &table[current].from)?;

        Ok(Self {
            table,
            current,
            history: AgentHistory::new(),
        })
    }

    /// Place an agent directly on a table index. Only the bounds are checked.
    pub fn from_index(table: &'t TransitionTable, index: usize) -> Result<Self, TableError> {
        if index >= table.len() {
            return Err(TableError::IndexOutOfBounds {
                index,
                len: table.len(),
            });
        }

        Ok(Self {
            table,
            current: index,
            history: AgentHistory::new(),
        })
    }

    /// Move to `target` if the table allows it, returning the event label
    /// of the matched transition.
    ///
    /// With `allow_invisible` unset only visible transitions match; system
    /// callers set it to force moves an operator may not request.
    pub fn request_transition(
        &mut self,
        target: &str,
        allow_invisible: bool,
    ) -> Result<&'t str, TransitionError> {
        let table = self.table;
        let source = table[self.current].from.as_str();

        let Some(matched) = table.find_transition(source, target, allow_invisible) else {
            warn!(from = source, to = target, allow_invisible, "transition rejected");
            return Err(TransitionError::IllegalTransition {
                from: source.to_string(),
                to: target.to_string(),
            });
        };

        let Some(resting) = table.find_idle_entry(target, allow_invisible) else {
            error!(
                from = source,
                to = target,
                "matched transition has no resting entry"
            );
            return Err(TransitionError::TableInconsistency {
                state: target.to_string(),
            });
        };

        let event = table[matched].event.as_str();
        self.settle(resting, source, target, event, allow_invisible);

        debug!(from = source, to = target, event, forced = allow_invisible, "transition applied");
        Ok(event)
    }

    /// User-level request: visible transitions only.
    pub fn request(&mut self, target: &str) -> Result<&'t str, TransitionError> {
        self.request_transition(target, false)
    }

    /// System-level request: invisible transitions allowed.
    pub fn force(&mut self, target: &str) -> Result<&'t str, TransitionError> {
        self.request_transition(target, true)
    }

    /// Rest on `resting` and record the move that led there.
    pub(crate) fn settle(
        &mut self,
        resting: usize,
        from: &str,
        to: &str,
        event: &str,
        forced: bool,
    ) {
        self.history.push(TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            event: event.to_string(),
            forced,
            timestamp: Utc::now(),
        });
        self.current = resting;
    }

    pub(crate) fn table(&self) -> &'t TransitionTable {
        self.table
    }

    pub fn current_state_name(&self) -> &'t str {
        &self.table[self.current].from
    }

    /// Description of the entry the agent rests on.
    pub fn current_event_label(&self) -> &'t str {
        &self.table[self.current].event
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn history(&self) -> &AgentHistory {
        &self.history
    }

    /// States the agent could move to right now, in table order.
    pub fn available_targets(&self, allow_invisible: bool) -> Vec<&'t str> {
        let table = self.table;
        let mut seen = HashSet::new();
        table
            .outgoing(self.current_state_name())
            .filter(|(_, t)| t.is_eligible(allow_invisible))
            .map(|(_, t)| t.to.as_str())
            .filter(|to| seen.insert(*to))
            .collect()
    }
}

/// Walk every state reachable from `start` and make sure each edge can
/// settle on an idle entry of its destination.
fn check_reachable<'a>(table: &'a TransitionTable, start: &'a str) -> Result<(), TableError> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(state) = queue.pop_front() {
        for (_, t) in table.outgoing(state) {
            let allow_invisible = !t.is_visible();
            if table.find_idle_entry(&t.to, allow_invisible).is_none() {
                return Err(TableError::MissingIdleEntry {
                    state: t.to.clone(),
                    visibility: t.visibility,
                });
            }
            if seen.insert(t.to.as_str()) {
                queue.push_back(t.to.as_str());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    #[test]
    fn car_scenario() {
        let table = TransitionTable::intersection();
        let mut car = Agent::new(&table, "car drive").unwrap();

        assert_eq!(car.request("car stop"), Ok("car stopping from driving"));
        assert_eq!(car.current_state_name(), "car stop");

        assert_eq!(car.request("car drive"), Ok("car starting to drive"));
        assert_eq!(car.current_state_name(), "car drive");

        let err = car.request("car signalStop").unwrap_err();
        assert_eq!(
            err,
            TransitionError::IllegalTransition {
                from: "car drive".to_string(),
                to: "car signalStop".to_string(),
            }
        );
        assert_eq!(car.current_state_name(), "car drive");
    }

    #[test]
    fn self_transition_is_idempotent() {
        let table = TransitionTable::intersection();
        let mut car = Agent::new(&table, "car drive").unwrap();
        let before = car.current_state_name();

        assert_eq!(car.request("car drive"), Ok("car is driving"));
        assert_eq!(car.current_state_name(), before);
        assert_eq!(car.current_event_label(), "car is driving");
    }

    #[test]
    fn invisible_moves_need_force() {
        let table = TransitionTable::intersection();
        let mut man = Agent::new(&table, "man stop").unwrap();

        assert!(man.request("man signalStop").unwrap_err().is_illegal());
        assert_eq!(
            man.force("man signalStop"),
            Ok("man is stoping at signal from waiting")
        );
        assert_eq!(man.current_state_name(), "man signalStop");
        assert_eq!(man.current_event_label(), "man is waiting at signal");

        // Stuck until the signal releases it
        assert!(man.request("man walk").unwrap_err().is_illegal());
        assert_eq!(
            man.force("man walk"),
            Ok("man is walking after waiting for signal")
        );
        assert_eq!(man.current_state_name(), "man walk");
    }

    #[test]
    fn pedestrian_starts_waiting() {
        let table = TransitionTable::intersection();
        let man = Agent::new(&table, "man stop").unwrap();

        assert_eq!(man.current_state_name(), "man stop");
        assert_eq!(man.current_event_label(), "man is not walking");
    }

    #[test]
    fn history_records_successful_moves_only() {
        let table = TransitionTable::intersection();
        let mut car = Agent::new(&table, "car drive").unwrap();

        car.request("car stop").unwrap();
        let _ = car.request("car signalStop");
        car.force("car signalStop").unwrap();

        let history = car.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), vec!["car drive", "car stop", "car signalStop"]);
        assert_eq!(history.forced_count(), 1);
    }

    #[test]
    fn available_targets_respect_visibility() {
        let table = TransitionTable::intersection();
        let car = Agent::new(&table, "car stop").unwrap();

        assert_eq!(car.available_targets(false), vec!["car drive", "car stop"]);
        assert_eq!(
            car.available_targets(true),
            vec!["car drive", "car signalStop", "car stop"]
        );
    }

    #[test]
    fn unknown_initial_state_is_rejected() {
        let table = TransitionTable::intersection();

        assert_eq!(
            Agent::new(&table, "bus drive").unwrap_err(),
            TableError::UnknownState {
                state: "bus drive".to_string()
            }
        );
        assert!(matches!(
            Agent::new(&table, "signal red").unwrap_err(),
            TableError::MissingIdleEntry { .. }
        ));
    }

    #[test]
    fn unreachable_resting_state_is_rejected_at_construction() {
        let table = TransitionTable::new(vec![
            Transition::visible("a", "a", "resting"),
            Transition::visible("a", "b", "to b"),
            Transition::visible("b", "c", "to c"),
        ]);

        assert_eq!(
            Agent::new(&table, "a").unwrap_err(),
            TableError::MissingIdleEntry {
                state: "b".to_string(),
                visibility: Visibility::Visible,
            }
        );
    }

    #[test]
    fn unvalidated_agent_reports_inconsistency() {
        let table = TransitionTable::new(vec![
            Transition::visible("a", "a", "resting"),
            Transition::visible("a", "b", "to b"),
        ]);
        let mut agent = Agent::from_index(&table, 0).unwrap();

        assert_eq!(
            agent.request("b"),
            Err(TransitionError::TableInconsistency {
                state: "b".to_string()
            })
        );
        assert_eq!(agent.current_state_name(), "a");
        assert!(agent.history().is_empty());
    }

    #[test]
    fn from_index_checks_bounds() {
        let table = TransitionTable::intersection();

        assert_eq!(
            Agent::from_index(&table, 19).unwrap_err(),
            TableError::IndexOutOfBounds { index: 19, len: 19 }
        );
        assert_eq!(
            Agent::from_index(&table, 17).unwrap().current_state_name(),
            "man stop"
        );
    }
}
