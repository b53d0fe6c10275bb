//! The shared transition table and its lookups.

use super::error::TableError;
use super::transition::{Transition, Visibility};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Ordered collection of [`Transition`]s forming the graph for every agent.
///
/// Order matters only in that every lookup returns the first match. The
/// table is never mutated after construction; agents borrow it.
///
/// # Example
///
/// ```rust
/// use crossing::core::TransitionTable;
///
/// let table = TransitionTable::intersection();
///
/// let stop = table.find_transition("car drive", "car stop", false).unwrap();
/// assert_eq!(table[stop].event, "car stopping from driving");
///
/// // Invisible moves need explicit permission
/// assert!(table.find_transition("car drive", "car signalStop", false).is_none());
/// assert!(table.find_transition("car drive", "car signalStop", true).is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    entries: Vec<Transition>,
}

impl TransitionTable {
    /// Wrap entries without validating them. Use
    /// [`TransitionTableBuilder`](crate::builder::TransitionTableBuilder)
    /// to get a validated table.
    pub fn new(entries: Vec<Transition>) -> Self {
        Self { entries }
    }

    /// The fixed car / pedestrian / signal table.
    pub fn intersection() -> Self {
        use Transition as T;

        Self::new(vec![
            // resting entries the agents start on
            T::visible("car drive", "car drive", "car is driving"),
            T::visible("man walk", "man walk", "man is walking"),
            T::visible("signal green", "signal orange", "signal is green"),
            // car
            T::visible("car drive", "car stop", "car stopping from driving"),
            T::visible("car stop", "car drive", "car starting to drive"),
            T::invisible(
                "car drive",
                "car signalStop",
                "car stopping from driving at signal",
            ),
            T::invisible(
                "car stop",
                "car signalStop",
                "car is contining to stop at signal",
            ),
            T::invisible("car signalStop", "car drive", "car is starting at signal"),
            T::visible("car stop", "car stop", "car is stopped"),
            T::invisible(
                "car signalStop",
                "car signalStop",
                "car is waiting at red signal",
            ),
            // signal
            T::visible("signal red", "signal green", "signal is red"),
            T::visible("signal orange", "signal red", "signal is orange"),
            // pedestrian
            T::visible("man walk", "man stop", "man will be stopping"),
            T::visible("man stop", "man walk", "man will be walking"),
            T::invisible(
                "man stop",
                "man signalStop",
                "man is stoping at signal from waiting",
            ),
            T::invisible(
                "man walk",
                "man signalStop",
                "man is stoping at signal from walking",
            ),
            T::invisible(
                "man signalStop",
                "man walk",
                "man is walking after waiting for signal",
            ),
            T::visible("man stop", "man stop", "man is not walking"),
            T::invisible("man signalStop", "man signalStop", "man is waiting at signal"),
        ])
    }

    /// Find the first entry moving `from` to `to` that the caller may use.
    ///
    /// Visible entries always match. Invisible entries match only when
    /// `allow_invisible` is set, so a user-level lookup falls through to a
    /// visible alternative even when invisible duplicates come first.
    pub fn find_transition(&self, from: &str, to: &str, allow_invisible: bool) -> Option<usize> {
        self.entries
            .iter()
            .position(|t| t.from == from && t.to == to && t.is_eligible(allow_invisible))
    }

    /// Find the first entry starting at `state` whose visibility is exactly
    /// `visibility`.
    ///
    /// Unlike [`find_transition`](Self::find_transition) this is an exact
    /// match on visibility and ignores the destination.
    pub fn find_state_entry(&self, state: &str, visibility: Visibility) -> Option<usize> {
        self.entries
            .iter()
            .position(|t| t.from == state && t.visibility == visibility)
    }

    /// Find the idle self-loop for `state` under the same eligibility rule
    /// as [`find_transition`](Self::find_transition).
    pub fn find_idle_entry(&self, state: &str, allow_invisible: bool) -> Option<usize> {
        self.find_transition(state, state, allow_invisible)
    }

    pub fn get(&self, index: usize) -> Option<&Transition> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.entries.iter()
    }

    /// Entries leaving `state`, with their indices, in table order.
    pub fn outgoing<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Transition)> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.from == state)
    }

    /// Distinct state names, first-seen order.
    pub fn states(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|t| [t.from.as_str(), t.to.as_str()])
            .filter(|s| seen.insert(*s))
            .collect()
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.entries.iter().any(|t| t.from == state || t.to == state)
    }

    /// Whether `state` has an entry for at least one visibility.
    fn resolves(&self, state: &str) -> bool {
        self.find_state_entry(state, Visibility::Visible).is_some()
            || self.find_state_entry(state, Visibility::Invisible).is_some()
    }

    fn has_self_loop(&self, state: &str) -> bool {
        self.entries.iter().any(|t| t.is_self_loop() && t.from == state)
    }

    /// Check the table's static invariants, accumulating ALL violations.
    ///
    /// - the table is not empty
    /// - every destination has an entry starting at it
    /// - every edge leaving a resting state (one with a self-loop) can settle
    ///   on an idle entry of its destination under the edge's own visibility
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableError>> {
        if self.is_empty() {
            return Validation::fail(TableError::Empty);
        }

        let mut checks: Vec<Validation<(), NonEmptyVec<TableError>>> = Vec::new();

        let mut destinations = HashSet::new();
        for t in &self.entries {
            if !destinations.insert(t.to.as_str()) {
                continue;
            }
            let resolvable = self.resolves(&t.to);
            checks.push(if resolvable {
                Validation::success(())
            } else {
                Validation::fail(TableError::UnresolvedDestination {
                    state: t.to.clone(),
                })
            });
        }

        let mut reported = HashSet::new();
        for t in self
            .entries
            .iter()
            .filter(|t| !t.is_self_loop() && self.has_self_loop(&t.from))
        {
            if !self.resolves(&t.to) || self.find_idle_entry(&t.to, !t.is_visible()).is_some() {
                continue;
            }
            if reported.insert((t.to.as_str(), t.visibility)) {
                checks.push(Validation::fail(TableError::MissingIdleEntry {
                    state: t.to.clone(),
                    visibility: t.visibility,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl std::ops::Index<usize> for TransitionTable {
    type Output = Transition;

    fn index(&self, index: usize) -> &Transition {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a TransitionTable {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
