//! Traffic signal: the coordinating agent.

use crate::agent::error::TransitionError;
use crate::agent::machine::Agent;
use crate::agent::role::AgentRole;
use crate::core::{AgentHistory, TableError, TransitionTable, Visibility};
use tracing::{error, info, warn};

/// What the signal forces on the other agents when it turns a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcingRule {
    pub signal: &'static str,
    pub car: &'static str,
    pub pedestrian: &'static str,
}

/// Colours without a rule force nothing.
pub const FORCING_POLICY: [ForcingRule; 2] = [
    ForcingRule {
        signal: "signal red",
        car: "car signalStop",
        pedestrian: "man walk",
    },
    ForcingRule {
        signal: "signal green",
        car: "car drive",
        pedestrian: "man signalStop",
    },
];

/// Outcome of one forced move on a collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct ForcedMove {
    pub role: AgentRole,
    pub target: &'static str,
    pub outcome: Result<String, TransitionError>,
}

/// Result of [`SignalAgent::advance`].
///
/// The signal's own move is always committed by the time a report exists;
/// `forced` lists what happened to the collaborators, failures included.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvanceReport {
    /// The colour the signal turned
    pub state: String,
    /// Event label of the colour's entry, e.g. "signal is red"
    pub signal_event: String,
    pub forced: Vec<ForcedMove>,
}

impl AdvanceReport {
    /// Whether every forced move succeeded.
    pub fn fully_propagated(&self) -> bool {
        self.forced.iter().all(|m| m.outcome.is_ok())
    }
}

/// Agent that cycles through its colours and forces the car and the
/// pedestrian into matching states.
///
/// The signal never takes an arbitrary target: each entry it rests on names
/// the next colour in its `to` field, and [`advance`](Self::advance) follows
/// it. Forcing is not atomic. If a collaborator rejects a forced move the
/// signal keeps its new colour and the failure is reported.
///
/// # Example
///
/// ```rust
/// use crossing::agent::{Agent, SignalAgent};
/// use crossing::core::TransitionTable;
///
/// let table = TransitionTable::intersection();
/// let mut car = Agent::new(&table, "car drive").unwrap();
/// let mut man = Agent::new(&table, "man stop").unwrap();
/// let mut signal = SignalAgent::new(&table, "signal green").unwrap();
///
/// signal.advance(&mut car, &mut man).unwrap();
/// assert_eq!(signal.current_state_name(), "signal orange");
///
/// let report = signal.advance(&mut car, &mut man).unwrap();
/// assert_eq!(report.signal_event, "signal is red");
/// assert!(report.fully_propagated());
/// assert_eq!(car.current_state_name(), "car signalStop");
/// assert_eq!(man.current_state_name(), "man walk");
/// ```
#[derive(Clone, Debug)]
pub struct SignalAgent<'t> {
    agent: Agent<'t>,
}

impl<'t> SignalAgent<'t> {
    /// Place the signal on `initial` and check its cycle closes.
    pub fn new(table: &'t TransitionTable, initial: &str) -> Result<Self, TableError> {
        if !table.contains_state(initial) {
            return Err(TableError::UnknownState {
                state: initial.to_string(),
            });
        }

        let current = table
            .find_state_entry(initial, Visibility::Visible)
            .ok_or_else(|| TableError::BrokenCycle {
                state: initial.to_string(),
            })?;

        check_cycle(table, initial)?;

        Ok(Self {
            agent: Agent::from_index(table, current)?,
        })
    }

    /// Turn to the next colour, then apply the forcing policy to `car` and
    /// `pedestrian`.
    ///
    /// Only the signal's own move can fail this call. Failures of forced
    /// moves are logged and returned inside the report.
    pub fn advance(
        &mut self,
        car: &mut Agent<'_>,
        pedestrian: &mut Agent<'_>,
    ) -> Result<AdvanceReport, TransitionError> {
        let table = self.agent.table();
        let entry = &table[self.agent.current_index()];

        let Some(resting) = table.find_state_entry(&entry.to, Visibility::Visible) else {
            error!(from = %entry.from, to = %entry.to, "signal has no entry for its next colour");
            return Err(TransitionError::TableInconsistency {
                state: entry.to.clone(),
            });
        };

        self.agent
            .settle(resting, &entry.from, &entry.to, &table[resting].event, false);

        let state = self.current_state_name();
        info!(from = %entry.from, to = state, "signal changed");

        let forced = match FORCING_POLICY.iter().find(|rule| rule.signal == state) {
            Some(rule) => vec![
                force(AgentRole::Car, car, rule.car),
                force(AgentRole::Pedestrian, pedestrian, rule.pedestrian),
            ],
            None => Vec::new(),
        };

        Ok(AdvanceReport {
            state: state.to_string(),
            signal_event: self.current_event_label().to_string(),
            forced,
        })
    }

    pub fn current_state_name(&self) -> &'t str {
        self.agent.current_state_name()
    }

    pub fn current_event_label(&self) -> &'t str {
        self.agent.current_event_label()
    }

    /// The colour the next [`advance`](Self::advance) will turn to.
    pub fn next_state_name(&self) -> &'t str {
        &self.agent.table()[self.agent.current_index()].to
    }

    pub fn current_index(&self) -> usize {
        self.agent.current_index()
    }

    pub fn history(&self) -> &AgentHistory {
        self.agent.history()
    }
}

fn force(role: AgentRole, agent: &mut Agent<'_>, target: &'static str) -> ForcedMove {
    let outcome = agent.force(target).map(str::to_string);
    if let Err(err) = &outcome {
        warn!(%role, target, error = %err, "forced move not applied");
    }
    ForcedMove {
        role,
        target,
        outcome,
    }
}

/// Follow `to` from `start` until the cycle returns to `start`.
///
/// A closed cycle visits at most every entry once, so one extra step is
/// enough to reach the state where an open chain breaks.
fn check_cycle(table: &TransitionTable, start: &str) -> Result<(), TableError> {
    let mut state = start;

    for _ in 0..=table.len() {
        let index = table
            .find_state_entry(state, Visibility::Visible)
            .ok_or_else(|| TableError::BrokenCycle {
                state: state.to_string(),
            })?;
        state = &table[index].to;
        if state == start {
            return Ok(());
        }
    }

    Err(TableError::BrokenCycle {
        state: start.to_string(),
    })
}
