//! The intersection session: one table, three agents.
//!
//! This is the surface a front end talks to. It turns `(role, verb)`
//! commands into user-level requests and routes the signal command to
//! [`SignalAgent::advance`].

mod config;

pub use config::{
    IntersectionConfig, DEFAULT_CAR_STATE, DEFAULT_PEDESTRIAN_STATE, DEFAULT_SIGNAL_STATE,
};

use crate::agent::{AdvanceReport, Agent, AgentRole, SignalAgent, TransitionError};
use crate::core::{TableError, TransitionTable};
use serde::Serialize;

/// Current state names of the three agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot<'t> {
    pub car: &'t str,
    pub pedestrian: &'t str,
    pub signal: &'t str,
}

/// A car, a pedestrian and a signal sharing one borrowed table.
///
/// # Example
///
/// ```rust
/// use crossing::agent::AgentRole;
/// use crossing::core::TransitionTable;
/// use crossing::intersection::Intersection;
///
/// let table = TransitionTable::intersection();
/// let mut crossing = Intersection::standard(&table).unwrap();
///
/// assert_eq!(
///     crossing.command(AgentRole::Car, "stop").unwrap(),
///     "car stopping from driving"
/// );
/// assert_eq!(crossing.command(AgentRole::Signal, "").unwrap(), "signal is orange");
/// ```
#[derive(Clone, Debug)]
pub struct Intersection<'t> {
    table: &'t TransitionTable,
    car: Agent<'t>,
    pedestrian: Agent<'t>,
    signal: SignalAgent<'t>,
}

impl<'t> Intersection<'t> {
    pub fn new(table: &'t TransitionTable, config: &IntersectionConfig) -> Result<Self, TableError> {
        Ok(Self {
            table,
            car: Agent::new(table, &config.car)?,
            pedestrian: Agent::new(table, &config.pedestrian)?,
            signal: SignalAgent::new(table, &config.signal)?,
        })
    }

    /// Car driving, pedestrian waiting, signal green.
    pub fn standard(table: &'t TransitionTable) -> Result<Self, TableError> {
        Self::new(table, &IntersectionConfig::default())
    }

    /// Run an operator command.
    ///
    /// Car and pedestrian verbs become user-level requests, so system-only
    /// states cannot be reached this way. The signal ignores the verb and
    /// advances, returning its new colour's event label.
    pub fn command(&mut self, role: AgentRole, verb: &str) -> Result<String, TransitionError> {
        match role {
            AgentRole::Car => self
                .car
                .request(&role.state_for(verb))
                .map(str::to_string),
            AgentRole::Pedestrian => self
                .pedestrian
                .request(&role.state_for(verb))
                .map(str::to_string),
            AgentRole::Signal => self.advance_signal().map(|report| report.signal_event),
        }
    }

    /// Advance the signal and force the other two agents.
    pub fn advance_signal(&mut self) -> Result<AdvanceReport, TransitionError> {
        self.signal.advance(&mut self.car, &mut self.pedestrian)
    }

    pub fn car(&self) -> &Agent<'t> {
        &self.car
    }

    pub fn pedestrian(&self) -> &Agent<'t> {
        &self.pedestrian
    }

    pub fn signal(&self) -> &SignalAgent<'t> {
        &self.signal
    }

    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }

    pub fn snapshot(&self) -> Snapshot<'t> {
        Snapshot {
            car: self.car.current_state_name(),
            pedestrian: self.pedestrian.current_state_name(),
            signal: self.signal.current_state_name(),
        }
    }
}
