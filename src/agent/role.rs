//! Agent roles at the intersection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which agent a command is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Car,
    Pedestrian,
    Signal,
}

impl AgentRole {
    /// Prefix the role's state names carry in the table.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Pedestrian => "man",
            Self::Signal => "signal",
        }
    }

    /// Full state name for a command verb, e.g. `car` + `stop` -> `car stop`.
    pub fn state_for(self, verb: &str) -> String {
        format!("{} {}", self.prefix(), verb)
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => f.write_str("car"),
            Self::Pedestrian => f.write_str("pedestrian"),
            Self::Signal => f.write_str("signal"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Agent '{0}' not supported, expected 'signal', 'man' or 'car'")]
pub struct UnknownRole(pub String);

impl FromStr for AgentRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "man" | "pedestrian" => Ok(Self::Pedestrian),
            "signal" => Ok(Self::Signal),
            _ => Err(UnknownRole(s.trim().to_string())),
        }
    }
}
