//! Starting configuration for an intersection.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAR_STATE: &str = "car drive";
pub const DEFAULT_PEDESTRIAN_STATE: &str = "man stop";
pub const DEFAULT_SIGNAL_STATE: &str = "signal green";

/// Initial states of the three agents.
///
/// Missing fields fall back to the defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use crossing::intersection::IntersectionConfig;
///
/// let config = IntersectionConfig::default().signal("signal red");
/// assert_eq!(config.car, "car drive");
/// assert_eq!(config.signal, "signal red");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionConfig {
    pub car: String,
    pub pedestrian: String,
    pub signal: String,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            car: DEFAULT_CAR_STATE.to_string(),
            pedestrian: DEFAULT_PEDESTRIAN_STATE.to_string(),
            signal: DEFAULT_SIGNAL_STATE.to_string(),
        }
    }
}

impl IntersectionConfig {
    pub fn car(mut self, state: impl Into<String>) -> Self {
        self.car = state.into();
        self
    }

    pub fn pedestrian(mut self, state: impl Into<String>) -> Self {
        self.pedestrian = state.into();
        self
    }

    pub fn signal(mut self, state: impl Into<String>) -> Self {
        self.signal = state.into();
        self
    }
}
