//! Transition history tracking.
//!
//! Each agent keeps an in-memory record of the moves it has
//! completed. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed move.
///
/// # Example
///
/// ```rust
/// use crossing::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "car drive".to_string(),
///     to: "car stop".to_string(),
///     event: "car stopping from driving".to_string(),
///     forced: false,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_idle());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being moved from
    pub from: String,
    /// The state being moved to
    pub to: String,
    /// Event label of the transition that matched
    pub event: String,
    /// Whether the move was requested with invisible transitions allowed
    pub forced: bool,
    /// When the move was committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// A move that stayed in the same state.
    pub fn is_idle(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of completed moves.
///
/// [`record`](Self::record) returns a new history with the move appended;
/// [`push`](Self::push) appends in place.
///
/// # Example
///
/// ```rust
/// use crossing::core::{AgentHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = AgentHistory::new();
/// let history = history.record(TransitionRecord {
///     from: "man stop".to_string(),
///     to: "man walk".to_string(),
///     event: "man will be walking".to_string(),
///     forced: false,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec!["man stop", "man walk"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentHistory {
    records: Vec<TransitionRecord>,
}

impl AgentHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a move, returning a new history. The original is unchanged.
    ///
    /// This copies every existing record. Owners that append on each move
    /// should use [`push`](Self::push).
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Append a move in place.
    pub fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// States visited: the first record's source, then every destination.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Number of moves that were forced by another agent.
    pub fn forced_count(&self) -> usize {
        self.records.iter().filter(|r| r.forced).count()
    }

    /// Time between the first and last recorded move.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str, forced: bool) -> TransitionRecord {
        TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            event: format!("{from} -> {to}"),
            forced,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = AgentHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = AgentHistory::new();
        let next = history.record(record("car drive", "car stop", false));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn push_appends_in_place() {
        let mut history = AgentHistory::new();
        history.push(record("car drive", "car stop", false));
        history.push(record("car stop", "car drive", false));

        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), vec!["car drive", "car stop", "car drive"]);
        assert_eq!(history.last().unwrap().event, "car stop -> car drive");
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = AgentHistory::new()
            .record(record("car drive", "car stop", false))
            .record(record("car stop", "car signalStop", true))
            .record(record("car signalStop", "car drive", true));

        assert_eq!(
            history.path(),
            vec!["car drive", "car stop", "car signalStop", "car drive"]
        );
        assert_eq!(history.forced_count(), 2);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = AgentHistory::new().record(record("man stop", "man walk", false));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(record("man walk", "man stop", false));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn idle_record_is_detected() {
        assert!(record("car drive", "car drive", false).is_idle());
        assert!(!record("car drive", "car stop", false).is_idle());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = AgentHistory::new().record(record("man stop", "man walk", false));

        let json = serde_json::to_string(&history).unwrap();
        let back: AgentHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, back);
    }
}
