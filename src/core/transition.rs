//! Transition records: the edges of the transition graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may request a transition.
///
/// Visible transitions can be requested directly by an operator. Invisible
/// transitions are system-forced (a signal stopping a car) and only match
/// when the caller explicitly allows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// User-initiated
    Visible,
    /// System-forced
    Invisible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => f.write_str("visible"),
            Self::Invisible => f.write_str("invisible"),
        }
    }
}

/// One entry in a [`TransitionTable`](super::TransitionTable).
///
/// A transition is an immutable value describing a legal move from `from`
/// to `to`. When `from == to` the entry is a self-loop, which doubles as the
/// idle entry an agent rests on while it stays in that state.
///
/// # Example
///
/// ```rust
/// use crossing::core::{Transition, Visibility};
///
/// let stop = Transition::visible("car drive", "car stop", "car stopping from driving");
/// assert!(!stop.is_self_loop());
/// assert_eq!(stop.visibility, Visibility::Visible);
///
/// let idle = Transition::invisible("car signalStop", "car signalStop", "car is waiting at red signal");
/// assert!(idle.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Source state
    pub from: String,
    /// Destination state
    pub to: String,
    /// Human-readable description of what happens on this move
    pub event: String,
    /// Whether an operator may request this move directly
    pub visibility: Visibility,
}

impl Transition {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        event: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            event: event.into(),
            visibility,
        }
    }

    /// Create a user-requestable transition.
    pub fn visible(
        from: impl Into<String>,
        to: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self::new(from, to, event, Visibility::Visible)
    }

    /// Create a system-only transition.
    pub fn invisible(
        from: impl Into<String>,
        to: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self::new(from, to, event, Visibility::Invisible)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Whether this entry is eligible for a lookup made with `allow_invisible`.
    ///
    /// Visible entries are always eligible. Invisible entries are eligible
    /// only when the caller explicitly allows them.
    pub fn is_eligible(&self, allow_invisible: bool) -> bool {
        self.is_visible() || allow_invisible
    }
}
