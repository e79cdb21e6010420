//! Dialog phase state machine
//!
//! Every phase change goes through [`validate_transition`]; anything not in
//! the table is an [`StateMachineError::IllegalTransition`].

use crate::error::StateMachineError;
use serde::{Deserialize, Serialize};

/// Dialog phase
///
/// `Idle` and `Submitting` are the two sub-states of "open".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogPhase {
    /// Modal hidden
    #[default]
    Closed,
    /// Modal shown, waiting for input
    Idle,
    /// Modal shown, creation request in flight
    Submitting,
    /// Controller torn down; terminal
    Unmounted,
}

impl DialogPhase {
    /// Whether the modal is visible
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Idle | Self::Submitting)
    }
}

/// Validates a phase change against the transition table.
pub fn validate_transition(from: DialogPhase, to: DialogPhase) -> Result<(), StateMachineError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition { from, to })
    }
}

/// Phases reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: DialogPhase) -> Vec<DialogPhase> {
    use DialogPhase::*;
    match from {
        Closed => vec![Idle, Unmounted],
        Idle => vec![Closed, Submitting, Unmounted],
        // Closed covers both success and a user dismissing mid-flight.
        Submitting => vec![Closed, Idle, Unmounted],
        Unmounted => vec![],
    }
}

fn allowed(from: DialogPhase, to: DialogPhase) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
