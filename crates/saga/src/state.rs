//! Saga state machine.

use serde::{Deserialize, Serialize};

/// The state of a registration saga in its lifecycle.
///
/// State transitions:
/// ```text
/// Idle ──► Pending ──┬──► Succeeded
///                    └──► Failed
/// ```
///
/// Both terminal states are final for the attempt; recovering from
/// `Failed` means starting a fresh attempt with re-entered data, never
/// resuming a partial one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SagaState {
    /// No saga has started for this attempt.
    #[default]
    Idle,

    /// Saga steps are being executed; submission is locked out.
    Pending,

    /// Gym and administrator were durably created (terminal state).
    Succeeded,

    /// A critical step failed, after compensation (terminal state).
    Failed,
}

impl SagaState {
    /// Returns true if the saga can begin running.
    pub fn can_run(&self) -> bool {
        matches!(self, SagaState::Idle)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaState::Succeeded | SagaState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Idle => "Idle",
            SagaState::Pending => "Pending",
            SagaState::Succeeded => "Succeeded",
            SagaState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
