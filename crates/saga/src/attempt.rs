//! The record of one registration saga run.

use common::{GymId, UserId};

use crate::error::SagaError;
use crate::registration;
use crate::state::SagaState;

/// Tracks the state of a single registration attempt.
///
/// The orchestrator owns an attempt for the duration of one run and
/// hands it back with a terminal state; it is discarded afterwards.
/// Retrying means a brand-new attempt with re-entered data, never a
/// resume of this one.
#[derive(Debug, Clone, Default)]
pub struct RegistrationAttempt {
    state: SagaState,
    completed_steps: Vec<&'static str>,
    gym_id: Option<GymId>,
    gym_name: Option<String>,
    slug: Option<String>,
    admin_user_id: Option<UserId>,
    failed_step: Option<&'static str>,
    failure_reason: Option<String>,
    code_conflict: bool,
    compensation_failed: bool,
}

/// The terminal result of a registration attempt, as shown to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Succeeded {
        gym_id: GymId,
        gym_name: String,
        slug: String,
    },
    Failed {
        message: String,
    },
}

impl RegistrationOutcome {
    /// Returns true for a successful outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Succeeded { .. })
    }
}

impl RegistrationAttempt {
    /// Starts a new pending attempt.
    pub(crate) fn begin() -> Self {
        Self {
            state: SagaState::Pending,
            ..Self::default()
        }
    }

    pub(crate) fn step_completed(&mut self, step: &'static str) {
        self.completed_steps.push(step);
    }

    pub(crate) fn gym_created(&mut self, gym_id: GymId, name: &str, slug: &str) {
        self.gym_id = Some(gym_id);
        self.gym_name = Some(name.to_string());
        self.slug = Some(slug.to_string());
    }

    pub(crate) fn admin_created(&mut self, user_id: UserId) {
        self.admin_user_id = Some(user_id);
    }

    pub(crate) fn fail(&mut self, step: &'static str, error: &SagaError) {
        self.state = SagaState::Failed;
        self.failed_step = Some(step);
        self.code_conflict = error.is_duplicate_code();
        self.failure_reason = Some(match step {
            registration::STEP_CREATE_ADMIN_USER => {
                format!("creating the administrator account failed: {error}")
            }
            _ => error.to_string(),
        });
    }

    pub(crate) fn compensation_failed(&mut self) {
        self.compensation_failed = true;
    }

    pub(crate) fn succeed(&mut self) {
        self.state = SagaState::Succeeded;
    }

    /// The saga state of this attempt.
    pub fn state(&self) -> SagaState {
        self.state
    }

    /// Names of the steps that completed, in execution order.
    pub fn completed_steps(&self) -> &[&'static str] {
        &self.completed_steps
    }

    /// The created gym's ID, once step 1 has committed.
    pub fn gym_id(&self) -> Option<GymId> {
        self.gym_id
    }

    /// The created administrator's user ID, once step 2 has committed.
    pub fn admin_user_id(&self) -> Option<UserId> {
        self.admin_user_id
    }

    /// The step whose failure terminated the attempt, if any.
    pub fn failed_step(&self) -> Option<&'static str> {
        self.failed_step
    }

    /// The failure message, if the attempt failed.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Returns true if the failure was a gym-code uniqueness violation.
    pub fn is_code_conflict(&self) -> bool {
        self.code_conflict
    }

    /// Returns true if the compensating delete itself failed and the
    /// orphaned gym record needs manual cleanup.
    pub fn needs_manual_cleanup(&self) -> bool {
        self.compensation_failed
    }

    /// The terminal outcome of this attempt.
    ///
    /// The orchestrator always returns attempts in a terminal state; a
    /// non-terminal attempt reads as a generic failure.
    pub fn outcome(&self) -> RegistrationOutcome {
        match (self.state, self.gym_id) {
            (SagaState::Succeeded, Some(gym_id)) => RegistrationOutcome::Succeeded {
                gym_id,
                gym_name: self.gym_name.clone().unwrap_or_default(),
                slug: self.slug.clone().unwrap_or_default(),
            },
            _ => RegistrationOutcome::Failed {
                message: self
                    .failure_reason
                    .clone()
                    .unwrap_or_else(|| "registration failed".to_string()),
            },
        }
    }
}
