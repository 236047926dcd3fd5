//! Stepper state machine for the registration form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The registration form steps, in presentation order.
///
/// Steps are a closed set so that every dispatch over the current step
/// is an exhaustive match; adding a step breaks call sites at compile
/// time instead of falling through a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStep {
    GymInfo,
    MembershipInfo,
}

impl RegistrationStep {
    /// All steps in presentation order.
    pub const SEQUENCE: [RegistrationStep; 2] =
        [RegistrationStep::GymInfo, RegistrationStep::MembershipInfo];

    /// Returns the step identifier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStep::GymInfo => "gym-info",
            RegistrationStep::MembershipInfo => "membership-info",
        }
    }

    /// Returns the step title shown in the progress indicator.
    pub fn title(&self) -> &'static str {
        match self {
            RegistrationStep::GymInfo => "Gym",
            RegistrationStep::MembershipInfo => "Finish",
        }
    }

    /// Returns the step description shown in the progress indicator.
    pub fn description(&self) -> &'static str {
        match self {
            RegistrationStep::GymInfo => "Gym information",
            RegistrationStep::MembershipInfo => "Membership confirmation",
        }
    }

    /// Returns the 1-based step number.
    pub fn number(&self) -> usize {
        match self {
            RegistrationStep::GymInfo => 1,
            RegistrationStep::MembershipInfo => 2,
        }
    }

    /// The step after this one; the last step yields itself.
    pub fn next(self) -> Self {
        match self {
            RegistrationStep::GymInfo => RegistrationStep::MembershipInfo,
            RegistrationStep::MembershipInfo => RegistrationStep::MembershipInfo,
        }
    }

    /// The step before this one; the first step yields itself.
    pub fn prev(self) -> Self {
        match self {
            RegistrationStep::GymInfo => RegistrationStep::GymInfo,
            RegistrationStep::MembershipInfo => RegistrationStep::GymInfo,
        }
    }

    /// Returns true if this is the first step.
    pub fn is_first(&self) -> bool {
        *self == Self::SEQUENCE[0]
    }

    /// Returns true if this is the last step.
    pub fn is_last(&self) -> bool {
        *self == Self::SEQUENCE[Self::SEQUENCE.len() - 1]
    }
}

impl std::fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for RegistrationStep {
    fn default() -> Self {
        Self::SEQUENCE[0]
    }
}

/// Sequencer over the registration steps.
///
/// Owns the current position and the set of completed steps for the
/// lifetime of one registration session. Completion is recorded by the
/// step submit handlers and read back for progress display only; it
/// deliberately does not gate `advance`, matching the observed form
/// behavior.
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    current: RegistrationStep,
    completed: BTreeSet<RegistrationStep>,
}

impl Stepper {
    /// Creates a stepper positioned at the first step with nothing
    /// completed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The step currently shown.
    pub fn current(&self) -> RegistrationStep {
        self.current
    }

    /// Moves to the next step; no-op when already at the last step.
    pub fn advance(&mut self) {
        self.current = self.current.next();
    }

    /// Moves to the previous step; no-op when already at the first step.
    pub fn retreat(&mut self) {
        self.current = self.current.prev();
    }

    /// Records a step as completed. Recording the same step twice has
    /// no effect.
    pub fn complete(&mut self, step: RegistrationStep) {
        self.completed.insert(step);
    }

    /// The set of completed steps, for progress display.
    pub fn completed(&self) -> &BTreeSet<RegistrationStep> {
        &self.completed
    }

    /// Returns true if the given step has been completed.
    pub fn is_completed(&self, step: RegistrationStep) -> bool {
        self.completed.contains(&step)
    }
}
