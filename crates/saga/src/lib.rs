//! Saga pattern implementation for gym registration.
//!
//! This crate orchestrates the multi-step registration transaction
//! against the external identity and data service, with a compensating
//! action on failure.
//!
//! The registration saga follows these steps:
//! 1. Create the gym record
//! 2. Create the administrator identity and profile
//! 3. Record the registration event (best-effort)
//! 4. Send the welcome email (best-effort)
//!
//! Steps 1–2 decide the terminal outcome; if step 2 fails the gym
//! record from step 1 is deleted before the failure is reported.
//! Steps 3–4 are fire-and-forget: their failures are logged and
//! swallowed because the registration is already complete.

pub mod attempt;
pub mod error;
pub mod orchestrator;
pub mod password;
pub mod registration;
pub mod services;
pub mod state;

pub use attempt::{RegistrationAttempt, RegistrationOutcome};
pub use error::SagaError;
pub use orchestrator::RegistrationOrchestrator;
pub use password::TempPassword;
pub use services::{
    CreatedGym, CreatedUser, GymDirectory, IdentityService, InMemoryGymDirectory,
    InMemoryIdentityService, InMemoryMailer, InMemoryRegistrationLog, Mailer, NewAdminUser,
    NewGym, RegistrationLog, RegistrationRecord, WelcomeEmail,
};
pub use state::SagaState;
