//! Domain layer for gym registration.
//!
//! This crate provides the registration data model and its invariants:
//! - Gym value objects (theme, code, weekly schedule, time ranges)
//! - Pure field validation contracts shared by the form steps
//! - The stepper state machine sequencing the registration form

pub mod gym;
pub mod stepper;

pub use gym::validation::{
    self, FieldError, ValidationError, validate_acknowledgement, validate_address, validate_code,
    validate_email, validate_gym, validate_logo_url, validate_name, validate_registration,
};
pub use gym::{
    DaySchedule, GymCode, GymInformation, GymRegistrationData, MembershipAcknowledgement,
    ThemeColor, TimeOfDay, TimeRange, Weekday,
};
pub use stepper::{RegistrationStep, Stepper};
