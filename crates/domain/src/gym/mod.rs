//! Gym registration data model.

pub mod validation;
pub mod value_objects;

pub use validation::{FieldError, ValidationError};
pub use value_objects::{
    DaySchedule, GymCode, GymInformation, GymRegistrationData, MembershipAcknowledgement,
    ThemeColor, TimeOfDay, TimeRange, Weekday,
};
