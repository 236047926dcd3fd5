//! External service traits and in-memory implementations for saga steps.

pub mod audit;
pub mod gym_directory;
pub mod identity;
pub mod mailer;

pub use audit::{InMemoryRegistrationLog, RegistrationLog, RegistrationRecord};
pub use gym_directory::{CreatedGym, GymDirectory, InMemoryGymDirectory, NewGym};
pub use identity::{CreatedUser, IdentityService, InMemoryIdentityService, NewAdminUser};
pub use mailer::{InMemoryMailer, Mailer, WelcomeEmail};
