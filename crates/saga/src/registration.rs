//! Registration saga constants.

/// The saga type identifier for gym registration.
pub const SAGA_TYPE: &str = "GymRegistration";

/// Step name: Create the gym record in the directory.
pub const STEP_CREATE_GYM: &str = "create_gym";

/// Step name: Create the administrator identity and profile.
pub const STEP_CREATE_ADMIN_USER: &str = "create_admin_user";

/// Step name: Record the registration event (best-effort).
pub const STEP_RECORD_REGISTRATION: &str = "record_registration";

/// Step name: Send the welcome email (best-effort).
pub const STEP_SEND_WELCOME_EMAIL: &str = "send_welcome_email";
