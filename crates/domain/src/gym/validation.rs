//! Pure validation contracts for the registration form fields.
//!
//! Each function maps a candidate value to `Ok(())` or a deterministic,
//! human-readable error. Nothing here performs I/O or panics; the saga
//! layer can rely on submissions having passed these checks.

use thiserror::Error;
use url::Url;

use crate::gym::value_objects::{DaySchedule, GymInformation, GymRegistrationData, TimeRange};

/// A field-level validation failure with a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("gym name must be between 2 and 100 characters")]
    NameLength,

    #[error("address must be between 5 and 255 characters")]
    AddressLength,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("theme must be one of: blue, red, orange, yellow")]
    InvalidTheme,

    #[error("code must be between 3 and 10 characters")]
    CodeLength,

    #[error("code may only contain uppercase letters and digits")]
    CodeFormat,

    #[error("logo URL must be a valid URL")]
    InvalidLogoUrl,

    #[error("day must be a weekday name from monday to sunday")]
    InvalidWeekday,

    #[error("time must be in HH:MM format")]
    InvalidTimeFormat,

    #[error("closing time must be after opening time")]
    EndNotAfterStart,

    #[error("open days must have at least one time range")]
    OpenDayWithoutHours,

    #[error("closed days cannot have time ranges")]
    ClosedDayWithHours,

    #[error("schedule must cover each of the seven days exactly once")]
    IncompleteSchedule,

    #[error("must confirm to continue")]
    NotAcknowledged,
}

/// A validation error attributed to a named form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldError {
    pub fn new(field: &'static str, error: ValidationError) -> Self {
        Self { field, error }
    }

    /// The human-readable message for this field.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Gym name: 2–100 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if (2..=100).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::NameLength)
    }
}

/// Address: 5–255 characters.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    let len = address.chars().count();
    if (5..=255).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::AddressLength)
    }
}

/// Email: a single `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }
    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Gym code: 3–10 characters, uppercase letters and digits only.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    let len = code.chars().count();
    if !(3..=10).contains(&len) {
        return Err(ValidationError::CodeLength);
    }
    if code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(ValidationError::CodeFormat)
    }
}

/// Logo URL: empty is treated as absent and is valid; anything else
/// must be a syntactically valid URL.
pub fn validate_logo_url(logo_url: &str) -> Result<(), ValidationError> {
    if logo_url.is_empty() {
        return Ok(());
    }
    Url::parse(logo_url)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidLogoUrl)
}

/// A time range must end strictly after it starts.
pub fn validate_time_range(range: &TimeRange) -> Result<(), ValidationError> {
    if range.end.minutes_from_midnight() > range.start.minutes_from_midnight() {
        Ok(())
    } else {
        Err(ValidationError::EndNotAfterStart)
    }
}

/// Open days carry at least one range; closed days carry none.
pub fn validate_day_schedule(day: &DaySchedule) -> Result<(), ValidationError> {
    if day.is_open && day.time_ranges.is_empty() {
        return Err(ValidationError::OpenDayWithoutHours);
    }
    if !day.is_open && !day.time_ranges.is_empty() {
        return Err(ValidationError::ClosedDayWithHours);
    }
    for range in &day.time_ranges {
        validate_time_range(range)?;
    }
    Ok(())
}

/// The weekly schedule must cover each of the seven days exactly once,
/// and each day must satisfy its own invariants.
pub fn validate_schedule(schedule: &[DaySchedule]) -> Result<(), ValidationError> {
    if schedule.len() != 7 {
        return Err(ValidationError::IncompleteSchedule);
    }
    let mut seen = [false; 7];
    for day in schedule {
        let idx = day.day as usize;
        if seen[idx] {
            return Err(ValidationError::IncompleteSchedule);
        }
        seen[idx] = true;
        validate_day_schedule(day)?;
    }
    Ok(())
}

/// The acknowledgement flag must be `true`.
pub fn validate_acknowledgement(acknowledged: bool) -> Result<(), ValidationError> {
    if acknowledged {
        Ok(())
    } else {
        Err(ValidationError::NotAcknowledged)
    }
}

/// Validates every gym field, reporting the first error per field.
pub fn validate_gym(gym: &GymInformation) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_name(&gym.name) {
        errors.push(FieldError::new("name", e));
    }
    if let Err(e) = validate_address(&gym.address) {
        errors.push(FieldError::new("address", e));
    }
    if let Err(e) = validate_email(&gym.email) {
        errors.push(FieldError::new("email", e));
    }
    if let Some(logo_url) = gym.logo_url.as_deref() {
        if let Err(e) = validate_logo_url(logo_url) {
            errors.push(FieldError::new("logo_url", e));
        }
    }
    if let Err(e) = validate_schedule(&gym.schedule) {
        errors.push(FieldError::new("schedule", e));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validates a complete submission: all gym fields plus the
/// acknowledgement flag.
pub fn validate_registration(data: &GymRegistrationData) -> Result<(), Vec<FieldError>> {
    let mut errors = match validate_gym(&data.gym) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };
    if let Err(e) = validate_acknowledgement(data.membership.acknowledged) {
        errors.push(FieldError::new("acknowledged", e));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
