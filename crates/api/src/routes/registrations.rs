//! Gym registration endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{
    DaySchedule, FieldError, GymCode, GymInformation, GymRegistrationData,
    MembershipAcknowledgement, ThemeColor, TimeOfDay, TimeRange, Weekday, validation,
};
use saga::{
    GymDirectory, IdentityService, Mailer, RegistrationLog, RegistrationOrchestrator,
    RegistrationOutcome,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<G, I, L, M>
where
    G: GymDirectory,
    I: IdentityService,
    L: RegistrationLog,
    M: Mailer,
{
    pub orchestrator: RegistrationOrchestrator<G, I, L, M>,
}

// -- Request types --

/// Registration submission payload; field names follow the directory's
/// create-gym wire contract.
#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub gym_name: String,
    pub email: String,
    pub address: String,
    pub theme_color: String,
    pub gym_code: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub schedule: Vec<DayScheduleRequest>,
    pub acknowledged: bool,
}

#[derive(Deserialize)]
pub struct DayScheduleRequest {
    pub day: String,
    pub is_open: bool,
    #[serde(default)]
    pub time_ranges: Vec<TimeRangeRequest>,
}

#[derive(Deserialize)]
pub struct TimeRangeRequest {
    pub start: String,
    pub end: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct RegistrationResponse {
    pub gym_id: i64,
    pub gym_name: String,
    pub slug: String,
}

// -- Handlers --

/// POST /registrations — validate a submission and run the saga.
#[tracing::instrument(skip(state, req))]
pub async fn create<G, I, L, M>(
    State(state): State<Arc<AppState<G, I, L, M>>>,
    Json(req): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError>
where
    G: GymDirectory + 'static,
    I: IdentityService + 'static,
    L: RegistrationLog + 'static,
    M: Mailer + 'static,
{
    let data = assemble(req).map_err(ApiError::Validation)?;
    let attempt = state.orchestrator.execute(&data).await?;

    match attempt.outcome() {
        RegistrationOutcome::Succeeded {
            gym_id,
            gym_name,
            slug,
        } => Ok((
            StatusCode::CREATED,
            Json(RegistrationResponse {
                gym_id: gym_id.as_i64(),
                gym_name,
                slug,
            }),
        )),
        RegistrationOutcome::Failed { message } => {
            if attempt.is_code_conflict() {
                Err(ApiError::CodeConflict(message))
            } else {
                Err(ApiError::RegistrationFailed(message))
            }
        }
    }
}

/// Validates the raw submission and assembles the typed registration
/// data. All field errors are collected so the form can show them
/// inline; any error stops the submission before the saga is invoked.
fn assemble(req: RegistrationRequest) -> Result<GymRegistrationData, Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(e) = validation::validate_name(&req.gym_name) {
        errors.push(FieldError::new("gym_name", e));
    }
    if let Err(e) = validation::validate_address(&req.address) {
        errors.push(FieldError::new("address", e));
    }
    if let Err(e) = validation::validate_email(&req.email) {
        errors.push(FieldError::new("email", e));
    }

    let theme = match req.theme_color.parse::<ThemeColor>() {
        Ok(theme) => Some(theme),
        Err(e) => {
            errors.push(FieldError::new("theme_color", e));
            None
        }
    };

    let code = match GymCode::parse(req.gym_code.as_str()) {
        Ok(code) => Some(code),
        Err(e) => {
            errors.push(FieldError::new("gym_code", e));
            None
        }
    };

    // Empty string means no logo.
    let logo_url = req.logo_url.filter(|url| !url.is_empty());
    if let Some(url) = logo_url.as_deref() {
        if let Err(e) = validation::validate_logo_url(url) {
            errors.push(FieldError::new("logo_url", e));
        }
    }

    let mut schedule = Vec::with_capacity(req.schedule.len());
    let mut schedule_parsed = true;
    for day_req in &req.schedule {
        match parse_day(day_req) {
            Ok(day) => schedule.push(day),
            Err(e) => {
                schedule_parsed = false;
                errors.push(FieldError::new("schedule", e));
                break;
            }
        }
    }
    if schedule_parsed {
        if let Err(e) = validation::validate_schedule(&schedule) {
            errors.push(FieldError::new("schedule", e));
        }
    }

    if let Err(e) = validation::validate_acknowledgement(req.acknowledged) {
        errors.push(FieldError::new("acknowledged", e));
    }

    match (theme, code) {
        (Some(theme), Some(code)) if errors.is_empty() => Ok(GymRegistrationData {
            gym: GymInformation {
                name: req.gym_name,
                address: req.address,
                email: req.email,
                theme,
                logo_url,
                code,
                schedule,
            },
            membership: MembershipAcknowledgement {
                acknowledged: req.acknowledged,
            },
        }),
        _ => Err(errors),
    }
}

fn parse_day(req: &DayScheduleRequest) -> Result<DaySchedule, domain::ValidationError> {
    let day: Weekday = req.day.parse()?;
    let mut time_ranges = Vec::with_capacity(req.time_ranges.len());
    for range in &req.time_ranges {
        time_ranges.push(TimeRange::new(
            TimeOfDay::parse(&range.start)?,
            TimeOfDay::parse(&range.end)?,
        ));
    }
    Ok(DaySchedule {
        day,
        is_open: req.is_open,
        time_ranges,
    })
}
