//! Orchestrator driving the registration saga.

use common::TenantId;
use domain::GymRegistrationData;

use crate::attempt::RegistrationAttempt;
use crate::error::SagaError;
use crate::password::TempPassword;
use crate::registration;
use crate::services::audit::{RegistrationLog, RegistrationRecord};
use crate::services::gym_directory::{CreatedGym, GymDirectory, NewGym};
use crate::services::identity::{IdentityService, NewAdminUser};
use crate::services::mailer::{Mailer, WelcomeEmail};

/// Orchestrates the execution of gym registration sagas.
///
/// Drives the remote creation sequence exactly once per submission:
/// create gym → create administrator identity → record registration →
/// send welcome email. Each call is awaited before the next begins;
/// step 2 needs the gym ID from step 1, and the compensating delete in
/// the failure path needs step 1 to have committed.
pub struct RegistrationOrchestrator<G, I, L, M>
where
    G: GymDirectory,
    I: IdentityService,
    L: RegistrationLog,
    M: Mailer,
{
    gym_directory: G,
    identity: I,
    registration_log: L,
    mailer: M,
    tenant_id: TenantId,
    login_url: String,
}

impl<G, I, L, M> RegistrationOrchestrator<G, I, L, M>
where
    G: GymDirectory,
    I: IdentityService,
    L: RegistrationLog,
    M: Mailer,
{
    /// Creates a new registration orchestrator for the given tenant.
    pub fn new(
        gym_directory: G,
        identity: I,
        registration_log: L,
        mailer: M,
        tenant_id: TenantId,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            gym_directory,
            identity,
            registration_log,
            mailer,
            tenant_id,
            login_url: login_url.into(),
        }
    }

    /// Executes the registration saga for one assembled submission.
    ///
    /// Returns `Err` only when the acknowledgement invariant is
    /// violated; every other failure terminates the attempt, which is
    /// returned with its terminal state and outcome.
    #[tracing::instrument(
        skip(self, data),
        fields(saga_type = registration::SAGA_TYPE, gym_code = %data.gym.code)
    )]
    pub async fn execute(
        &self,
        data: &GymRegistrationData,
    ) -> Result<RegistrationAttempt, SagaError> {
        if !data.membership.acknowledged {
            return Err(SagaError::NotAcknowledged);
        }

        metrics::counter!("registration_sagas_total").increment(1);
        let saga_start = std::time::Instant::now();
        let mut attempt = RegistrationAttempt::begin();

        // Step 1: Create the gym record. Nothing exists yet, so a
        // failure here terminates the saga with no compensation.
        tracing::info!(step = registration::STEP_CREATE_GYM, "saga step started");
        let gym = NewGym::from_registration(self.tenant_id, &data.gym);
        let created = match self.gym_directory.create_gym(gym).await {
            Ok(created) => {
                attempt.step_completed(registration::STEP_CREATE_GYM);
                attempt.gym_created(created.id, &created.name, &created.slug);
                created
            }
            Err(e) => {
                tracing::warn!(
                    step = registration::STEP_CREATE_GYM,
                    error = %e,
                    "saga step failed"
                );
                attempt.fail(registration::STEP_CREATE_GYM, &e);
                self.finish(&attempt, saga_start);
                return Ok(attempt);
            }
        };

        // Step 2: Create the administrator identity with a freshly
        // generated temporary password. On failure the gym record from
        // step 1 is deleted before the failure is reported.
        tracing::info!(
            step = registration::STEP_CREATE_ADMIN_USER,
            "saga step started"
        );
        let password = TempPassword::generate();
        let admin = NewAdminUser {
            email: data.gym.email.clone(),
            password: password.clone(),
            gym_name: created.name.clone(),
            gym_id: created.id,
            tenant_id: self.tenant_id,
        };
        match self.identity.create_admin_user(admin).await {
            Ok(user) => {
                attempt.step_completed(registration::STEP_CREATE_ADMIN_USER);
                attempt.admin_created(user.id);
            }
            Err(e) => {
                tracing::warn!(
                    step = registration::STEP_CREATE_ADMIN_USER,
                    error = %e,
                    "saga step failed"
                );
                self.compensate(&mut attempt, &created).await;
                attempt.fail(registration::STEP_CREATE_ADMIN_USER, &e);
                self.finish(&attempt, saga_start);
                return Ok(attempt);
            }
        }

        // Post-commit side effects. Each is independent and
        // best-effort: the registration is already functionally
        // complete, so a failure here is logged and swallowed.

        // Step 3: Record the registration event.
        let record = RegistrationRecord::completed(
            created.name.clone(),
            data.gym.email.clone(),
            self.tenant_id,
        );
        self.best_effort(
            &mut attempt,
            registration::STEP_RECORD_REGISTRATION,
            self.registration_log.record(record).await,
        );

        // Step 4: Send the welcome email carrying the credentials.
        let email = WelcomeEmail {
            to: data.gym.email.clone(),
            gym_name: created.name.clone(),
            password,
            login_url: self.login_url.clone(),
        };
        let delivered = self.best_effort(
            &mut attempt,
            registration::STEP_SEND_WELCOME_EMAIL,
            self.mailer.send_welcome(email).await,
        );
        if !delivered {
            // The password only exists inside that email payload.
            tracing::warn!("temporary password was not communicated; a reset will be needed");
        }

        attempt.succeed();
        self.finish(&attempt, saga_start);
        Ok(attempt)
    }

    /// Deletes the gym record created in step 1 after a later step
    /// failed. Runs to completion before the failure is reported; if
    /// the delete itself fails the orphaned record needs manual
    /// cleanup, which is flagged but does not mask the original
    /// failure.
    async fn compensate(&self, attempt: &mut RegistrationAttempt, created: &CreatedGym) {
        tracing::info!(
            gym_id = %created.id,
            step = registration::STEP_CREATE_GYM,
            "compensation started"
        );
        match self.gym_directory.delete_gym(created.id).await {
            Ok(()) => {
                tracing::info!(gym_id = %created.id, "compensating delete completed");
            }
            Err(e) => {
                attempt.compensation_failed();
                tracing::error!(
                    gym_id = %created.id,
                    slug = %created.slug,
                    error = %e,
                    "compensating delete failed; gym record requires manual cleanup"
                );
            }
        }
    }

    /// Wraps a post-commit side effect: a success is recorded on the
    /// attempt, a failure is reported through tracing and swallowed.
    /// Returns whether the step succeeded.
    fn best_effort(
        &self,
        attempt: &mut RegistrationAttempt,
        step: &'static str,
        result: Result<(), SagaError>,
    ) -> bool {
        match result {
            Ok(()) => {
                attempt.step_completed(step);
                true
            }
            Err(e) => {
                tracing::warn!(step, error = %e, "best-effort saga step failed");
                false
            }
        }
    }

    fn finish(&self, attempt: &RegistrationAttempt, saga_start: std::time::Instant) {
        let duration = saga_start.elapsed().as_secs_f64();
        metrics::histogram!("registration_duration_seconds").record(duration);
        match attempt.state() {
            crate::state::SagaState::Succeeded => {
                metrics::counter!("registration_succeeded").increment(1);
                tracing::info!(
                    gym_id = ?attempt.gym_id(),
                    duration,
                    "registration saga completed successfully"
                );
            }
            _ => {
                metrics::counter!("registration_failed").increment(1);
                tracing::warn!(
                    failed_step = ?attempt.failed_step(),
                    reason = ?attempt.failure_reason(),
                    duration,
                    "registration saga failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempt::RegistrationOutcome;
    use crate::services::audit::InMemoryRegistrationLog;
    use crate::services::gym_directory::InMemoryGymDirectory;
    use crate::services::identity::InMemoryIdentityService;
    use crate::services::mailer::InMemoryMailer;
    use crate::state::SagaState;
    use domain::{
        DaySchedule, GymCode, GymInformation, MembershipAcknowledgement, ThemeColor,
    };

    type TestOrchestrator = RegistrationOrchestrator<
        InMemoryGymDirectory,
        InMemoryIdentityService,
        InMemoryRegistrationLog,
        InMemoryMailer,
    >;

    fn setup() -> (
        TestOrchestrator,
        InMemoryGymDirectory,
        InMemoryIdentityService,
        InMemoryRegistrationLog,
        InMemoryMailer,
    ) {
        let directory = InMemoryGymDirectory::new();
        let identity = InMemoryIdentityService::new();
        let log = InMemoryRegistrationLog::new();
        let mailer = InMemoryMailer::new();

        let orchestrator = RegistrationOrchestrator::new(
            directory.clone(),
            identity.clone(),
            log.clone(),
            mailer.clone(),
            TenantId::new(),
            "http://localhost:3000/login",
        );

        (orchestrator, directory, identity, log, mailer)
    }

    fn registration(code: &str) -> GymRegistrationData {
        GymRegistrationData {
            gym: GymInformation {
                name: "Fit Center".to_string(),
                address: "123 Main St, Springfield".to_string(),
                email: "a@b.com".to_string(),
                theme: ThemeColor::Blue,
                logo_url: None,
                code: GymCode::parse(code).unwrap(),
                schedule: DaySchedule::closed_week(),
            },
            membership: MembershipAcknowledgement { acknowledged: true },
        }
    }

    #[tokio::test]
    async fn test_happy_path() {
        let (orchestrator, directory, identity, log, mailer) = setup();

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Succeeded);
        assert_eq!(
            attempt.completed_steps(),
            &[
                registration::STEP_CREATE_GYM,
                registration::STEP_CREATE_ADMIN_USER,
                registration::STEP_RECORD_REGISTRATION,
                registration::STEP_SEND_WELCOME_EMAIL,
            ]
        );
        match attempt.outcome() {
            RegistrationOutcome::Succeeded { gym_name, slug, .. } => {
                assert_eq!(gym_name, "Fit Center");
                assert_eq!(slug, "FIT01");
            }
            RegistrationOutcome::Failed { message } => panic!("unexpected failure: {message}"),
        }

        assert_eq!(directory.gym_count(), 1);
        assert_eq!(identity.user_count(), 1);
        assert_eq!(log.record_count(), 1);
        assert_eq!(mailer.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_welcome_email_contains_the_generated_credentials() {
        let (orchestrator, _, _, _, mailer) = setup();

        orchestrator.execute(&registration("FIT01")).await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].gym_name, "Fit Center");
        assert_eq!(sent[0].login_url, "http://localhost:3000/login");
        assert!(sent[0].password.expose().len() >= 12);
    }

    #[tokio::test]
    async fn test_gym_creation_failure_makes_no_further_calls() {
        let (orchestrator, directory, identity, log, mailer) = setup();
        directory.set_fail_on_create(true);

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Failed);
        assert_eq!(attempt.failed_step(), Some(registration::STEP_CREATE_GYM));
        assert!(attempt.completed_steps().is_empty());
        assert!(!attempt.needs_manual_cleanup());

        // No compensation and no downstream calls of any kind.
        assert!(directory.delete_calls().is_empty());
        assert_eq!(directory.gym_count(), 0);
        assert_eq!(identity.user_count(), 0);
        assert_eq!(log.record_count(), 0);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_code_failure_passes_the_service_message_through() {
        let (orchestrator, _, _, _, _) = setup();

        orchestrator.execute(&registration("FIT01")).await.unwrap();
        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Failed);
        assert!(attempt.is_code_conflict());
        assert_eq!(
            attempt.failure_reason(),
            Some("gym code 'FIT01' is already in use")
        );
    }

    #[tokio::test]
    async fn test_identity_failure_compensates_with_exactly_the_created_gym() {
        let (orchestrator, directory, identity, log, mailer) = setup();
        identity.set_fail_on_create(true);

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Failed);
        assert_eq!(
            attempt.failed_step(),
            Some(registration::STEP_CREATE_ADMIN_USER)
        );
        assert!(attempt.failure_reason().unwrap().contains("administrator"));
        assert!(!attempt.needs_manual_cleanup());

        // Exactly one compensating delete, for exactly the created gym.
        assert_eq!(directory.delete_calls(), vec![attempt.gym_id().unwrap()]);
        assert_eq!(directory.gym_count(), 0);
        assert!(directory.find_by_code("FIT01").is_none());
        assert_eq!(log.record_count(), 0);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_compensation_is_flagged_for_manual_cleanup() {
        let (orchestrator, directory, identity, _, _) = setup();
        identity.set_fail_on_create(true);
        directory.set_fail_on_delete(true);

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        // Still a failure; never reported as success.
        assert_eq!(attempt.state(), SagaState::Failed);
        assert!(attempt.needs_manual_cleanup());
        assert!(attempt.failure_reason().unwrap().contains("administrator"));

        // The orphaned gym record is still there.
        assert_eq!(directory.gym_count(), 1);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_affect_the_outcome() {
        let (orchestrator, directory, identity, log, mailer) = setup();
        log.set_fail_on_record(true);

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Succeeded);
        assert_eq!(log.record_count(), 0);
        // The email still goes out after a failed audit write.
        assert_eq!(mailer.sent_count(), 1);
        assert_eq!(directory.gym_count(), 1);
        assert_eq!(identity.user_count(), 1);
    }

    #[tokio::test]
    async fn test_email_failure_does_not_affect_the_outcome() {
        let (orchestrator, directory, identity, _, mailer) = setup();
        mailer.set_fail_on_send(true);

        let attempt = orchestrator.execute(&registration("FIT01")).await.unwrap();

        assert_eq!(attempt.state(), SagaState::Succeeded);
        match attempt.outcome() {
            RegistrationOutcome::Succeeded { slug, .. } => assert_eq!(slug, "FIT01"),
            RegistrationOutcome::Failed { message } => panic!("unexpected failure: {message}"),
        }
        assert_eq!(mailer.sent_count(), 0);
        assert_eq!(directory.gym_count(), 1);
        assert_eq!(identity.user_count(), 1);
    }

    #[tokio::test]
    async fn test_unacknowledged_submission_never_starts_the_saga() {
        let (orchestrator, directory, _, _, _) = setup();

        let mut data = registration("FIT01");
        data.membership.acknowledged = false;

        let result = orchestrator.execute(&data).await;
        assert!(matches!(result, Err(SagaError::NotAcknowledged)));
        assert_eq!(directory.gym_count(), 0);
    }
}
