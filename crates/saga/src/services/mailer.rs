//! Mailer trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::SagaError;
use crate::password::TempPassword;

/// The welcome email sent after a successful registration.
///
/// Carries the only copy of the temporary password that ever leaves
/// the process; the password field keeps its redacted `Debug`.
#[derive(Debug, Clone)]
pub struct WelcomeEmail {
    pub to: String,
    pub gym_name: String,
    pub password: TempPassword,
    pub login_url: String,
}

/// Trait for sending transactional email.
///
/// Sending is best-effort: a failure is logged, never propagated, and
/// does not affect the registration outcome.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the welcome email with the administrator credentials.
    async fn send_welcome(&self, email: WelcomeEmail) -> Result<(), SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryMailerState {
    sent: Vec<WelcomeEmail>,
    fail_on_send: bool,
}

/// In-memory mailer for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    state: Arc<RwLock<InMemoryMailerState>>,
}

impl InMemoryMailer {
    /// Creates a new in-memory mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the mailer to fail on the next send call.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of sent emails.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns a copy of the sent emails.
    pub fn sent(&self) -> Vec<WelcomeEmail> {
        self.state.read().unwrap().sent.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send_welcome(&self, email: WelcomeEmail) -> Result<(), SagaError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(SagaError::Mailer("Failed to send email".to_string()));
        }

        state.sent.push(email);
        Ok(())
    }
}
