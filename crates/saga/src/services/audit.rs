//! Registration log trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::TenantId;

use crate::error::SagaError;

/// An audit row capturing a completed registration.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
    pub gym_name: String,
    pub email: String,
    pub tenant_id: TenantId,
    /// Marker that the registration reached its completed state.
    pub completed: bool,
    pub recorded_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Builds a completed-state record stamped with the current time.
    pub fn completed(gym_name: impl Into<String>, email: impl Into<String>, tenant_id: TenantId) -> Self {
        Self {
            gym_name: gym_name.into(),
            email: email.into(),
            tenant_id,
            completed: true,
            recorded_at: Utc::now(),
        }
    }
}

/// Trait for recording registration events.
///
/// Recording is best-effort: the orchestrator logs and swallows
/// failures because the registration is already functionally complete
/// by the time this runs.
#[async_trait]
pub trait RegistrationLog: Send + Sync {
    /// Records a registration event.
    async fn record(&self, record: RegistrationRecord) -> Result<(), SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryRegistrationLogState {
    records: Vec<RegistrationRecord>,
    fail_on_record: bool,
}

/// In-memory registration log for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationLog {
    state: Arc<RwLock<InMemoryRegistrationLogState>>,
}

impl InMemoryRegistrationLog {
    /// Creates a new in-memory registration log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the log to fail on the next record call.
    pub fn set_fail_on_record(&self, fail: bool) {
        self.state.write().unwrap().fail_on_record = fail;
    }

    /// Returns the number of stored records.
    pub fn record_count(&self) -> usize {
        self.state.read().unwrap().records.len()
    }

    /// Returns a copy of the stored records.
    pub fn records(&self) -> Vec<RegistrationRecord> {
        self.state.read().unwrap().records.clone()
    }
}

#[async_trait]
impl RegistrationLog for InMemoryRegistrationLog {
    async fn record(&self, record: RegistrationRecord) -> Result<(), SagaError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_record {
            return Err(SagaError::RegistrationLog(
                "Audit store unavailable".to_string(),
            ));
        }

        state.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_registration() {
        let log = InMemoryRegistrationLog::new();
        let tenant_id = TenantId::new();

        log.record(RegistrationRecord::completed("Fit Center", "a@b.com", tenant_id))
            .await
            .unwrap();

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gym_name, "Fit Center");
        assert_eq!(records[0].tenant_id, tenant_id);
        assert!(records[0].completed);
    }

    #[tokio::test]
    async fn test_fail_on_record() {
        let log = InMemoryRegistrationLog::new();
        log.set_fail_on_record(true);

        let result = log
            .record(RegistrationRecord::completed("Fit Center", "a@b.com", TenantId::new()))
            .await;
        assert!(result.is_err());
        assert_eq!(log.record_count(), 0);
    }
}
