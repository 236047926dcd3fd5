//! Identity service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{GymId, TenantId, UserId};

use crate::error::SagaError;
use crate::password::TempPassword;

/// Role marker stored on administrator profiles.
pub const ADMIN_ROLE: &str = "admin";

/// An administrator identity to create for a freshly registered gym.
///
/// The identity must be auto-confirmed so that no email-verification
/// step blocks the first login.
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub email: String,
    pub password: TempPassword,
    pub gym_name: String,
    pub gym_id: GymId,
    pub tenant_id: TenantId,
}

/// Result of a successful identity creation.
#[derive(Debug, Clone)]
pub struct CreatedUser {
    /// The ID assigned by the identity service.
    pub id: UserId,
    /// The administrator's email.
    pub email: String,
}

/// Trait for identity management operations.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates an auto-confirmed administrator identity and its profile
    /// row linking user, tenant, gym, and role.
    async fn create_admin_user(&self, user: NewAdminUser) -> Result<CreatedUser, SagaError>;
}

/// A stored administrator profile, as the in-memory double records it.
#[derive(Debug, Clone)]
pub struct AdminProfile {
    pub email: String,
    pub gym_id: GymId,
    pub tenant_id: TenantId,
    pub role: &'static str,
    pub confirmed: bool,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    profiles: HashMap<UserId, AdminProfile>,
    fail_on_create: bool,
}

/// In-memory identity service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityService {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

impl InMemoryIdentityService {
    /// Creates a new in-memory identity service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of stored profiles.
    pub fn user_count(&self) -> usize {
        self.state.read().unwrap().profiles.len()
    }

    /// Returns the stored profile for the given user, if any.
    pub fn profile(&self, user_id: UserId) -> Option<AdminProfile> {
        self.state.read().unwrap().profiles.get(&user_id).cloned()
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn create_admin_user(&self, user: NewAdminUser) -> Result<CreatedUser, SagaError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(SagaError::Identity(
                "Error creating auth user".to_string(),
            ));
        }

        let id = UserId::new();
        state.profiles.insert(
            id,
            AdminProfile {
                email: user.email.clone(),
                gym_id: user.gym_id,
                tenant_id: user.tenant_id,
                role: ADMIN_ROLE,
                confirmed: true,
            },
        );

        Ok(CreatedUser {
            id,
            email: user.email,
        })
    }
}
