//! Gym directory trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{GymId, TenantId};
use domain::{DaySchedule, GymCode, GymInformation, ThemeColor};

use crate::error::SagaError;

/// A gym record to create, tagged with the owning tenant.
#[derive(Debug, Clone)]
pub struct NewGym {
    pub tenant_id: TenantId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub theme: ThemeColor,
    pub logo_url: Option<String>,
    pub code: GymCode,
    pub schedule: Vec<DaySchedule>,
}

impl NewGym {
    /// Builds the directory record from validated gym information.
    pub fn from_registration(tenant_id: TenantId, gym: &GymInformation) -> Self {
        Self {
            tenant_id,
            name: gym.name.clone(),
            address: gym.address.clone(),
            email: gym.email.clone(),
            theme: gym.theme,
            logo_url: gym.logo_url.clone(),
            code: gym.code.clone(),
            schedule: gym.schedule.clone(),
        }
    }
}

/// Result of a successful gym creation.
#[derive(Debug, Clone)]
pub struct CreatedGym {
    /// The numeric ID assigned by the directory.
    pub id: GymId,
    /// The gym's display name.
    pub name: String,
    /// The gym's public slug, derived from its code.
    pub slug: String,
}

/// Trait for gym directory operations.
#[async_trait]
pub trait GymDirectory: Send + Sync {
    /// Creates a gym record. A code collision yields
    /// [`SagaError::DuplicateCode`].
    async fn create_gym(&self, gym: NewGym) -> Result<CreatedGym, SagaError>;

    /// Deletes a previously created gym record. Used only as the
    /// compensating action when administrator creation fails.
    async fn delete_gym(&self, gym_id: GymId) -> Result<(), SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryGymDirectoryState {
    gyms: HashMap<GymId, NewGym>,
    next_id: i64,
    delete_calls: Vec<GymId>,
    fail_on_create: bool,
    fail_on_delete: bool,
}

/// In-memory gym directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGymDirectory {
    state: Arc<RwLock<InMemoryGymDirectoryState>>,
}

impl InMemoryGymDirectory {
    /// Creates a new in-memory gym directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the directory to fail on the next create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures the directory to fail on the next delete call.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Returns the number of stored gyms.
    pub fn gym_count(&self) -> usize {
        self.state.read().unwrap().gyms.len()
    }

    /// Returns true if a gym exists with the given ID.
    pub fn has_gym(&self, gym_id: GymId) -> bool {
        self.state.read().unwrap().gyms.contains_key(&gym_id)
    }

    /// Returns the gym IDs passed to `delete_gym`, in call order,
    /// including calls that were made to fail.
    pub fn delete_calls(&self) -> Vec<GymId> {
        self.state.read().unwrap().delete_calls.clone()
    }

    /// Returns the ID of the gym with the given code, if any.
    pub fn find_by_code(&self, code: &str) -> Option<GymId> {
        let state = self.state.read().unwrap();
        state
            .gyms
            .iter()
            .find(|(_, gym)| gym.code.as_str() == code)
            .map(|(id, _)| *id)
    }
}

#[async_trait]
impl GymDirectory for InMemoryGymDirectory {
    async fn create_gym(&self, gym: NewGym) -> Result<CreatedGym, SagaError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(SagaError::GymDirectory("Service unavailable".to_string()));
        }

        // Code uniqueness is enforced here, as the real directory does.
        if state.gyms.values().any(|g| g.code == gym.code) {
            return Err(SagaError::DuplicateCode {
                code: gym.code.as_str().to_string(),
            });
        }

        state.next_id += 1;
        let id = GymId::new(state.next_id);
        let created = CreatedGym {
            id,
            name: gym.name.clone(),
            slug: gym.code.as_str().to_string(),
        };
        state.gyms.insert(id, gym);

        Ok(created)
    }

    async fn delete_gym(&self, gym_id: GymId) -> Result<(), SagaError> {
        let mut state = self.state.write().unwrap();
        state.delete_calls.push(gym_id);

        if state.fail_on_delete {
            return Err(SagaError::GymDirectory("Service unavailable".to_string()));
        }

        state.gyms.remove(&gym_id);
        Ok(())
    }
}
