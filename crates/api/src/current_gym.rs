//! Current-gym selection context.
//!
//! The client keeps a single local key-value entry recording which gym
//! is currently selected (a string id, set and cleared by the user,
//! with no expiry). Reconciling that entry against the authenticated
//! user is an explicit priority list, not ambient state:
//!
//! 1. the server-side profile's gym id,
//! 2. the gym id carried in the token metadata,
//! 3. a name-based directory lookup from the token's gym name,
//! 4. whatever the local store already holds.
//!
//! A successful resolution from any of the first three sources
//! refreshes the local store.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{GymId, UserId};

/// The local key-value entry holding the selected gym id.
pub trait GymSelectionStore: Send + Sync {
    /// Returns the stored selection, if any.
    fn get(&self) -> Option<String>;

    /// Replaces the stored selection.
    fn set(&self, id: &str);

    /// Clears the stored selection.
    fn clear(&self);
}

/// In-memory selection store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemorySelectionStore {
    value: Arc<RwLock<Option<String>>>,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GymSelectionStore for InMemorySelectionStore {
    fn get(&self) -> Option<String> {
        self.value.read().unwrap().clone()
    }

    fn set(&self, id: &str) {
        *self.value.write().unwrap() = Some(id.to_string());
    }

    fn clear(&self) {
        *self.value.write().unwrap() = None;
    }
}

/// Identity claims available from the authentication token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    /// Gym id carried in the token metadata, if present.
    pub gym_id: Option<String>,
    /// Gym display name carried in the token metadata, if present.
    pub gym_name: Option<String>,
}

/// Server-side lookups used while reconciling the selection.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Returns the canonical gym id from the user's profile row.
    async fn gym_id_for_user(&self, user_id: UserId) -> Option<GymId>;

    /// Resolves a gym display name to its id, case-insensitively.
    async fn find_gym_by_name(&self, name: &str) -> Option<GymId>;
}

/// In-memory profile directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileDirectory {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    profiles: Vec<(UserId, GymId)>,
    gyms: Vec<(String, GymId)>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user profile pointing at a gym.
    pub fn add_profile(&self, user_id: UserId, gym_id: GymId) {
        self.state.write().unwrap().profiles.push((user_id, gym_id));
    }

    /// Registers a gym name for name-based lookup.
    pub fn add_gym(&self, name: &str, gym_id: GymId) {
        self.state
            .write()
            .unwrap()
            .gyms
            .push((name.to_string(), gym_id));
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn gym_id_for_user(&self, user_id: UserId) -> Option<GymId> {
        self.state
            .read()
            .unwrap()
            .profiles
            .iter()
            .find(|(id, _)| *id == user_id)
            .map(|(_, gym_id)| *gym_id)
    }

    async fn find_gym_by_name(&self, name: &str) -> Option<GymId> {
        self.state
            .read()
            .unwrap()
            .gyms
            .iter()
            .find(|(gym_name, _)| gym_name.eq_ignore_ascii_case(name))
            .map(|(_, gym_id)| *gym_id)
    }
}

/// The current-gym context: explicit load/refresh/clear over the
/// selection store, reconciled against the authenticated user.
pub struct CurrentGym<P, S>
where
    P: ProfileDirectory,
    S: GymSelectionStore,
{
    profiles: P,
    store: S,
}

impl<P, S> CurrentGym<P, S>
where
    P: ProfileDirectory,
    S: GymSelectionStore,
{
    pub fn new(profiles: P, store: S) -> Self {
        Self { profiles, store }
    }

    /// Resolves the current gym for the given user, walking the
    /// priority list and refreshing the store on a hit.
    pub async fn load(&self, user: Option<&AuthenticatedUser>) -> Option<String> {
        if let Some(user) = user {
            if let Some(gym_id) = self.profiles.gym_id_for_user(user.id).await {
                return Some(self.remember(gym_id.to_string()));
            }
            if let Some(gym_id) = &user.gym_id {
                return Some(self.remember(gym_id.clone()));
            }
            if let Some(gym_name) = &user.gym_name {
                if let Some(gym_id) = self.profiles.find_gym_by_name(gym_name).await {
                    return Some(self.remember(gym_id.to_string()));
                }
            }
        }
        self.store.get()
    }

    /// Re-runs resolution, ignoring whatever is stored unless nothing
    /// better resolves.
    pub async fn refresh(&self, user: Option<&AuthenticatedUser>) -> Option<String> {
        self.load(user).await
    }

    /// Records an explicit user selection.
    pub fn select(&self, gym_id: &str) {
        self.store.set(gym_id);
    }

    /// Clears the selection.
    pub fn clear(&self) {
        self.store.clear();
    }

    fn remember(&self, gym_id: String) -> String {
        self.store.set(&gym_id);
        gym_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> (
        CurrentGym<InMemoryProfileDirectory, InMemorySelectionStore>,
        InMemoryProfileDirectory,
        InMemorySelectionStore,
    ) {
        let profiles = InMemoryProfileDirectory::new();
        let store = InMemorySelectionStore::new();
        let context = CurrentGym::new(profiles.clone(), store.clone());
        (context, profiles, store)
    }

    fn user(gym_id: Option<&str>, gym_name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            gym_id: gym_id.map(str::to_string),
            gym_name: gym_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn server_profile_wins_over_everything() {
        let (context, profiles, store) = context();
        let user = user(Some("99"), Some("Fit Center"));
        profiles.add_profile(user.id, GymId::new(1));
        profiles.add_gym("Fit Center", GymId::new(2));
        store.set("3");

        assert_eq!(context.load(Some(&user)).await.as_deref(), Some("1"));
        // The resolution refreshed the store.
        assert_eq!(store.get().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn token_gym_id_is_second_priority() {
        let (context, _, store) = context();
        let user = user(Some("99"), Some("Fit Center"));

        assert_eq!(context.load(Some(&user)).await.as_deref(), Some("99"));
        assert_eq!(store.get().as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn name_lookup_is_third_priority_and_case_insensitive() {
        let (context, profiles, store) = context();
        let user = user(None, Some("fit center"));
        profiles.add_gym("Fit Center", GymId::new(2));

        assert_eq!(context.load(Some(&user)).await.as_deref(), Some("2"));
        assert_eq!(store.get().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn stored_value_is_the_last_resort() {
        let (context, _, store) = context();
        store.set("7");

        // Anonymous session.
        assert_eq!(context.load(None).await.as_deref(), Some("7"));

        // Authenticated user with nothing resolvable.
        let user = user(None, None);
        assert_eq!(context.load(Some(&user)).await.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn unresolvable_name_falls_back_to_store() {
        let (context, profiles, store) = context();
        let user = user(None, Some("No Such Gym"));
        profiles.add_gym("Fit Center", GymId::new(2));
        store.set("5");

        assert_eq!(context.load(Some(&user)).await.as_deref(), Some("5"));
        // A fallback read does not rewrite the store.
        assert_eq!(store.get().as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn select_and_clear_update_the_store() {
        let (context, _, store) = context();

        context.select("11");
        assert_eq!(store.get().as_deref(), Some("11"));
        assert_eq!(context.load(None).await.as_deref(), Some("11"));

        context.clear();
        assert_eq!(store.get(), None);
        assert_eq!(context.load(None).await, None);
    }
}
