use crate::models::user::{User, UserRole};
use dashmap::DashMap;
use std::sync::Arc;

/// Accounts every fresh store is seeded with: `(api key, user id, username, role)`.
const SEED_ACCOUNTS: [(&str, &str, &str, UserRole); 3] = [
    ("admin-key", "admin", "Administrator", UserRole::Admin),
    ("user1-key", "user1", "Regular User 1", UserRole::User),
    ("user2-key", "user2", "Regular User 2", UserRole::User),
];

/// In-memory registry of callers and the API keys they authenticate with.
///
/// Several keys may name the same user. Clones share the same maps.
#[derive(Clone, Debug)]
pub struct AuthStore {
    /// API key to owning user id
    api_keys: Arc<DashMap<String, String>>,
    /// User id to account
    users: Arc<DashMap<String, User>>,
}

impl AuthStore {
    /// Create a store with no accounts
    pub fn empty() -> Self {
        Self {
            api_keys: Arc::new(DashMap::new()),
            users: Arc::new(DashMap::new()),
        }
    }

    /// Create a store holding the built-in `admin`, `user1` and `user2` accounts
    pub fn seeded() -> Self {
        let store = Self::empty();
        for (api_key, user_id, username, role) in SEED_ACCOUNTS {
            store.register(User::new(user_id, username, role), api_key);
        }
        store
    }

    /// Register `user` under `api_key`.
    ///
    /// An existing account with the same id is replaced, and a key that was
    /// already issued is reassigned to this user.
    pub fn register(&self, user: User, api_key: impl Into<String>) {
        self.api_keys.insert(api_key.into(), user.user_id.clone());
        self.users.insert(user.user_id.clone(), user);
    }

    /// Look up an account by id
    pub fn user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|entry| entry.value().clone())
    }

    /// Resolve the account an API key belongs to.
    ///
    /// Returns `None` for unknown keys and for keys whose user is gone.
    pub fn authenticate(&self, api_key: &str) -> Option<User> {
        let user_id = self.api_keys.get(api_key)?;
        self.user(user_id.value())
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::seeded()
    }
}
