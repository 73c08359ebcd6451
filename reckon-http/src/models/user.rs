use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// User role for basic authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user, limited to their own calculations
    #[default]
    User,
    /// Administrator, may read and modify any calculation
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, also the owner id of stored calculations
    pub user_id: String,
    /// Username for display purposes
    pub username: String,
    pub role: UserRole,
}

impl User {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role,
        }
    }

    pub fn new_user(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(user_id, username, UserRole::User)
    }

    pub fn new_admin(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(user_id, username, UserRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether this user may read or modify a calculation owned by `owner_id`.
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}
