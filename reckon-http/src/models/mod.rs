pub mod auth;
pub mod calculation;
pub mod user;

// Re-export all models for easier imports
pub use auth::*;
pub use calculation::*;
pub use user::*;
