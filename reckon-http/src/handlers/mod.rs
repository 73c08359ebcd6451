pub mod auth;
pub mod calculations;
pub mod test_helpers;

// Re-export all handlers for easier imports
pub use auth::*;
pub use calculations::*;
