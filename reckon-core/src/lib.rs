//! # Reckon core
//!
//! Evaluation and storage of user-owned arithmetic calculations.
//!
//! - [`calculation`]: the closed set of calculation kinds and the pure
//!   evaluator that validates inputs and computes a single result
//! - [`record`]: persisted calculations (owner, timestamps, result) behind the
//!   [`record::CalculationRepository`] trait
//! - [`revocation`]: the token revocation store consulted by the HTTP layer,
//!   with a durable file-backed implementation and an in-memory fallback
//! - [`config`]: JSON configuration for the stores
//!
//! The evaluator never touches the stores; it is a pure function that may be
//! called concurrently from any number of tasks.

pub mod calculation;
pub mod config;
pub mod error;
pub mod record;
pub mod revocation;

pub use calculation::{CalculationError, CalculationKind, CalculationRequest, evaluate};
pub use error::*;

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
