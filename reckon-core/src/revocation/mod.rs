//! Token revocation.
//!
//! A revoked token stays revoked until its entry expires. Two stores implement
//! [`TokenRevocation`]:
//!
//! - [`FileRevocation`]: durable, one JSON file under a configured directory
//! - [`InMemoryRevocation`]: transient, lost on restart
//!
//! [`select_revocation_store`] picks one at startup. When the durable store is
//! configured but its directory cannot be used, the in-memory store is used
//! instead and a warning is logged.
//!
//! Tokens are never stored in the clear; entries are keyed by
//! [`fingerprint`].

mod file;
mod memory;

pub use file::FileRevocation;
pub use memory::InMemoryRevocation;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ring::digest;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{RevocationBackend, RevocationConfig};

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Revocation store not available: {0}")]
    Unavailable(String),
}

pub type RevocationResult<T> = Result<T, RevocationError>;

#[async_trait]
pub trait TokenRevocation: Send + Sync {
    /// Mark `token` as revoked for `ttl`.
    async fn record(&self, token: &str, ttl: Duration) -> RevocationResult<()>;

    /// Whether `token` is currently revoked.
    async fn check(&self, token: &str) -> RevocationResult<bool>;

    fn backend_name(&self) -> &'static str;
}

/// Hex-encoded SHA-256 of the token.
pub fn fingerprint(token: &str) -> String {
    digest::digest(&digest::SHA256, token.as_bytes())
        .as_ref()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub(crate) fn expiry_after(ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub async fn select_revocation_store(config: &RevocationConfig) -> Arc<dyn TokenRevocation> {
    let store: Arc<dyn TokenRevocation> = match config.backend {
        RevocationBackend::InMemory => Arc::new(InMemoryRevocation::new()),
        RevocationBackend::LocalFs => match FileRevocation::open(&config.base_dir).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(
                    base_dir = %config.base_dir,
                    error = %e,
                    "durable revocation store unavailable, falling back to in-memory store"
                );
                Arc::new(InMemoryRevocation::new())
            }
        },
    };
    info!(backend = store.backend_name(), "revocation store selected");
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint() {
        let fp = fingerprint("user1-key");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fingerprint("user1-key"));
        assert_ne!(fp, fingerprint("user2-key"));
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_expiry_after_saturates() {
        assert_eq!(expiry_after(Duration::MAX), DateTime::<Utc>::MAX_UTC);
        assert!(expiry_after(Duration::from_secs(60)) > Utc::now());
    }

    #[tokio::test]
    async fn test_select_in_memory() {
        let store = select_revocation_store(&RevocationConfig::default()).await;
        assert_eq!(store.backend_name(), "in_memory");
    }

    #[tokio::test]
    async fn test_select_local_fs() {
        let dir = tempfile::tempdir().unwrap();
        let config = RevocationConfig {
            backend: RevocationBackend::LocalFs,
            base_dir: dir.path().join("revocation").display().to_string(),
            ..Default::default()
        };
        let store = select_revocation_store(&config).await;
        assert_eq!(store.backend_name(), "local_fs");
    }

    #[tokio::test]
    async fn test_select_falls_back_when_unavailable() {
        // a directory cannot be created below a regular file
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = RevocationConfig {
            backend: RevocationBackend::LocalFs,
            base_dir: file.path().join("revocation").display().to_string(),
            ..Default::default()
        };
        let store = select_revocation_store(&config).await;
        assert_eq!(store.backend_name(), "in_memory");

        store.record("token", Duration::from_secs(60)).await.unwrap();
        assert!(store.check("token").await.unwrap());
    }
}
