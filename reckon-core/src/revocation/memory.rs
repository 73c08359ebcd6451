use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::{sync::Arc, time::Duration};

use super::{RevocationResult, TokenRevocation, expiry_after, fingerprint};

/// Transient revocation store.
///
/// Entries live in a `DashMap` keyed by token fingerprint and are lost when
/// the process exits. Expired entries are dropped lazily on lookup.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRevocation {
    entries: Arc<DashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TokenRevocation for InMemoryRevocation {
    async fn record(&self, token: &str, ttl: Duration) -> RevocationResult<()> {
        self.entries.insert(fingerprint(token), expiry_after(ttl));
        Ok(())
    }

    async fn check(&self, token: &str) -> RevocationResult<bool> {
        let key = fingerprint(token);
        let now = Utc::now();
        if self
            .entries
            .remove_if(&key, |_, expires_at| *expires_at <= now)
            .is_some()
        {
            return Ok(false);
        }
        Ok(self.entries.contains_key(&key))
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
