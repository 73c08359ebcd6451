use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};
use tempfile::NamedTempFile;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use super::{RevocationError, RevocationResult, TokenRevocation, expiry_after, fingerprint};

const FILE_NAME: &str = "revoked_tokens.json";

/// Durable revocation store.
///
/// All entries live in a single JSON file (`revoked_tokens.json`) mapping
/// token fingerprints to expiry timestamps. The file is loaded once when the
/// store is opened and rewritten atomically (temp file + rename) on every
/// `record`, so revocations survive a restart. Expired entries are pruned on
/// each write. A `record` whose write fails leaves the in-memory state as it
/// was.
#[derive(Debug)]
pub struct FileRevocation {
    base_dir: PathBuf,
    path: PathBuf,
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl FileRevocation {
    /// Open the store under `base_dir`, creating the directory if needed.
    ///
    /// Fails when the directory cannot be created or written, or when an
    /// existing file cannot be parsed.
    pub async fn open(base_dir: impl AsRef<Path>) -> RevocationResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await.map_err(|e| {
            RevocationError::Unavailable(format!(
                "Failed to create directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        let path = base_dir.join(FILE_NAME);
        let entries = if fs::try_exists(&path).await? {
            let contents = fs::read(&path).await?;
            serde_json::from_slice(&contents)?
        } else {
            HashMap::new()
        };

        let store = Self {
            base_dir,
            path,
            entries: Mutex::new(entries),
        };

        // fail fast on an unwritable directory
        {
            let mut entries = store.entries.lock().await;
            store.persist(&mut entries).await?;
        }

        debug!(path = %store.path.display(), "opened revocation file");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &mut HashMap<String, DateTime<Utc>>) -> RevocationResult<()> {
        let now = Utc::now();
        entries.retain(|_, expires_at| *expires_at > now);

        let data = serde_json::to_vec_pretty(&*entries)?;
        let temp_path = NamedTempFile::new_in(&self.base_dir)?.into_temp_path();
        fs::write(&temp_path, &data).await?;
        temp_path
            .persist(&self.path)
            .map_err(|e| RevocationError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl TokenRevocation for FileRevocation {
    async fn record(&self, token: &str, ttl: Duration) -> RevocationResult<()> {
        let mut entries = self.entries.lock().await;
        let key = fingerprint(token);
        let previous = entries.insert(key.clone(), expiry_after(ttl));

        // memory must not get ahead of the file
        if let Err(err) = self.persist(&mut entries).await {
            match previous {
                Some(expires_at) => entries.insert(key, expires_at),
                None => entries.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }

    async fn check(&self, token: &str) -> RevocationResult<bool> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(&fingerprint(token))
            .is_some_and(|expires_at| *expires_at > Utc::now()))
    }

    fn backend_name(&self) -> &'static str {
        "local_fs"
    }
}
