use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    #[serde(default)]
    pub revocation: RevocationConfig,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RevocationBackend {
    #[default]
    InMemory,
    LocalFs,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevocationConfig {
    #[serde(default)]
    pub backend: RevocationBackend,

    /// Directory holding the revocation file for the `local_fs` backend.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// How long a revoked token stays revoked.
    #[serde(default = "default_revocation_ttl", with = "duration_ms")]
    pub default_ttl: Duration,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::default(),
            base_dir: default_base_dir(),
            default_ttl: default_revocation_ttl(),
        }
    }
}

fn default_base_dir() -> String {
    ".reckon/revocation".to_string()
}

fn default_revocation_ttl() -> Duration {
    // 7 days
    Duration::from_secs(7 * 24 * 60 * 60)
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // saturates at u64::MAX
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::Config(format!(
            "Failed to open config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}
