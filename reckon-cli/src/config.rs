use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, ser::SerializeMap};
use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No home directory found")]
    NoHomeDir,

    #[error("Failed to create config directory: {0}")]
    CreateConfigDir(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Credentials for accessing the Reckon API
/// Supported sources(in order of precedence):
/// - CLI arguments(by clap)
/// - Environment variables(by clap)
/// - Dot-env file(by clap and dotenv)
/// - Credentials file
///   - Support Store and Load
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// API key for authentication
    pub api_key: SecretString,

    /// Default API server URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    // for internal use
    #[serde(skip)]
    credentials_dir: Option<String>,
}

/// Mask all but the last 4 characters of a secret
pub fn partial_show_secret(s: &SecretString) -> String {
    let chars = s.expose_secret().chars();
    if chars.clone().count() <= 4 {
        "**************************".to_string()
    } else {
        let last_4 = chars.rev().take(4).collect::<String>();
        format!(
            "**********************{}",
            last_4.chars().rev().collect::<String>()
        )
    }
}

impl Serialize for Credentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("api_key", &self.api_key.expose_secret())?;
        map.serialize_entry("api_url", &self.api_url)?;
        map.end()
    }
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: SecretString::new(Box::default()),
            api_url: default_api_url(),
            credentials_dir: None,
        }
    }
}

impl Credentials {
    pub fn new(credentials_dir: Option<String>) -> Self {
        Self {
            credentials_dir,
            ..Default::default()
        }
    }

    /// Load the stored credentials, then apply non-empty overrides.
    ///
    /// A missing or unreadable credentials file leaves the defaults in place.
    pub fn initialize(
        credentials_dir: Option<String>,
        url: Option<String>,
        key: Option<String>,
    ) -> Self {
        let mut credentials = Credentials::new(credentials_dir);
        if let Err(e) = credentials.load_credentials() {
            tracing::debug!(error = %e, "no stored credentials loaded");
        }

        if let Some(url) = url.filter(|url| !url.is_empty()) {
            credentials.api_url = url;
        }

        if let Some(key) = key.filter(|key| !key.is_empty()) {
            credentials.api_key = SecretString::new(Box::from(key));
        }
        credentials
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    pub fn clear_api_key(&mut self) {
        self.api_key = SecretString::new(Box::default());
    }

    /// Directory holding the credentials file: the configured one, or the
    /// user's config directory
    fn credentials_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.credentials_dir {
            return Ok(PathBuf::from(dir));
        }
        let proj_dirs =
            ProjectDirs::from("com", "reckon", "reckon-cli").ok_or(ConfigError::NoHomeDir)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    pub fn get_credentials_file_path(&self) -> ConfigResult<PathBuf> {
        Ok(self.credentials_dir()?.join(CREDENTIALS_FILE))
    }

    pub fn load_credentials(&mut self) -> ConfigResult<Credentials> {
        let file_path = self.get_credentials_file_path()?;
        if file_path.exists() {
            let mut file = File::open(&file_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            let credentials: Self = serde_json::from_str(&contents)?;
            self.api_key = credentials.api_key;
            self.api_url = credentials.api_url;
        }

        Ok(self.clone())
    }

    pub fn save_credentials(&self) -> ConfigResult<PathBuf> {
        let dir = self.credentials_dir()?;
        ensure_dir(&dir)?;

        let file_path = dir.join(CREDENTIALS_FILE);
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(&file_path)?;
        file.write_all(json.as_bytes())?;

        Ok(file_path)
    }
}

fn ensure_dir(dir: &Path) -> ConfigResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ConfigError::CreateConfigDir(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_key() -> String {
        "test-key-123".to_string()
    }

    fn test_url() -> String {
        "https://test-url.example.com".to_string()
    }

    fn dir_string(dir: &TempDir) -> Option<String> {
        dir.path().to_str().map(|s| s.to_string())
    }

    fn setup_test_credentials_file() -> TempDir {
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let credentials = Credentials {
            api_key: SecretString::new(Box::from(test_key())),
            api_url: test_url(),
            credentials_dir: dir_string(&temp_dir),
        };
        credentials.save_credentials().unwrap();
        temp_dir
    }

    #[test]
    fn test_credentials_default() {
        let credentials = Credentials::default();
        assert_eq!(credentials.api_key.expose_secret(), "");
        assert_eq!(credentials.api_url, default_api_url());
        assert!(!credentials.has_api_key());
    }

    #[test]
    fn test_credentials_serialization() {
        let credentials = Credentials {
            api_key: SecretString::new(Box::from("test-key-123")),
            api_url: "https://test-url.example.com".to_string(),
            credentials_dir: Some("/tmp/ignored".to_string()),
        };

        let json = serde_json::to_string_pretty(&credentials).unwrap();
        assert!(!json.contains("/tmp/ignored"));

        let deserialized: Credentials = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.api_key.expose_secret(), "test-key-123");
        assert_eq!(credentials.api_url, deserialized.api_url);
    }

    #[test]
    fn test_initialize_credential() {
        let empty = tempfile::tempdir().unwrap();
        let credentials =
            Credentials::initialize(dir_string(&empty), Some(test_url()), Some(test_key()));
        assert_eq!(credentials.api_key.expose_secret(), test_key());
        assert_eq!(credentials.api_url, test_url());

        let dir = setup_test_credentials_file();
        let credentials = Credentials::initialize(dir_string(&dir), None, None);
        assert_eq!(credentials.api_key.expose_secret(), test_key());
        assert_eq!(credentials.api_url, test_url());

        let key = "test-key-124";
        let url = "https://test-url.example2.com";
        let credentials = Credentials::initialize(
            dir_string(&dir),
            Some(url.to_string()),
            Some(key.to_string()),
        );
        assert_eq!(credentials.api_key.expose_secret(), key);
        assert_eq!(credentials.api_url, url);
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let dir = setup_test_credentials_file();
        let credentials =
            Credentials::initialize(dir_string(&dir), Some(String::new()), Some(String::new()));
        assert_eq!(credentials.api_key.expose_secret(), test_key());
        assert_eq!(credentials.api_url, test_url());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join(".reckon");
        let mut credentials = Credentials::initialize(
            nested.to_str().map(|s| s.to_string()),
            None,
            Some(test_key()),
        );
        let path = credentials.save_credentials().unwrap();
        assert!(path.ends_with(CREDENTIALS_FILE));
        assert!(path.exists());

        credentials.clear_api_key();
        credentials.save_credentials().unwrap();
        let reloaded = Credentials::initialize(nested.to_str().map(|s| s.to_string()), None, None);
        assert!(!reloaded.has_api_key());
    }

    #[test]
    fn test_partial_show_secret() {
        let secret = SecretString::new(Box::from("abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(partial_show_secret(&secret), "**********************wxyz");

        let short = SecretString::new(Box::from("abc"));
        assert!(!partial_show_secret(&short).contains("abc"));
    }
}
