use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::connection::{SecureConnection, DEFAULT_TIMEOUT_SECS};
use crate::CONFIG_FILE;

pub const DEMO_PROFILE_NAME: &str = "demo";
pub const DEMO_ENDPOINT: &str = "https://api.example.com";
pub const DEMO_API_KEY: &str = "api_key_example";
pub const DEMO_TIMEOUT_SECS: u64 = 60;

/// Expands environment variables in a string value.
/// Supports ${VAR} and $VAR syntax.
pub fn expand_env_vars(value: &str) -> Result<String> {
    shellexpand::env(value)
        .map(|s| s.into_owned())
        .map_err(|e| anyhow!("Failed to expand environment variable in '{}': {}", value, e))
}

fn default_secure() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecureLinkConfig {
    pub profiles: Option<Vec<ProfileConfig>>,
    pub active_profile: Option<String>,
    #[serde(skip_serializing)]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct ProfileConfig {
    pub name: String,
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_secure")]
    pub secure: bool,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl std::fmt::Debug for ProfileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***redacted***")
            .field("secure", &self.secure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProfileConfig {
    /// The profile used when nothing is configured.
    pub fn demo() -> Self {
        Self {
            name: DEMO_PROFILE_NAME.to_string(),
            endpoint: DEMO_ENDPOINT.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            secure: true,
            timeout: DEMO_TIMEOUT_SECS,
        }
    }

    pub fn to_connection(&self) -> Result<SecureConnection> {
        let endpoint = expand_env_vars(&self.endpoint)?;
        let api_key = expand_env_vars(&self.api_key)?;
        Ok(SecureConnection::new(endpoint, api_key)
            .with_security(self.secure)
            .with_timeout(self.timeout))
    }
}

impl SecureLinkConfig {
    pub fn from_file(config_path: Option<&PathBuf>) -> Result<Self> {
        let path = config_path
            .filter(|p| p.exists())
            .cloned()
            .unwrap_or_else(|| {
                let default_path = CONFIG_FILE.as_path().to_path_buf();
                info!("Using configuration path: {}", default_path.display());
                default_path
            });

        // A missing file is an empty config
        let toml_config = std::fs::read_to_string(&path).unwrap_or_default();
        let mut config = Self::from_str(&toml_config)?;
        config.path = Some(path);
        Ok(config)
    }

    pub fn from_str(config: &str) -> Result<Self> {
        let config: SecureLinkConfig = toml::from_str(config)?;
        let num_profiles = config.profiles.as_ref().map_or(0, Vec::len);
        info!("Loaded config: profiles={num_profiles}");
        Ok(config)
    }

    pub fn to_str(&self) -> Result<String> {
        toml::to_string(self).map_err(std::convert::Into::into)
    }

    pub fn find_profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles
            .as_ref()
            .and_then(|profiles| profiles.iter().find(|p| p.name == name))
    }

    /// Adds `profile`, replacing any existing profile with the same name.
    pub fn upsert_profile(&mut self, profile: ProfileConfig) {
        let profiles = self.profiles.get_or_insert_with(Vec::new);
        profiles.retain(|p| p.name != profile.name);
        profiles.push(profile);
    }

    /// Removes the named profile. Returns whether it existed.
    pub fn remove_profile(&mut self, name: &str) -> bool {
        let Some(profiles) = &mut self.profiles else {
            return false;
        };
        let before = profiles.len();
        profiles.retain(|p| p.name != name);
        let removed = profiles.len() != before;
        if removed && self.active_profile.as_deref() == Some(name) {
            self.active_profile = None;
        }
        removed
    }

    /// Picks the profile to connect with: the explicit name, then the active
    /// profile, then the built-in demo profile.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<ProfileConfig> {
        match name.or(self.active_profile.as_deref()) {
            Some(name) => self
                .find_profile(name)
                .cloned()
                .ok_or_else(|| anyhow!("Profile '{name}' not found in configuration")),
            None => {
                info!("No profile selected, using built-in demo profile");
                Ok(ProfileConfig::demo())
            }
        }
    }

    pub fn write_to_file(&self) -> Result<()> {
        let path = self
            .path
            .clone()
            .unwrap_or(CONFIG_FILE.as_path().to_path_buf());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // The file holds credentials: 0600 on Unix
        #[cfg(unix)]
        let mut file = {
            use std::os::unix::fs::OpenOptionsExt;
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .mode(0o600)
                .open(&path)?
        };

        #[cfg(not(unix))]
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)?;

        file.write_all(self.to_str()?.as_bytes())?;
        info!("Wrote config to {}", path.display());
        Ok(())
    }
}

/// Writes `contents` to a per-process temp file and returns its path.
#[cfg(test)]
pub(crate) fn write_temp_config(tag: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "securelink-{tag}-{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}
