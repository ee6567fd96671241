//! Connection settings for the remote query engine.
//!
//! Credentials are never baked into the binary: they come from the
//! environment or from a YAML file, with environment variables taking
//! precedence over the file. The secret access key is held as a
//! `SecretString` and redacted from `Debug` output.

use crate::error::LakeError;
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_staging_dir() -> String {
    "s3://r-athen/".to_string()
}

/// Settings needed to reach the query engine.
#[derive(Deserialize)]
pub struct LakeConfig {
    /// Base URL of the SQL-over-HTTP query endpoint.
    pub endpoint: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Object-store location where the engine stages query results.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
}

impl std::fmt::Debug for LakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LakeConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("staging_dir", &self.staging_dir)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***REDACTED***")
            .finish()
    }
}

impl LakeConfig {
    /// Load settings from the environment.
    ///
    /// `GAMELAKE_ENDPOINT`, `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`
    /// are required; `AWS_REGION` and `GAMELAKE_STAGING_DIR` fall back to
    /// defaults. Missing values are a reportable configuration error.
    pub fn from_env() -> Result<Self, LakeError> {
        Ok(LakeConfig {
            endpoint: require_env("GAMELAKE_ENDPOINT")?,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| default_region()),
            staging_dir: std::env::var("GAMELAKE_STAGING_DIR")
                .unwrap_or_else(|_| default_staging_dir()),
            access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: SecretString::from(require_env("AWS_SECRET_ACCESS_KEY")?),
        })
    }

    /// Load settings from a YAML file, then apply environment overrides for
    /// every field `from_env` reads.
    pub fn from_file(path: &str) -> Result<Self, LakeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LakeError::config(format!("failed to read config file at {}: {}", path, e))
        })?;
        let mut config: LakeConfig = serde_yaml::from_str(&content).map_err(|e| {
            LakeError::config(format!("failed to parse config file at {}: {}", path, e))
        })?;

        if let Ok(endpoint) = std::env::var("GAMELAKE_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(region) = std::env::var("AWS_REGION") {
            config.region = region;
        }
        if let Ok(staging) = std::env::var("GAMELAKE_STAGING_DIR") {
            config.staging_dir = staging;
        }
        if let Ok(key_id) = std::env::var("AWS_ACCESS_KEY_ID") {
            config.access_key_id = key_id;
        }
        if let Ok(secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            config.secret_access_key = SecretString::from(secret);
        }

        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String, LakeError> {
    std::env::var(name)
        .map_err(|_| LakeError::config(format!("environment variable {} is not set", name)))
}
