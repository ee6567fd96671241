//! HTTP client for the remote SQL engine.
//!
//! The engine is treated as an opaque SQL-over-HTTP service: one POST per
//! statement, a `{ columns, rows }` JSON result back. Credentials travel as
//! request headers set once on the underlying client, which is built at
//! startup and reused for the process lifetime.

use crate::config::LakeConfig;
use crate::error::LakeError;
use crate::record::WireResult;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

/// A handle capable of executing SQL against the remote tabular source.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<WireResult, LakeError>;
}

/// reqwest-backed implementation of [`QueryEngine`].
#[derive(Debug)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
    staging_dir: String,
}

impl HttpQueryClient {
    /// Build the client from connection settings. Fails with a configuration
    /// error if a credential cannot be encoded as a header.
    pub fn new(config: &LakeConfig) -> Result<Self, LakeError> {
        let mut headers = HeaderMap::new();
        headers.insert("x-gamelake-region", header_value(&config.region)?);
        headers.insert("x-gamelake-access-key-id", header_value(&config.access_key_id)?);

        let mut secret = header_value(config.secret_access_key.expose_secret())?;
        secret.set_sensitive(true);
        headers.insert("x-gamelake-secret-access-key", secret);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LakeError::connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpQueryClient {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            staging_dir: config.staging_dir.clone(),
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, LakeError> {
    HeaderValue::from_str(value)
        .map_err(|_| LakeError::config("connection setting contains characters invalid in a header"))
}

#[async_trait]
impl QueryEngine for HttpQueryClient {
    async fn execute(&self, sql: &str) -> Result<WireResult, LakeError> {
        let url = format!("{}/query", self.endpoint);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "query": sql,
                "staging_dir": self.staging_dir,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LakeError::query(format!(
                "query engine returned {}: {}",
                status,
                body.trim()
            ))
            .with_hint(crate::error::CREDENTIAL_HINT));
        }

        let result = response.json::<WireResult>().await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config(endpoint: &str) -> LakeConfig {
        LakeConfig {
            endpoint: endpoint.to_string(),
            region: "us-east-1".to_string(),
            staging_dir: "s3://r-athen/".to_string(),
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: SecretString::from("secret".to_string()),
        }
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let client = HttpQueryClient::new(&config("https://lake.example.com/")).unwrap();
        assert_eq!(client.endpoint, "https://lake.example.com");
    }

    #[test]
    fn test_invalid_header_value_is_config_error() {
        let mut cfg = config("https://lake.example.com");
        cfg.access_key_id = "bad\nkey".to_string();
        let err = HttpQueryClient::new(&cfg).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Config);
    }
}
