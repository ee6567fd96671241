//! Error type for the data-source boundary.
//!
//! Everything that can go wrong between the dashboard and the lake collapses
//! into one reportable error: a code, a message, and an optional hint the
//! presentation layer can show next to the error banner.

use std::fmt;

/// Coarse classification of a failure. There is deliberately no
/// transient/permanent split; callers either report or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or malformed connection settings.
    Config,
    /// The query engine could not be reached.
    Connection,
    /// The engine rejected or failed the query.
    Query,
    /// The result could not be decoded into the expected table shape.
    Decode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::Connection => "CONNECTION",
            ErrorCode::Query => "QUERY",
            ErrorCode::Decode => "DECODE",
        }
    }
}

/// Hint attached to connection-level failures; points at the usual suspects.
pub const CREDENTIAL_HINT: &str =
    "Check that the AWS credentials and the staging bucket for query results are configured.";

/// A reportable data-source failure.
#[derive(Debug, Clone)]
pub struct LakeError {
    pub code: ErrorCode,
    pub message: String,
    pub hint: Option<String>,
}

impl LakeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        LakeError {
            code,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message).with_hint(CREDENTIAL_HINT)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Connection, message).with_hint(CREDENTIAL_HINT)
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Query, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Decode, message)
    }
}

impl fmt::Display for LakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LakeError {}

impl From<serde_json::Error> for LakeError {
    fn from(err: serde_json::Error) -> Self {
        LakeError::decode(format!("failed to decode query result: {}", err))
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for LakeError {
    fn from(err: reqwest::Error) -> Self {
        LakeError::connection(format!("query engine request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_carries_hint() {
        let err = LakeError::connection("engine unreachable");
        assert_eq!(err.code, ErrorCode::Connection);
        assert_eq!(err.to_string(), "engine unreachable");
        assert_eq!(err.hint.as_deref(), Some(CREDENTIAL_HINT));
    }

    #[test]
    fn test_query_error_has_no_default_hint() {
        let err = LakeError::query("syntax error at line 1");
        assert_eq!(err.code.as_str(), "QUERY");
        assert!(err.hint.is_none());

        let err = err.with_hint("table was renamed");
        assert_eq!(err.hint.as_deref(), Some("table was renamed"));
    }
}
