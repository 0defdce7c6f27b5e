//! Error types for the KuCoin Futures client library.

use thiserror::Error;

/// The main error type for all KuCoin Futures client operations.
#[derive(Error, Debug)]
pub enum KucoinError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// WebSocket communication error (with message)
    #[error("WebSocket error: {0}")]
    WebSocketMsg(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL query encoding error
    #[error("Query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters cannot be encoded for the requested method
    #[error("Invalid request parameters: {0}")]
    InvalidParams(String),

    /// KuCoin API returned an error
    #[error("KuCoin API error: {0}")]
    Api(ApiError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Credentials were supplied but are unusable
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// WebSocket connection closed unexpectedly
    #[error("WebSocket connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for the closure
        reason: String,
    },

    /// Missing required credentials
    #[error("Missing credentials: API key, secret and passphrase required for private endpoints")]
    MissingCredentials,
}

/// KuCoin API error codes and messages.
///
/// These are errors returned by the exchange in the response envelope,
/// e.g. `{"code": "400005", "msg": "Invalid KC-API-SIGN"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error code from KuCoin (e.g., "400005")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Parse an API error from KuCoin's response envelope.
    ///
    /// Returns `None` when the body is not an envelope or reports success.
    pub fn from_envelope(body: &serde_json::Value) -> Option<Self> {
        let code = match body.get("code")? {
            serde_json::Value::String(code) => code.clone(),
            serde_json::Value::Number(code) => code.to_string(),
            _ => return None,
        };
        if code == error_codes::SUCCESS {
            return None;
        }
        let message = body
            .get("msg")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        Some(Self::new(code, message))
    }

    /// Check if the exchange rejected the request authentication.
    ///
    /// Covers missing headers, bad timestamp, unknown key, bad passphrase
    /// and bad signature.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.code.as_str(),
            error_codes::MISSING_HEADERS
                | error_codes::INVALID_TIMESTAMP
                | error_codes::KEY_NOT_EXISTS
                | error_codes::INVALID_PASSPHRASE
                | error_codes::INVALID_SIGNATURE
        )
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if the timestamp was outside the accepted window.
    pub fn is_invalid_timestamp(&self) -> bool {
        self.code == error_codes::INVALID_TIMESTAMP
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.code == error_codes::IP_NOT_WHITELISTED || self.code == error_codes::ACCESS_DENIED
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.code == error_codes::TOO_MANY_REQUESTS
    }
}

/// Known KuCoin error codes for pattern matching.
pub mod error_codes {
    /// Success
    pub const SUCCESS: &str = "200000";

    /// Authentication errors
    pub const MISSING_HEADERS: &str = "400001";
    pub const INVALID_TIMESTAMP: &str = "400002";
    pub const KEY_NOT_EXISTS: &str = "400003";
    pub const INVALID_PASSPHRASE: &str = "400004";
    pub const INVALID_SIGNATURE: &str = "400005";
    pub const IP_NOT_WHITELISTED: &str = "400006";
    pub const ACCESS_DENIED: &str = "400007";

    /// Request errors
    pub const URL_NOT_FOUND: &str = "404000";
    pub const PARAMETER_ERROR: &str = "400100";
    pub const USER_FROZEN: &str = "411100";
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "415000";
    pub const TOO_MANY_REQUESTS: &str = "429000";

    /// Service errors
    pub const INTERNAL_ERROR: &str = "500000";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_envelope() {
        let body = serde_json::json!({ "code": "400005", "msg": "Invalid KC-API-SIGN" });
        let error = ApiError::from_envelope(&body).unwrap();
        assert_eq!(error.code, "400005");
        assert_eq!(error.message, "Invalid KC-API-SIGN");
        assert!(error.is_invalid_signature());
        assert!(error.is_auth_failure());
    }

    #[test]
    fn test_api_error_from_success_envelope() {
        let body = serde_json::json!({ "code": "200000", "data": {} });
        assert!(ApiError::from_envelope(&body).is_none());
    }

    #[test]
    fn test_api_error_numeric_code() {
        let body = serde_json::json!({ "code": 429000, "msg": "Too Many Requests" });
        let error = ApiError::from_envelope(&body).unwrap();
        assert!(error.is_rate_limit());
        assert!(!error.is_auth_failure());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new("400100", "Parameter error");
        assert_eq!(error.to_string(), "400100: Parameter error");
    }
}
