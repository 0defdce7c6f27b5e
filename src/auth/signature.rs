//! HMAC-SHA256 request signing for KuCoin API authentication.
//!
//! KuCoin private endpoints require a signature computed as:
//! ```text
//! base64(HMAC-SHA256(timestamp + METHOD + endpoint + payload, secret))
//! ```
//!
//! where `payload` is the query string (`?a=1&b=2`, or empty) for GET and
//! DELETE requests, and the exact JSON body text for everything else. The
//! passphrase is sent as `base64(HMAC-SHA256(passphrase, secret))` together
//! with `KC-API-KEY-VERSION: 2`.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use sha2::Sha256;

use crate::auth::query::format_query;
use crate::auth::{
    Credentials, CredentialsProvider, KeyVersion, MillisTimestamp, TimestampProvider,
};
use crate::error::KucoinError;

type HmacSha256 = Hmac<Sha256>;

/// Authentication header names.
pub mod headers {
    /// Body content type.
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Request signature.
    pub const SIGN: &str = "KC-API-SIGN";
    /// Millisecond timestamp included in the signature.
    pub const TIMESTAMP: &str = "KC-API-TIMESTAMP";
    /// API key.
    pub const KEY: &str = "KC-API-KEY";
    /// Passphrase digest.
    pub const PASSPHRASE: &str = "KC-API-PASSPHRASE";
    /// Signing scheme version.
    pub const KEY_VERSION: &str = "KC-API-KEY-VERSION";
}

/// Content type sent with every signed request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Request parameters encoded once, exactly as they go on the wire.
///
/// The same value feeds the canonical string and the outgoing request, so the
/// signed bytes and the sent bytes cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    /// Query string for GET and DELETE: empty, or starting with `?`.
    Query(String),
    /// JSON body text for POST, PUT and other methods.
    Body(String),
}

impl RequestPayload {
    /// Encode `params` for `method`.
    ///
    /// Absent parameters become an empty query for GET/DELETE and `{}` for
    /// methods that carry a body.
    pub fn encode<P>(method: &Method, params: Option<&P>) -> Result<Self, KucoinError>
    where
        P: Serialize + ?Sized,
    {
        if signs_query(method) {
            return Ok(Self::Query(format_query(params)?));
        }

        let body = match params {
            Some(params) => serde_json::to_string(params)?,
            None => String::new(),
        };
        if body.is_empty() || body == "null" {
            Ok(Self::Body("{}".to_string()))
        } else {
            Ok(Self::Body(body))
        }
    }

    /// The text appended to the canonical string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Query(query) => query,
            Self::Body(body) => body,
        }
    }

    /// Query suffix for the request URL (empty for body payloads).
    pub fn query(&self) -> &str {
        match self {
            Self::Query(query) => query,
            Self::Body(_) => "",
        }
    }

    /// Request body, if this payload carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Query(_) => None,
            Self::Body(body) => Some(body),
        }
    }
}

/// GET and DELETE sign their query string; every other method signs its body.
fn signs_query(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

/// Build the string that gets signed: `timestamp + METHOD + endpoint + payload`.
pub fn canonical_string(
    timestamp: u64,
    method: &Method,
    endpoint: &str,
    payload: &RequestPayload,
) -> String {
    format!(
        "{timestamp}{}{endpoint}{}",
        method.as_str(),
        payload.as_str()
    )
}

/// The authentication headers for one private request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Base64 HMAC-SHA256 of the canonical string
    pub signature: String,
    /// Millisecond timestamp used in the signature
    pub timestamp: String,
    /// The API key
    pub api_key: String,
    /// Base64 HMAC-SHA256 of the passphrase
    pub passphrase: String,
    /// Signing scheme version
    pub key_version: KeyVersion,
}

impl AuthHeaders {
    /// All header name/value pairs, content type first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (headers::CONTENT_TYPE, JSON_CONTENT_TYPE),
            (headers::SIGN, self.signature.as_str()),
            (headers::TIMESTAMP, self.timestamp.as_str()),
            (headers::KEY, self.api_key.as_str()),
            (headers::PASSPHRASE, self.passphrase.as_str()),
            (headers::KEY_VERSION, self.key_version.as_str()),
        ]
        .into_iter()
    }

    /// Convert into a header map ready to attach to a request.
    pub fn to_header_map(&self) -> Result<HeaderMap, KucoinError> {
        let mut map = HeaderMap::with_capacity(6);
        for (name, value) in self.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| KucoinError::Auth(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| KucoinError::Auth(format!("Invalid value for header {name}: {e}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Sign a request for KuCoin's private API with a caller-supplied timestamp.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret and passphrase
/// * `timestamp` - Milliseconds since the UNIX epoch; must be fresh per request
/// * `method` - HTTP method
/// * `endpoint` - The API endpoint path (e.g., "/api/v1/orders")
/// * `payload` - The encoded parameters that will be sent
///
/// # Example
///
/// ```rust
/// use kucoin_futures_api_client::auth::{Credentials, RequestPayload, sign_request};
/// use reqwest::Method;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("key1", "s3cret", "pass1")?;
/// let payload = RequestPayload::encode(&Method::GET, Some(&serde_json::json!({ "symbol": "XBTUSDM" })))?;
/// let headers = sign_request(&credentials, 1700000000000, &Method::GET, "/api/v1/orders", &payload)?;
/// assert_eq!(headers.timestamp, "1700000000000");
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp: u64,
    method: &Method,
    endpoint: &str,
    payload: &RequestPayload,
) -> Result<AuthHeaders, KucoinError> {
    let prehash = canonical_string(timestamp, method, endpoint, payload);
    let signature = hmac_sha256_base64(credentials.expose_secret(), prehash.as_bytes())?;
    let passphrase = sign_passphrase(credentials)?;

    Ok(AuthHeaders {
        signature,
        timestamp: timestamp.to_string(),
        api_key: credentials.api_key.clone(),
        passphrase,
        key_version: credentials.key_version(),
    })
}

/// Compute the `KC-API-PASSPHRASE` value for the v2 key scheme.
pub fn sign_passphrase(credentials: &Credentials) -> Result<String, KucoinError> {
    hmac_sha256_base64(
        credentials.expose_secret(),
        credentials.expose_passphrase().as_bytes(),
    )
}

fn hmac_sha256_base64(secret: &str, message: &[u8]) -> Result<String, KucoinError> {
    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| KucoinError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message);
    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}

/// Produces authentication headers for private requests.
///
/// Holds the credentials and a timestamp source; signing reads both and
/// mutates neither, so one authenticator can be shared across tasks.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<dyn CredentialsProvider>,
    timestamps: Arc<dyn TimestampProvider>,
}

impl Authenticator {
    /// Create an authenticator using the system clock for timestamps.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            timestamps: Arc::new(MillisTimestamp::new()),
        }
    }

    /// Replace the timestamp source.
    pub fn with_timestamp_provider(mut self, timestamps: Arc<dyn TimestampProvider>) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// The credentials used for signing.
    pub fn credentials(&self) -> &Credentials {
        self.credentials.get_credentials()
    }

    /// Sign a request described by endpoint, method and parameters.
    ///
    /// `params` is encoded the same way the client sends it; see
    /// [`RequestPayload::encode`].
    pub fn sign<P>(
        &self,
        endpoint: &str,
        method: &Method,
        params: Option<&P>,
    ) -> Result<AuthHeaders, KucoinError>
    where
        P: Serialize + ?Sized,
    {
        let payload = RequestPayload::encode(method, params)?;
        self.sign_payload(endpoint, method, &payload)
    }

    /// Sign an already-encoded payload with a fresh timestamp.
    pub fn sign_payload(
        &self,
        endpoint: &str,
        method: &Method,
        payload: &RequestPayload,
    ) -> Result<AuthHeaders, KucoinError> {
        let timestamp = self.timestamps.next_timestamp();
        sign_request(self.credentials(), timestamp, method, endpoint, payload)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("api_key", &self.credentials().api_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{FixedTimestamp, NO_PARAMS};

    const TS: u64 = 1_700_000_000_000;

    fn credentials() -> Credentials {
        Credentials::new("key1", "s3cret", "pass1").unwrap()
    }

    fn symbol_params() -> serde_json::Value {
        serde_json::json!({ "symbol": "XBTUSDM" })
    }

    fn fixed_authenticator() -> Authenticator {
        Authenticator::new(Arc::new(credentials()))
            .with_timestamp_provider(Arc::new(FixedTimestamp(TS)))
    }

    #[test]
    fn test_canonical_string_get_with_params() {
        let payload = RequestPayload::encode(&Method::GET, Some(&symbol_params())).unwrap();
        assert_eq!(
            canonical_string(TS, &Method::GET, "/api/v1/orders", &payload),
            "1700000000000GET/api/v1/orders?symbol=XBTUSDM"
        );
    }

    #[test]
    fn test_canonical_string_get_without_params() {
        let payload = RequestPayload::encode(&Method::GET, NO_PARAMS).unwrap();
        assert_eq!(
            canonical_string(TS, &Method::GET, "/api/v1/orders", &payload),
            "1700000000000GET/api/v1/orders"
        );
    }

    #[test]
    fn test_canonical_string_post_uses_json_body() {
        #[derive(Serialize)]
        struct Order {
            price: &'static str,
            size: u32,
        }
        let payload = RequestPayload::encode(
            &Method::POST,
            Some(&Order {
                price: "10",
                size: 1,
            }),
        )
        .unwrap();
        assert_eq!(
            canonical_string(TS, &Method::POST, "/api/v1/orders", &payload),
            r#"1700000000000POST/api/v1/orders{"price":"10","size":1}"#
        );
    }

    #[test]
    fn test_post_body_preserves_field_order() {
        #[derive(Serialize)]
        struct Params {
            symbol: &'static str,
            amount: u32,
            bizno: &'static str,
        }
        let payload = RequestPayload::encode(
            &Method::POST,
            Some(&Params {
                symbol: "XBTUSDM",
                amount: 2,
                bizno: "b1",
            }),
        )
        .unwrap();
        assert_eq!(
            payload.body(),
            Some(r#"{"symbol":"XBTUSDM","amount":2,"bizno":"b1"}"#)
        );
    }

    #[test]
    fn test_post_without_params_sends_empty_object() {
        let payload = RequestPayload::encode(&Method::POST, NO_PARAMS).unwrap();
        assert_eq!(payload, RequestPayload::Body("{}".to_string()));
        assert_eq!(payload.query(), "");
    }

    #[test]
    fn test_delete_signs_query() {
        let payload = RequestPayload::encode(&Method::DELETE, Some(&symbol_params())).unwrap();
        assert_eq!(payload.query(), "?symbol=XBTUSDM");
        assert!(payload.body().is_none());

        let headers =
            sign_request(&credentials(), TS, &Method::DELETE, "/api/v1/orders", &payload).unwrap();
        assert_eq!(
            headers.signature,
            "Tiekp29oN/h7C/kaZ/18qiOiTyPHwy6dJbO2zDWPqFM="
        );
    }

    #[test]
    fn test_known_get_signature() {
        let headers = fixed_authenticator()
            .sign("/api/v1/orders", &Method::GET, Some(&symbol_params()))
            .unwrap();
        assert_eq!(
            headers.signature,
            "EGYFGJl3uchRW8ao5ibLsUSii4qfGAH4SYVBfNZUTuc="
        );
        assert_eq!(headers.timestamp, "1700000000000");
        assert_eq!(headers.api_key, "key1");
    }

    #[test]
    fn test_known_get_signature_without_params() {
        let headers = fixed_authenticator()
            .sign("/api/v1/orders", &Method::GET, NO_PARAMS)
            .unwrap();
        assert_eq!(
            headers.signature,
            "7Rwr4TwwTVRmPUmzY/kNEZg0bmtQdIPw5OBCheHK8Po="
        );
    }

    #[test]
    fn test_absent_and_empty_params_sign_identically() {
        let auth = fixed_authenticator();
        let absent = auth.sign("/api/v1/orders", &Method::GET, NO_PARAMS).unwrap();
        let empty = auth
            .sign("/api/v1/orders", &Method::GET, Some(&serde_json::json!({})))
            .unwrap();
        assert_eq!(absent, empty);
    }

    #[test]
    fn test_known_post_signature() {
        let body = serde_json::json!({ "price": "10", "size": 1 });
        let headers = fixed_authenticator()
            .sign("/api/v1/orders", &Method::POST, Some(&body))
            .unwrap();
        assert_eq!(
            headers.signature,
            "XqXo73HBYDVYDTIxQ2OpY5rCOoGZweJ2ymDN6HxydSg="
        );
    }

    #[test]
    fn test_passphrase_digest() {
        let digest = sign_passphrase(&credentials()).unwrap();
        assert_eq!(digest, "75kPI26FuYtwiNXMPlTDyKaKR+1YOEC6np0QkhNEVcs=");
        assert_ne!(digest, "pass1");

        let other_pass = Credentials::new("key1", "s3cret", "pass2").unwrap();
        assert_ne!(sign_passphrase(&other_pass).unwrap(), digest);

        let other_secret = Credentials::new("key1", "s3cret2", "pass1").unwrap();
        assert_ne!(sign_passphrase(&other_secret).unwrap(), digest);
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let creds = credentials();
        let payload = RequestPayload::encode(&Method::GET, Some(&symbol_params())).unwrap();
        let base = sign_request(&creds, TS, &Method::GET, "/api/v1/orders", &payload).unwrap();

        let later = sign_request(&creds, TS + 1, &Method::GET, "/api/v1/orders", &payload).unwrap();
        assert_ne!(base.signature, later.signature);

        let deleted =
            sign_request(&creds, TS, &Method::DELETE, "/api/v1/orders", &payload).unwrap();
        assert_ne!(base.signature, deleted.signature);

        let path = sign_request(&creds, TS, &Method::GET, "/api/v1/fills", &payload).unwrap();
        assert_ne!(base.signature, path.signature);

        let other_params = RequestPayload::encode(
            &Method::GET,
            Some(&serde_json::json!({ "symbol": "ETHUSDM" })),
        )
        .unwrap();
        let params =
            sign_request(&creds, TS, &Method::GET, "/api/v1/orders", &other_params).unwrap();
        assert_ne!(base.signature, params.signature);

        let other_secret = Credentials::new("key1", "another", "pass1").unwrap();
        let secret =
            sign_request(&other_secret, TS, &Method::GET, "/api/v1/orders", &payload).unwrap();
        assert_ne!(base.signature, secret.signature);
    }

    #[test]
    fn test_signature_consistency() {
        let auth = fixed_authenticator();
        let sig1 = auth
            .sign("/api/v1/position", &Method::GET, Some(&symbol_params()))
            .unwrap();
        let sig2 = auth
            .sign("/api/v1/position", &Method::GET, Some(&symbol_params()))
            .unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_header_set_is_complete() {
        let headers = fixed_authenticator()
            .sign("/api/v1/orders", &Method::GET, NO_PARAMS)
            .unwrap();
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "Content-Type",
                "KC-API-SIGN",
                "KC-API-TIMESTAMP",
                "KC-API-KEY",
                "KC-API-PASSPHRASE",
                "KC-API-KEY-VERSION",
            ]
        );

        let map = headers.to_header_map().unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map["content-type"], "application/json");
        assert_eq!(map["kc-api-key-version"], "2");
        assert_eq!(map["kc-api-timestamp"], "1700000000000");
        assert_eq!(map["kc-api-key"], "key1");
    }

    #[test]
    fn test_secret_never_in_headers() {
        let headers = fixed_authenticator()
            .sign("/api/v1/orders", &Method::GET, NO_PARAMS)
            .unwrap();
        for (_, value) in headers.iter() {
            assert!(!value.contains("s3cret"));
            assert_ne!(value, "pass1");
        }
        assert!(!format!("{:?}", fixed_authenticator()).contains("s3cret"));
    }

    #[test]
    fn test_fresh_timestamp_per_call() {
        let auth = Authenticator::new(Arc::new(credentials()));
        let first = auth.sign("/api/v1/orders", &Method::GET, NO_PARAMS).unwrap();
        let second = auth.sign("/api/v1/orders", &Method::GET, NO_PARAMS).unwrap();
        assert_ne!(first.timestamp, second.timestamp);
        assert_ne!(first.signature, second.signature);
    }
}
