//! Authentication module for the KuCoin Futures API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Millisecond timestamps used as per-request nonces
//! - Query-string encoding shared by request URLs and signatures
//! - HMAC-SHA256 signatures and the `KC-API-*` header set

mod credentials;
mod query;
mod signature;
mod timestamp;

pub use credentials::{
    API_KEY_VAR, Credentials, CredentialsProvider, EnvCredentials, KeyVersion, PASSPHRASE_VAR,
    SECRET_KEY_VAR, StaticCredentials,
};
pub use query::{NO_PARAMS, format_query};
pub use signature::{
    AuthHeaders, Authenticator, JSON_CONTENT_TYPE, RequestPayload, canonical_string, headers,
    sign_passphrase, sign_request,
};
pub use timestamp::{FixedTimestamp, MillisTimestamp, TimestampProvider};
