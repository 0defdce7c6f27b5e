//! Credential management for KuCoin API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::KucoinError;

/// Signing scheme selector sent in the `KC-API-KEY-VERSION` header.
///
/// Only the v2 scheme is supported: the passphrase is sent as an
/// HMAC digest under the secret key, never in plaintext.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyVersion {
    /// Passphrase digest scheme
    #[default]
    V2,
}

impl KeyVersion {
    /// Header value for this key version.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyVersion::V2 => "2",
        }
    }
}

impl std::fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API credentials: key, secret, passphrase and key version.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The API secret (private, used as the HMAC key)
    secret_key: SecretString,
    /// The passphrase chosen when the key was created
    passphrase: SecretString,
    /// Signing scheme version
    key_version: KeyVersion,
}

impl Credentials {
    /// Create new credentials from an API key, secret and passphrase.
    ///
    /// Empty values are rejected here rather than surfacing later as
    /// authentication failures from the exchange.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Result<Self, KucoinError> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();
        let passphrase = passphrase.into();

        for (name, value) in [
            ("API key", &api_key),
            ("secret key", &secret_key),
            ("passphrase", &passphrase),
        ] {
            if value.trim().is_empty() {
                return Err(KucoinError::InvalidCredentials(format!("{name} is empty")));
            }
        }

        Ok(Self {
            api_key,
            secret_key: SecretString::from(secret_key),
            passphrase: SecretString::from(passphrase),
            key_version: KeyVersion::V2,
        })
    }

    /// Get the secret key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Get the plaintext passphrase.
    ///
    /// This method exposes the passphrase - use carefully.
    pub fn expose_passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }

    /// Get the signing scheme version.
    pub fn key_version(&self) -> KeyVersion {
        self.key_version
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .field("key_version", &self.key_version)
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager or environment variables.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Result<Self, KucoinError> {
        Ok(Self {
            credentials: Credentials::new(api_key, secret_key, passphrase)?,
        })
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "KUCOIN_API_KEY";
/// Default environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "KUCOIN_SECRET_KEY";
/// Default environment variable holding the passphrase.
pub const PASSPHRASE_VAR: &str = "KUCOIN_PASSPHRASE";

/// Credentials provider that reads from environment variables.
///
/// By default, reads `KUCOIN_API_KEY`, `KUCOIN_SECRET_KEY` and `KUCOIN_PASSPHRASE`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, KucoinError> {
        Self::from_env_vars(API_KEY_VAR, SECRET_KEY_VAR, PASSPHRASE_VAR)
    }

    /// Create credentials from custom environment variable names.
    pub fn from_env_vars(
        key_var: &str,
        secret_var: &str,
        passphrase_var: &str,
    ) -> Result<Self, KucoinError> {
        let read = |var: &str| {
            std::env::var(var).map_err(|_| {
                KucoinError::InvalidCredentials(format!("environment variable {var} not set"))
            })
        };

        Ok(Self {
            credentials: Credentials::new(read(key_var)?, read(secret_var)?, read(passphrase_var)?)?,
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if any variable is missing or empty.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "super_secret", "my_passphrase").unwrap();
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(!debug_str.contains("my_passphrase"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("key", "secret", "pass").unwrap();
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "secret");
        assert_eq!(creds.expose_passphrase(), "pass");
        assert_eq!(creds.key_version(), KeyVersion::V2);
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", "secret", "pass"),
            Err(KucoinError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", "  ", "pass"),
            Err(KucoinError::InvalidCredentials(_))
        ));
        let err = Credentials::new("key", "secret", "").unwrap_err();
        assert!(err.to_string().contains("passphrase"));
    }

    #[test]
    fn test_missing_env_vars() {
        let result = EnvCredentials::from_env_vars(
            "KUCOIN_TEST_UNSET_KEY",
            "KUCOIN_TEST_UNSET_SECRET",
            "KUCOIN_TEST_UNSET_PASSPHRASE",
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("KUCOIN_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_key_version_header_value() {
        assert_eq!(KeyVersion::V2.as_str(), "2");
        assert_eq!(KeyVersion::default().to_string(), "2");
    }
}
