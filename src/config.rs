//! Client configuration: environment selection and credentials.
//!
//! Configuration is built once and handed to the client by value; nothing is
//! mutated after construction.

use std::str::FromStr;
use std::sync::Arc;

use crate::auth::{CredentialsProvider, EnvCredentials};
use crate::error::KucoinError;
use crate::rest::endpoints::{LIVE_BASE_URL, SANDBOX_BASE_URL};

/// Environment variable selecting the environment.
pub const ENVIRONMENT_VAR: &str = "KUCOIN_ENVIRONMENT";

/// Exchange environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production trading
    Live,
    /// Sandbox with test funds
    #[default]
    Sandbox,
}

impl Environment {
    /// Select an environment by name.
    ///
    /// `"live"` selects [`Environment::Live`]; any other value selects the sandbox.
    pub fn from_name(name: &str) -> Self {
        if name == "live" {
            Environment::Live
        } else {
            Environment::Sandbox
        }
    }

    /// REST base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Live => LIVE_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Live => write!(f, "live"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Immutable client configuration.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Selected environment
    pub environment: Environment,
    /// Base URL override (mock servers, proxies)
    pub base_url: Option<String>,
    /// Credentials for private endpoints
    pub credentials: Option<Arc<dyn CredentialsProvider>>,
}

impl ClientConfig {
    /// Configuration for public endpoints only.
    pub fn public(environment: Environment) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    /// Configuration with credentials for private endpoints.
    pub fn with_credentials(
        environment: Environment,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            environment,
            base_url: None,
            credentials: Some(credentials),
        }
    }

    /// Build configuration from the process environment.
    ///
    /// Reads `KUCOIN_ENVIRONMENT` (absent means sandbox) and the credential
    /// variables. Missing or empty credentials are an error.
    pub fn from_env() -> Result<Self, KucoinError> {
        let environment = std::env::var(ENVIRONMENT_VAR)
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();
        let credentials = EnvCredentials::from_env()?;
        Ok(Self::with_credentials(environment, Arc::new(credentials)))
    }

    /// Effective REST base URL.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}
