//! KuCoin Futures REST API client implementation.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde_json::Value;

use crate::auth::{
    Authenticator, CredentialsProvider, RequestPayload, TimestampProvider, format_query,
};
use crate::config::{ClientConfig, Environment};
use crate::error::{ApiError, KucoinError};

/// The KuCoin Futures REST API client.
///
/// Endpoint operations live on the [`MarketApi`](crate::rest::MarketApi),
/// [`AccountApi`](crate::rest::AccountApi) and [`TradeApi`](crate::rest::TradeApi)
/// traits. Private operations are signed by the client's [`Authenticator`];
/// successful responses are returned as the parsed JSON body.
///
/// # Example
///
/// ```rust,no_run
/// use kucoin_futures_api_client::rest::{KucoinFuturesClient, MarketApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = KucoinFuturesClient::new();
///
///     let ticker = client.get_ticker("XBTUSDM").await?;
///     println!("Ticker: {}", ticker["data"]);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use kucoin_futures_api_client::auth::StaticCredentials;
/// use kucoin_futures_api_client::config::Environment;
/// use kucoin_futures_api_client::rest::{AccountApi, KucoinFuturesClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "secret", "passphrase")?);
///     let client = KucoinFuturesClient::builder()
///         .environment(Environment::Live)
///         .credentials(credentials)
///         .build();
///
///     let overview = client.get_account_overview(Some("USDT")).await?;
///     println!("Overview: {overview}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KucoinFuturesClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    authenticator: Option<Authenticator>,
}

impl KucoinFuturesClient {
    /// Create a new sandbox client for public endpoints.
    ///
    /// Use [`KucoinFuturesClient::builder()`] to select the live environment or
    /// configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KucoinFuturesClientBuilder {
        KucoinFuturesClientBuilder::new()
    }

    /// Create a client from a prepared configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        KucoinFuturesClientBuilder::from_config(config).build()
    }

    /// The REST base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The authenticator used for private endpoints, if configured.
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    // HTTP request methods.

    /// Make a public GET request; `params` become the query string.
    pub(crate) async fn public_get<P>(
        &self,
        endpoint: &str,
        params: Option<&P>,
    ) -> Result<Value, KucoinError>
    where
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}{}", self.base_url, endpoint, format_query(params)?);
        tracing::debug!(method = "GET", endpoint, "sending public request");
        let response = self.http_client.get(&url).send().await?;
        self.parse_response(response).await
    }

    /// Make a public POST request without a body.
    pub(crate) async fn public_post(&self, endpoint: &str) -> Result<Value, KucoinError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(method = "POST", endpoint, "sending public request");
        let response = self.http_client.post(&url).send().await?;
        self.parse_response(response).await
    }

    /// Make a signed request.
    ///
    /// The parameters are encoded once; the signature covers exactly the query
    /// string or body that is sent.
    pub(crate) async fn signed_request<P>(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&P>,
    ) -> Result<Value, KucoinError>
    where
        P: Serialize + ?Sized,
    {
        let authenticator = self
            .authenticator
            .as_ref()
            .ok_or(KucoinError::MissingCredentials)?;

        let payload = RequestPayload::encode(&method, params)?;
        let headers = authenticator.sign_payload(endpoint, &method, &payload)?;

        let url = format!("{}{}{}", self.base_url, endpoint, payload.query());
        tracing::debug!(method = %method, endpoint, "sending signed request");

        let mut request = self
            .http_client
            .request(method, &url)
            .headers(headers.to_header_map()?);
        if let Some(body) = payload.body() {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        self.parse_response(response).await
    }

    /// Parse a response from the KuCoin API.
    ///
    /// Non-2xx responses become errors: [`KucoinError::Api`] when the body is
    /// the exchange's `{code, msg}` envelope, [`KucoinError::InvalidResponse`]
    /// otherwise. Successful bodies are returned unchanged.
    async fn parse_response(&self, response: reqwest::Response) -> Result<Value, KucoinError> {
        let status = response.status();
        let body = response.text().await?;

        let value = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(KucoinError::InvalidResponse(format!(
                    "Failed to parse response: {}. Body: {}",
                    e, body
                )));
            }
            Err(_) => {
                return Err(KucoinError::InvalidResponse(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }
        };

        if !status.is_success() {
            return Err(match ApiError::from_envelope(&value) {
                Some(api_error) => KucoinError::Api(api_error),
                None => KucoinError::InvalidResponse(format!("HTTP {}: {}", status, body)),
            });
        }

        Ok(value)
    }
}

impl Default for KucoinFuturesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KucoinFuturesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KucoinFuturesClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.authenticator.is_some())
            .finish()
    }
}

/// Builder for [`KucoinFuturesClient`].
pub struct KucoinFuturesClientBuilder {
    config: ClientConfig,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
}

impl KucoinFuturesClientBuilder {
    /// Create a new builder targeting the sandbox.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Start from a prepared configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            timestamp_provider: None,
            user_agent: None,
        }
    }

    /// Select the environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> KucoinFuturesClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kucoin-futures-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kucoin-futures-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let base_url = self.config.base_url().trim_end_matches('/').to_string();
        let timestamp_provider = self.timestamp_provider;
        let authenticator = self.config.credentials.map(|credentials| {
            let authenticator = Authenticator::new(credentials);
            match timestamp_provider {
                Some(provider) => authenticator.with_timestamp_provider(provider),
                None => authenticator,
            }
        });

        KucoinFuturesClient {
            http_client: client,
            base_url,
            authenticator,
        }
    }
}

impl Default for KucoinFuturesClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    #[test]
    fn test_default_client_targets_sandbox() {
        let client = KucoinFuturesClient::new();
        assert_eq!(client.base_url(), "https://api-sandbox-futures.kucoin.com");
        assert!(client.authenticator().is_none());
    }

    #[test]
    fn test_builder_environment_and_override() {
        let live = KucoinFuturesClient::builder()
            .environment(Environment::Live)
            .build();
        assert_eq!(live.base_url(), "https://api-futures.kucoin.com");

        let mock = KucoinFuturesClient::builder()
            .environment(Environment::Live)
            .base_url("http://localhost:9000/")
            .build();
        assert_eq!(mock.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let credentials = Arc::new(StaticCredentials::new("key", "hidden_secret", "pass").unwrap());
        let client = KucoinFuturesClient::builder()
            .credentials(credentials)
            .build();
        let debug = format!("{client:?}");
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("hidden_secret"));
    }

    #[tokio::test]
    async fn test_signed_request_requires_credentials() {
        let client = KucoinFuturesClient::new();
        let err = client
            .signed_request(Method::GET, "/api/v1/positions", crate::auth::NO_PARAMS)
            .await
            .unwrap_err();
        assert!(matches!(err, KucoinError::MissingCredentials));
    }
}
