//! WebSocket client: token negotiation and connection setup.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::{MillisTimestamp, NO_PARAMS, TimestampProvider};
use crate::error::KucoinError;
use crate::rest::KucoinFuturesClient;
use crate::rest::endpoints::{account, market};
use crate::ws::messages::{InstanceServer, WsToken};
use crate::ws::stream::KucoinStream;

/// Configuration for WebSocket connections.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Ping interval; `None` uses the interval advertised by the server.
    pub ping_interval: Option<Duration>,
    /// Pong timeout; `None` uses the timeout advertised by the server.
    pub pong_timeout: Option<Duration>,
    /// How long to wait for the server's welcome frame.
    pub welcome_timeout: Duration,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            ping_interval: None,
            pong_timeout: None,
            welcome_timeout: Duration::from_secs(10),
        }
    }
}

impl WsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WsConfigBuilder {
        WsConfigBuilder::new()
    }

    fn ping_interval_for(&self, server: &InstanceServer) -> Duration {
        self.ping_interval
            .unwrap_or_else(|| Duration::from_millis(server.ping_interval))
    }

    fn pong_timeout_for(&self, server: &InstanceServer) -> Duration {
        self.pong_timeout
            .unwrap_or_else(|| Duration::from_millis(server.ping_timeout))
    }
}

/// Builder for [`WsConfig`].
#[derive(Debug, Clone, Default)]
pub struct WsConfigBuilder {
    config: WsConfig,
}

impl WsConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: WsConfig::default(),
        }
    }

    /// Override the server's ping interval.
    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.config.ping_interval = Some(interval);
        self
    }

    /// Override the server's pong timeout.
    pub fn pong_timeout(mut self, timeout: Duration) -> Self {
        self.config.pong_timeout = Some(timeout);
        self
    }

    /// Set how long to wait for the welcome frame.
    pub fn welcome_timeout(mut self, timeout: Duration) -> Self {
        self.config.welcome_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> WsConfig {
        self.config
    }
}

/// KuCoin Futures WebSocket client.
///
/// Negotiates a connection token through the REST client, then opens a
/// [`KucoinStream`] to the first instance server offered.
///
/// # Example
///
/// ```rust,ignore
/// use kucoin_futures_api_client::rest::KucoinFuturesClient;
/// use kucoin_futures_api_client::ws::{KucoinWsClient, topics};
/// use futures_util::StreamExt;
///
/// let client = KucoinWsClient::new(KucoinFuturesClient::new());
/// let mut stream = client.connect_public().await?;
///
/// stream.subscribe(&topics::ticker("XBTUSDM"), false).await?;
///
/// while let Some(event) = stream.next().await {
///     println!("{:?}", event?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct KucoinWsClient {
    rest: KucoinFuturesClient,
    config: WsConfig,
}

impl KucoinWsClient {
    /// Create a WebSocket client on top of a REST client.
    pub fn new(rest: KucoinFuturesClient) -> Self {
        Self::with_config(rest, WsConfig::default())
    }

    /// Create a WebSocket client with custom configuration.
    pub fn with_config(rest: KucoinFuturesClient, config: WsConfig) -> Self {
        Self { rest, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Request a token for public topics.
    pub async fn public_token(&self) -> Result<WsToken, KucoinError> {
        let response = self.rest.public_post(market::BULLET_PUBLIC).await?;
        parse_token(response)
    }

    /// Request a token for public and private topics (signed).
    pub async fn private_token(&self) -> Result<WsToken, KucoinError> {
        let response = self
            .rest
            .signed_request(Method::POST, account::BULLET_PRIVATE, NO_PARAMS)
            .await?;
        parse_token(response)
    }

    /// Connect with a public token.
    pub async fn connect_public(&self) -> Result<KucoinStream, KucoinError> {
        let token = self.public_token().await?;
        self.connect_with_token(&token).await
    }

    /// Connect with a private token; requires credentials on the REST client.
    pub async fn connect_private(&self) -> Result<KucoinStream, KucoinError> {
        let token = self.private_token().await?;
        self.connect_with_token(&token).await
    }

    /// Connect to the first instance server of a negotiated token.
    pub async fn connect_with_token(&self, token: &WsToken) -> Result<KucoinStream, KucoinError> {
        let server = token.instance_servers.first().ok_or_else(|| {
            KucoinError::InvalidResponse("token response lists no instance servers".into())
        })?;

        let connect_id = MillisTimestamp::new().next_timestamp().to_string();
        let url = connect_url(server, &token.token, &connect_id)?;
        tracing::debug!(endpoint = %server.endpoint, connect_id = %connect_id, "connecting to WebSocket");

        KucoinStream::connect(
            &url,
            self.config.ping_interval_for(server),
            self.config.pong_timeout_for(server),
            self.config.welcome_timeout,
        )
        .await
    }
}

/// Build the connect URL `{endpoint}?token=..&connectId=..`.
///
/// Fails with [`KucoinError::Url`] if the server endpoint is not a valid URL.
pub fn connect_url(
    server: &InstanceServer,
    token: &str,
    connect_id: &str,
) -> Result<String, KucoinError> {
    let mut url = Url::parse(&server.endpoint)?;
    let query = serde_urlencoded::to_string([("token", token), ("connectId", connect_id)])?;
    url.set_query(Some(&query));
    Ok(url.into())
}

fn parse_token(response: Value) -> Result<WsToken, KucoinError> {
    let data = response.get("data").cloned().ok_or_else(|| {
        KucoinError::InvalidResponse(format!("token response without data: {response}"))
    })?;
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> InstanceServer {
        InstanceServer {
            endpoint: "wss://ws-api-futures.kucoin.com/endpoint".into(),
            encrypt: true,
            protocol: "websocket".into(),
            ping_interval: 18000,
            ping_timeout: 10000,
        }
    }

    #[test]
    fn test_connect_url() {
        let url = connect_url(&server(), "tok+en/1", "1700000000000").unwrap();
        assert_eq!(
            url,
            "wss://ws-api-futures.kucoin.com/endpoint?token=tok%2Ben%2F1&connectId=1700000000000"
        );

        let mut bad = server();
        bad.endpoint = "not a url".into();
        let err = connect_url(&bad, "token", "1").unwrap_err();
        assert!(matches!(err, KucoinError::Url(_)));
    }

    #[test]
    fn test_config_falls_back_to_server_timings() {
        let config = WsConfig::default();
        assert_eq!(config.ping_interval_for(&server()), Duration::from_secs(18));
        assert_eq!(config.pong_timeout_for(&server()), Duration::from_secs(10));

        let config = WsConfig::builder()
            .ping_interval(Duration::from_secs(5))
            .pong_timeout(Duration::from_secs(2))
            .welcome_timeout(Duration::from_secs(3))
            .build();
        assert_eq!(config.ping_interval_for(&server()), Duration::from_secs(5));
        assert_eq!(config.pong_timeout_for(&server()), Duration::from_secs(2));
        assert_eq!(config.welcome_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_parse_token_envelope() {
        let response = serde_json::json!({
            "code": "200000",
            "data": {
                "token": "abc",
                "instanceServers": [{
                    "endpoint": "wss://ws-api-futures.kucoin.com/endpoint",
                    "pingInterval": 18000,
                    "pingTimeout": 10000
                }]
            }
        });
        let token = parse_token(response).unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.instance_servers.len(), 1);

        let err = parse_token(serde_json::json!({ "code": "200000" })).unwrap_err();
        assert!(matches!(err, KucoinError::InvalidResponse(_)));
    }
}
