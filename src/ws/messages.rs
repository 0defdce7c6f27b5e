//! WebSocket message types: token negotiation, outgoing requests and
//! incoming frames.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection token returned by the bullet endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsToken {
    /// Token appended to the connect URL.
    pub token: String,
    /// Servers the token is valid for.
    pub instance_servers: Vec<InstanceServer>,
}

/// A WebSocket server offered during token negotiation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceServer {
    /// Base WebSocket URL, e.g. `wss://ws-api-futures.kucoin.com/endpoint`
    pub endpoint: String,
    /// Whether the server requires TLS
    #[serde(default)]
    pub encrypt: bool,
    /// Transport protocol, usually `websocket`
    #[serde(default)]
    pub protocol: String,
    /// Recommended ping interval in milliseconds
    pub ping_interval: u64,
    /// Time in milliseconds after which a missing pong means the connection is dead
    pub ping_timeout: u64,
}

/// Subscribe or unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

/// Subscription request.
///
/// ```json
/// {"id":"1","type":"subscribe","topic":"/contractMarket/ticker:XBTUSDM","privateChannel":false,"response":true}
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    /// Request id echoed in the ack
    pub id: String,
    /// Subscribe or unsubscribe
    #[serde(rename = "type")]
    pub action: SubscriptionAction,
    /// Topic, e.g. `/contractMarket/ticker:XBTUSDM`
    pub topic: String,
    /// Only push data for the connected user
    pub private_channel: bool,
    /// Ask the server to acknowledge the request
    pub response: bool,
}

impl SubscribeRequest {
    /// Create a subscribe request.
    pub fn subscribe(id: impl Into<String>, topic: impl Into<String>, private_channel: bool) -> Self {
        Self {
            id: id.into(),
            action: SubscriptionAction::Subscribe,
            topic: topic.into(),
            private_channel,
            response: true,
        }
    }

    /// Create an unsubscribe request.
    pub fn unsubscribe(
        id: impl Into<String>,
        topic: impl Into<String>,
        private_channel: bool,
    ) -> Self {
        Self {
            id: id.into(),
            action: SubscriptionAction::Unsubscribe,
            topic: topic.into(),
            private_channel,
            response: true,
        }
    }
}

/// Keep-alive ping.
#[derive(Debug, Clone, Serialize)]
pub struct PingRequest {
    pub id: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl PingRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "ping",
        }
    }
}

/// A data push for a subscribed topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMessage {
    /// Topic the message belongs to
    pub topic: String,
    /// Message subject, e.g. `tickerV2`, `match`, `position.change`
    #[serde(default)]
    pub subject: String,
    /// Set on private pushes
    #[serde(default)]
    pub channel_type: Option<String>,
    /// Payload
    #[serde(default)]
    pub data: Value,
}

/// Error frame sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorMessage {
    /// Id of the request that failed, if any
    #[serde(default)]
    pub id: Option<String>,
    /// Error code
    #[serde(default)]
    pub code: Value,
    /// Error description
    #[serde(default)]
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_request_serialization() {
        let request = SubscribeRequest::subscribe("7", "/contractMarket/ticker:XBTUSDM", false);
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"id":"7","type":"subscribe","topic":"/contractMarket/ticker:XBTUSDM","privateChannel":false,"response":true}"#
        );

        let request = SubscribeRequest::unsubscribe("8", "/contractAccount/wallet", true);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "unsubscribe");
        assert_eq!(value["privateChannel"], true);
    }

    #[test]
    fn test_ping_serialization() {
        let ping = PingRequest::new("42");
        assert_eq!(
            serde_json::to_string(&ping).unwrap(),
            r#"{"id":"42","type":"ping"}"#
        );
    }

    #[test]
    fn test_token_deserialization() {
        let json = serde_json::json!({
            "token": "abc",
            "instanceServers": [{
                "endpoint": "wss://ws-api-futures.kucoin.com/endpoint",
                "encrypt": true,
                "protocol": "websocket",
                "pingInterval": 18000,
                "pingTimeout": 10000
            }]
        });
        let token: WsToken = serde_json::from_value(json).unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.instance_servers[0].ping_interval, 18000);
        assert!(token.instance_servers[0].encrypt);
    }

    #[test]
    fn test_data_message_deserialization() {
        let json = serde_json::json!({
            "type": "message",
            "topic": "/contractMarket/ticker:XBTUSDM",
            "subject": "tickerV2",
            "data": { "symbol": "XBTUSDM", "bestBidPrice": "30000.0" }
        });
        let message: DataMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message.subject, "tickerV2");
        assert_eq!(message.data["symbol"], "XBTUSDM");
        assert!(message.channel_type.is_none());
    }
}
