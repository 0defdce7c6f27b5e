//! WebSocket stream implementation.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, Stream, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::{Interval, MissedTickBehavior, Sleep, interval_at, sleep};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::KucoinError;
use crate::ws::messages::{DataMessage, ErrorMessage, PingRequest, SubscribeRequest};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, WsMessage>;
type WsReceiver = SplitStream<WsStream>;

/// Events from the WebSocket connection.
#[derive(Debug, Clone)]
pub enum KucoinWsEvent {
    /// Server greeting after connecting.
    Welcome { id: String },
    /// Subscription or unsubscription acknowledged.
    Ack { id: String },
    /// Answer to a keep-alive ping.
    Pong { id: String },
    /// Data pushed for a subscribed topic.
    Message(DataMessage),
    /// Error from the server.
    Error(ErrorMessage),
    /// Connection closed or the server stopped answering pings.
    Disconnected,
    /// Unrecognized frame.
    Raw(Value),
}

/// A tracked topic subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Topic, e.g. `/contractMarket/ticker:XBTUSDM`
    pub topic: String,
    /// Whether the subscription was made on the private channel
    pub private_channel: bool,
}

/// A stream of events from a KuCoin Futures WebSocket connection.
///
/// Sends keep-alive pings at the negotiated interval and reports
/// [`KucoinWsEvent::Disconnected`] when a pong is overdue or the server
/// closes the connection. Active subscriptions are tracked so they can be
/// replayed on a fresh stream with [`KucoinStream::restore`].
pub struct KucoinStream {
    /// WebSocket sink for sending messages.
    sink: Option<Arc<Mutex<WsSink>>>,
    /// WebSocket receiver for incoming messages.
    receiver: Option<WsReceiver>,
    /// Active subscriptions keyed by topic.
    subscriptions: HashMap<String, Subscription>,
    /// Subscribe requests not yet acknowledged, request id to topic.
    pending: HashMap<String, String>,
    ping_interval: Interval,
    pong_timeout: Duration,
    /// Fires when the outstanding ping has gone unanswered for too long.
    pong_deadline: Option<Pin<Box<Sleep>>>,
    next_id: u64,
    connected: bool,
}

impl std::fmt::Debug for KucoinStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KucoinStream")
            .field("connected", &self.connected)
            .field("subscriptions", &self.subscriptions.len())
            .field("pong_timeout", &self.pong_timeout)
            .finish()
    }
}

impl KucoinStream {
    /// Connect and wait for the server's welcome frame.
    pub(crate) async fn connect(
        url: &str,
        ping_interval: Duration,
        pong_timeout: Duration,
        welcome_timeout: Duration,
    ) -> Result<Self, KucoinError> {
        // The URL carries the connection token; keep it out of errors and logs.
        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|e| KucoinError::WebSocketMsg(format!("Failed to connect: {}", e)))?;

        let (sink, receiver) = ws_stream.split();
        let ping_interval = ping_interval.max(Duration::from_secs(1));
        let mut ping_interval =
            interval_at(tokio::time::Instant::now() + ping_interval, ping_interval);
        ping_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut stream = Self {
            sink: Some(Arc::new(Mutex::new(sink))),
            receiver: Some(receiver),
            subscriptions: HashMap::new(),
            pending: HashMap::new(),
            ping_interval,
            pong_timeout,
            pong_deadline: None,
            next_id: 0,
            connected: true,
        };
        stream.wait_for_welcome(welcome_timeout).await?;
        Ok(stream)
    }

    async fn wait_for_welcome(&mut self, timeout: Duration) -> Result<(), KucoinError> {
        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| KucoinError::WebSocketMsg("Not connected".into()))?;

        let welcome = async {
            while let Some(msg) = receiver.next().await {
                match msg? {
                    WsMessage::Text(text) => {
                        let value: Value = serde_json::from_str(&text)?;
                        match value.get("type").and_then(Value::as_str) {
                            Some("welcome") => return Ok(()),
                            Some("error") => {
                                return Err(KucoinError::WebSocketMsg(format!(
                                    "Connection rejected: {}",
                                    value
                                )));
                            }
                            _ => continue,
                        }
                    }
                    WsMessage::Close(frame) => {
                        return Err(KucoinError::ConnectionClosed {
                            reason: frame
                                .map(|f| f.reason.as_str().to_string())
                                .unwrap_or_else(|| "closed before welcome".into()),
                        });
                    }
                    _ => continue,
                }
            }
            Err(KucoinError::ConnectionClosed {
                reason: "closed before welcome".into(),
            })
        };

        tokio::time::timeout(timeout, welcome)
            .await
            .map_err(|_| KucoinError::WebSocketMsg("Timeout waiting for welcome".into()))?
    }

    fn next_request_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    /// Subscribe to a topic.
    ///
    /// Set `private_channel` to receive only pushes for the connected user.
    /// Private topics need a stream opened with a private token.
    ///
    /// The topic is tracked as soon as the request is sent. If the server
    /// answers the request with an error frame, the topic is dropped again.
    pub async fn subscribe(
        &mut self,
        topic: &str,
        private_channel: bool,
    ) -> Result<(), KucoinError> {
        let id = self.next_request_id();
        let request = SubscribeRequest::subscribe(id.clone(), topic, private_channel);
        self.send_json(&request).await?;

        self.pending.insert(id, topic.to_string());
        self.subscriptions.insert(
            topic.to_string(),
            Subscription {
                topic: topic.to_string(),
                private_channel,
            },
        );
        Ok(())
    }

    /// Unsubscribe from a topic.
    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), KucoinError> {
        let private_channel = self
            .subscriptions
            .remove(topic)
            .is_some_and(|s| s.private_channel);
        let request = SubscribeRequest::unsubscribe(self.next_request_id(), topic, private_channel);
        self.send_json(&request).await
    }

    /// Re-subscribe to topics, e.g. those of a stream that was disconnected.
    pub async fn restore<I>(&mut self, subscriptions: I) -> Result<(), KucoinError>
    where
        I: IntoIterator<Item = Subscription>,
    {
        for sub in subscriptions {
            self.subscribe(&sub.topic, sub.private_channel).await?;
        }
        Ok(())
    }

    /// Active subscriptions.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.values().cloned().collect()
    }

    /// Send a keep-alive ping now.
    pub async fn ping(&mut self) -> Result<(), KucoinError> {
        let request = PingRequest::new(self.next_request_id());
        self.arm_pong_deadline();
        self.send_json(&request).await
    }

    /// Send a JSON message.
    async fn send_json<T: serde::Serialize>(&self, msg: &T) -> Result<(), KucoinError> {
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| KucoinError::WebSocketMsg("Not connected".into()))?;

        let json = serde_json::to_string(msg)?;

        let mut sink = sink.lock().await;
        sink.send(WsMessage::Text(json.into()))
            .await
            .map_err(|e| KucoinError::WebSocketMsg(format!("Failed to send message: {}", e)))
    }

    /// Parse an incoming text frame.
    fn parse_message(&mut self, text: &str) -> Option<KucoinWsEvent> {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to parse WebSocket message: {}", e);
                return None;
            }
        };

        let event = classify(value);
        match &event {
            KucoinWsEvent::Pong { .. } => self.pong_deadline = None,
            KucoinWsEvent::Ack { id } => {
                self.pending.remove(id);
            }
            KucoinWsEvent::Error(error) => {
                let rejected = error.id.as_ref().and_then(|id| self.pending.remove(id));
                if let Some(topic) = rejected {
                    tracing::warn!(topic = %topic, "Subscription rejected");
                    self.subscriptions.remove(&topic);
                }
            }
            _ => {}
        }
        Some(event)
    }

    fn arm_pong_deadline(&mut self) {
        self.pong_deadline = Some(Box::pin(sleep(self.pong_timeout)));
    }

    /// Close the connection gracefully.
    pub async fn close(&mut self) -> Result<(), KucoinError> {
        if let Some(sink) = self.sink.take() {
            let mut sink = sink.lock().await;
            let _ = sink.send(WsMessage::Close(None)).await;
        }
        self.receiver = None;
        self.connected = false;
        Ok(())
    }

    /// Check if the connection is open.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Map a decoded frame to an event by its `type` field.
fn classify(value: Value) -> KucoinWsEvent {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned);

    match kind.as_deref() {
        Some("welcome") => KucoinWsEvent::Welcome { id },
        Some("ack") => KucoinWsEvent::Ack { id },
        Some("pong") => KucoinWsEvent::Pong { id },
        Some("message") => match serde_json::from_value::<DataMessage>(value.clone()) {
            Ok(message) => KucoinWsEvent::Message(message),
            Err(e) => {
                tracing::warn!("Failed to decode data message: {}", e);
                KucoinWsEvent::Raw(value)
            }
        },
        Some("error") => match serde_json::from_value::<ErrorMessage>(value.clone()) {
            Ok(error) => KucoinWsEvent::Error(error),
            Err(_) => KucoinWsEvent::Raw(value),
        },
        _ => KucoinWsEvent::Raw(value),
    }
}

impl Stream for KucoinStream {
    type Item = Result<KucoinWsEvent, KucoinError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if !self.connected {
            return Poll::Ready(None);
        }

        let this = self.as_mut().get_mut();

        // Poll until pending so the interval stays registered for the next tick.
        let mut tick = false;
        while this.ping_interval.poll_tick(cx).is_ready() {
            tick = true;
        }

        // Keep-alive ping, only when the previous one was answered.
        if tick && this.pong_deadline.is_none() {
            let ping = PingRequest::new(this.next_request_id());
            this.arm_pong_deadline();

            if let Some(sink) = &this.sink {
                let sink = sink.clone();
                if let Ok(json) = serde_json::to_string(&ping) {
                    tokio::spawn(async move {
                        let mut sink = sink.lock().await;
                        if let Err(e) = sink.send(WsMessage::Text(json.into())).await {
                            tracing::warn!("Failed to send ping: {}", e);
                        }
                    });
                }
            }
        }

        if let Some(deadline) = this.pong_deadline.as_mut() {
            if deadline.as_mut().poll(cx).is_ready() {
                tracing::warn!("Pong overdue, treating connection as lost");
                this.pong_deadline = None;
                this.connected = false;
                return Poll::Ready(Some(Ok(KucoinWsEvent::Disconnected)));
            }
        }

        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(None);
        };

        match Pin::new(receiver).poll_next(cx) {
            Poll::Ready(Some(Ok(msg))) => {
                let this = self.as_mut().get_mut();
                match msg {
                    WsMessage::Text(text) => {
                        if let Some(event) = this.parse_message(&text) {
                            return Poll::Ready(Some(Ok(event)));
                        }
                    }
                    WsMessage::Binary(data) => {
                        if let Ok(text) = String::from_utf8(data.to_vec()) {
                            if let Some(event) = this.parse_message(&text) {
                                return Poll::Ready(Some(Ok(event)));
                            }
                        }
                    }
                    WsMessage::Close(_) => {
                        this.connected = false;
                        return Poll::Ready(Some(Ok(KucoinWsEvent::Disconnected)));
                    }
                    // Protocol-level ping/pong is answered by tungstenite.
                    WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
                }
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Poll::Ready(Some(Err(e))) => {
                let this = self.as_mut().get_mut();
                this.connected = false;
                tracing::warn!("WebSocket error: {}", e);
                Poll::Ready(Some(Err(KucoinError::WebSocket(e))))
            }
            Poll::Ready(None) => {
                let this = self.as_mut().get_mut();
                this.connected = false;
                Poll::Ready(Some(Ok(KucoinWsEvent::Disconnected)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_control_frames() {
        assert!(matches!(
            classify(json!({ "id": "abc", "type": "welcome" })),
            KucoinWsEvent::Welcome { id } if id == "abc"
        ));
        assert!(matches!(
            classify(json!({ "id": "3", "type": "ack" })),
            KucoinWsEvent::Ack { id } if id == "3"
        ));
        assert!(matches!(
            classify(json!({ "id": "4", "type": "pong" })),
            KucoinWsEvent::Pong { id } if id == "4"
        ));
    }

    #[test]
    fn test_classify_data_message() {
        let event = classify(json!({
            "type": "message",
            "topic": "/contractMarket/execution:XBTUSDM",
            "subject": "match",
            "data": { "price": "30000", "size": 5 }
        }));
        match event {
            KucoinWsEvent::Message(message) => {
                assert_eq!(message.topic, "/contractMarket/execution:XBTUSDM");
                assert_eq!(message.subject, "match");
                assert_eq!(message.data["price"], "30000");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_and_unknown() {
        let event = classify(json!({
            "id": "5",
            "type": "error",
            "code": 404,
            "data": "topic not found"
        }));
        match event {
            KucoinWsEvent::Error(error) => {
                assert_eq!(error.id.as_deref(), Some("5"));
                assert_eq!(error.data, "topic not found");
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(matches!(
            classify(json!({ "type": "notice" })),
            KucoinWsEvent::Raw(_)
        ));
        // A message without a topic cannot be decoded.
        assert!(matches!(
            classify(json!({ "type": "message" })),
            KucoinWsEvent::Raw(_)
        ));
    }
}
