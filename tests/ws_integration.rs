use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kucoin_futures_api_client::rest::KucoinFuturesClient;
use kucoin_futures_api_client::ws::{
    KucoinStream, KucoinWsClient, KucoinWsEvent, WsConfig, topics,
};

/// Minimal KuCoin-style server: welcome, ack subscriptions, push one ticker
/// message, answer pings when `answer_pings` is set.
///
/// Topics ending in `:UNKNOWN` are rejected with an error frame.
async fn spawn_ws_server(answer_pings: bool) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback =
            |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
                let _ = uri_tx.send(request.uri().to_string());
                Ok(response)
            };
        let ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();
        let (mut write, mut read) = ws.split();

        let welcome = json!({ "id": "conn-1", "type": "welcome" });
        write
            .send(Message::Text(welcome.to_string().into()))
            .await
            .unwrap();

        while let Some(Ok(msg)) = read.next().await {
            let Message::Text(text) = msg else { continue };
            let frame: Value = serde_json::from_str(&text).unwrap();
            let id = frame["id"].clone();
            let unknown = frame["topic"]
                .as_str()
                .is_some_and(|topic| topic.ends_with(":UNKNOWN"));
            match frame["type"].as_str() {
                Some("subscribe") if unknown => {
                    let error = json!({
                        "id": id,
                        "type": "error",
                        "code": 404,
                        "data": "topic does not exist"
                    });
                    write.send(Message::Text(error.to_string().into())).await.unwrap();
                }
                Some("subscribe") => {
                    let ack = json!({ "id": id, "type": "ack" });
                    write.send(Message::Text(ack.to_string().into())).await.unwrap();
                    let push = json!({
                        "type": "message",
                        "topic": frame["topic"],
                        "subject": "tickerV2",
                        "data": { "symbol": "XBTUSDM", "bestBidPrice": "30000.0" }
                    });
                    write.send(Message::Text(push.to_string().into())).await.unwrap();
                }
                Some("ping") if answer_pings => {
                    let pong = json!({ "id": id, "type": "pong" });
                    write.send(Message::Text(pong.to_string().into())).await.unwrap();
                }
                _ => {}
            }
        }
    });

    (format!("ws://{addr}/endpoint"), uri_rx)
}

async fn mock_bullet_public(endpoint: &str) -> MockServer {
    let rest_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bullet-public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200000",
            "data": {
                "token": "public-token",
                "instanceServers": [{
                    "endpoint": endpoint,
                    "encrypt": false,
                    "protocol": "websocket",
                    "pingInterval": 18000,
                    "pingTimeout": 10000
                }]
            }
        })))
        .expect(1)
        .mount(&rest_server)
        .await;
    rest_server
}

fn ws_client(rest_server: &MockServer, config: WsConfig) -> KucoinWsClient {
    let rest = KucoinFuturesClient::builder()
        .base_url(rest_server.uri())
        .build();
    KucoinWsClient::with_config(rest, config)
}

async fn next_event(stream: &mut KucoinStream) -> KucoinWsEvent {
    tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("stream error")
}

#[tokio::test]
async fn test_public_stream_subscribe_and_ping() {
    let (endpoint, uri_rx) = spawn_ws_server(true).await;
    let rest_server = mock_bullet_public(&endpoint).await;

    let config = WsConfig::builder()
        .ping_interval(Duration::from_secs(1))
        .build();
    let client = ws_client(&rest_server, config);

    let mut stream = client.connect_public().await.unwrap();
    assert!(stream.is_connected());

    let uri = uri_rx.await.unwrap();
    assert!(uri.starts_with("/endpoint?token=public-token&connectId="));

    let topic = topics::ticker("XBTUSDM");
    stream.subscribe(&topic, false).await.unwrap();
    assert_eq!(stream.subscriptions().len(), 1);
    assert_eq!(stream.subscriptions()[0].topic, topic);

    match next_event(&mut stream).await {
        KucoinWsEvent::Ack { id } => assert_eq!(id, "1"),
        other => panic!("expected ack, got {other:?}"),
    }

    match next_event(&mut stream).await {
        KucoinWsEvent::Message(message) => {
            assert_eq!(message.topic, topic);
            assert_eq!(message.subject, "tickerV2");
            assert_eq!(message.data["symbol"], "XBTUSDM");
        }
        other => panic!("expected message, got {other:?}"),
    }

    // The keep-alive ping fires after one interval and is answered.
    match next_event(&mut stream).await {
        KucoinWsEvent::Pong { id } => assert_eq!(id, "2"),
        other => panic!("expected pong, got {other:?}"),
    }

    stream.unsubscribe(&topic).await.unwrap();
    assert!(stream.subscriptions().is_empty());

    stream.close().await.unwrap();
    assert!(!stream.is_connected());
}

#[tokio::test]
async fn test_unanswered_ping_reports_disconnect() {
    let (endpoint, _uri_rx) = spawn_ws_server(false).await;
    let rest_server = mock_bullet_public(&endpoint).await;

    let config = WsConfig::builder()
        .ping_interval(Duration::from_secs(1))
        .pong_timeout(Duration::from_millis(500))
        .build();
    let client = ws_client(&rest_server, config);

    let mut stream = client.connect_public().await.unwrap();
    let started = Instant::now();

    // The outer timeout is far past the deadline so it cannot be what wakes the stream.
    let event = tokio::time::timeout(Duration::from_secs(10), stream.next())
        .await
        .expect("no disconnect before timeout")
        .expect("stream ended")
        .expect("stream error");
    let elapsed = started.elapsed();

    assert!(matches!(event, KucoinWsEvent::Disconnected), "got {event:?}");
    assert!(elapsed >= Duration::from_secs(1), "too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "too late: {elapsed:?}");
    assert!(!stream.is_connected());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_rejected_subscription_is_dropped() {
    let (endpoint, _uri_rx) = spawn_ws_server(true).await;
    let rest_server = mock_bullet_public(&endpoint).await;
    let client = ws_client(&rest_server, WsConfig::default());

    let mut stream = client.connect_public().await.unwrap();

    let good = topics::ticker("XBTUSDM");
    let bad = topics::ticker("UNKNOWN");
    stream.subscribe(&bad, false).await.unwrap();
    stream.subscribe(&good, false).await.unwrap();
    assert_eq!(stream.subscriptions().len(), 2);

    match next_event(&mut stream).await {
        KucoinWsEvent::Error(error) => {
            assert_eq!(error.id.as_deref(), Some("1"));
            assert_eq!(error.data, "topic does not exist");
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(stream.subscriptions().len(), 1);
    assert_eq!(stream.subscriptions()[0].topic, good);

    match next_event(&mut stream).await {
        KucoinWsEvent::Ack { id } => assert_eq!(id, "2"),
        other => panic!("expected ack, got {other:?}"),
    }
    assert_eq!(stream.subscriptions().len(), 1);

    stream.close().await.unwrap();
}
