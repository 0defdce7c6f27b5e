//! Example: WebSocket ticker and execution feeds.
//!
//! Run with: cargo run --example ws_ticker

use futures_util::StreamExt;
use kucoin_futures_api_client::config::Environment;
use kucoin_futures_api_client::rest::KucoinFuturesClient;
use kucoin_futures_api_client::ws::{KucoinWsClient, KucoinWsEvent, topics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Connecting to KuCoin Futures WebSocket...");
    let rest = KucoinFuturesClient::builder()
        .environment(Environment::Live)
        .build();
    let client = KucoinWsClient::new(rest);
    let mut stream = client.connect_public().await?;

    stream.subscribe(&topics::ticker("XBTUSDM"), false).await?;
    stream.subscribe(&topics::execution("XBTUSDM"), false).await?;

    let mut seen = 0;
    while let Some(event) = stream.next().await {
        match event? {
            KucoinWsEvent::Ack { id } => println!("Subscribed (request {id})"),
            KucoinWsEvent::Message(msg) => {
                println!("{} [{}]: {}", msg.topic, msg.subject, msg.data);
            }
            KucoinWsEvent::Error(err) => println!("Error {}: {}", err.code, err.data),
            KucoinWsEvent::Disconnected => break,
            _ => {}
        }
        seen += 1;
        if seen >= 50 {
            break;
        }
    }

    stream.close().await?;
    Ok(())
}
