//! Example: Private account and trading endpoints.
//!
//! Reads KUCOIN_API_KEY, KUCOIN_SECRET_KEY, KUCOIN_PASSPHRASE and
//! KUCOIN_ENVIRONMENT (`live`, anything else means sandbox).
//!
//! Run with: cargo run --example private_account

use kucoin_futures_api_client::config::ClientConfig;
use kucoin_futures_api_client::rest::{
    AccountApi, FillsRequest, KucoinFuturesClient, OrdersRequest, TradeApi,
};
use kucoin_futures_api_client::types::OrderStatus;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("Set KUCOIN_API_KEY, KUCOIN_SECRET_KEY and KUCOIN_PASSPHRASE: {err}");
            return Ok(());
        }
    };
    println!("Environment: {}", config.environment);
    let client = KucoinFuturesClient::from_config(config);

    println!("=== Account Overview ===");
    let overview = client.get_account_overview(Some("USDT")).await?;
    println!(
        "Equity {} / available {}",
        overview["data"]["accountEquity"], overview["data"]["availableBalance"]
    );

    println!("\n=== Positions ===");
    let positions = client.get_all_positions().await?;
    let count = positions["data"].as_array().map(Vec::len).unwrap_or(0);
    println!("Open positions: {}", count);

    println!("\n=== Active Orders ===");
    let orders = client
        .get_orders(Some(&OrdersRequest::default().status(OrderStatus::Active)))
        .await?;
    println!("Active orders: {}", orders["data"]["totalNum"]);

    println!("\n=== Recent Fills ===");
    let fills = client
        .get_fills(Some(&FillsRequest::default().symbol("XBTUSDM")))
        .await?;
    println!("Fills: {}", fills["data"]["totalNum"]);

    Ok(())
}
