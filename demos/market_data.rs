//! Example: Public market data.
//!
//! Run with: cargo run --example market_data

use kucoin_futures_api_client::config::Environment;
use kucoin_futures_api_client::rest::{
    BookDepth, HistoryQuery, KlineRequest, KucoinFuturesClient, MarketApi,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = KucoinFuturesClient::builder()
        .environment(Environment::Live)
        .build();

    println!("=== Server Time ===");
    let time = client.get_server_time().await?;
    println!("Server time: {}", time["data"]);

    println!("\n=== Contract ===");
    let contract = client.get_contract("XBTUSDM").await?;
    println!(
        "{}: multiplier={} maxLeverage={}",
        contract["data"]["symbol"], contract["data"]["multiplier"], contract["data"]["maxLeverage"]
    );

    println!("\n=== Ticker ===");
    let ticker = client.get_ticker("XBTUSDM").await?;
    println!(
        "Bid {} / Ask {}",
        ticker["data"]["bestBidPrice"], ticker["data"]["bestAskPrice"]
    );

    println!("\n=== Order Book (top 20) ===");
    let book = client
        .get_part_order_book(BookDepth::Depth20, "XBTUSDM")
        .await?;
    if let Some(bid) = book["data"]["bids"].get(0) {
        println!("Best bid level: {}", bid);
    }

    println!("\n=== Mark Price & Funding ===");
    let mark = client.get_mark_price("XBTUSDM").await?;
    println!("Mark price: {}", mark["data"]["value"]);
    let funding = client.get_funding_rate("XBTUSDM").await?;
    println!("Funding rate: {}", funding["data"]["value"]);

    println!("\n=== Premium Index ===");
    let premium = client
        .get_premium_index(&HistoryQuery::new(".XBTUSDMPI").max_count(3))
        .await?;
    println!("Premium index: {}", premium["data"]["dataList"]);

    println!("\n=== Klines (1h) ===");
    let klines = client.get_klines(&KlineRequest::new("XBTUSDM", 60)).await?;
    let count = klines["data"].as_array().map(Vec::len).unwrap_or(0);
    println!("Klines: {}", count);

    Ok(())
}
