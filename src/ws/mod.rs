//! KuCoin Futures WebSocket API client.
//!
//! Connections are opened with a short-lived token obtained from the REST
//! API ("bullet" endpoints). Public tokens can subscribe to market topics;
//! private tokens, which need credentials on the REST client, can also
//! subscribe to account topics.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kucoin_futures_api_client::rest::KucoinFuturesClient;
//! use kucoin_futures_api_client::ws::{KucoinWsClient, KucoinWsEvent, topics};
//! use futures_util::StreamExt;
//!
//! let client = KucoinWsClient::new(KucoinFuturesClient::new());
//! let mut stream = client.connect_public().await?;
//!
//! stream.subscribe(&topics::ticker("XBTUSDM"), false).await?;
//!
//! while let Some(event) = stream.next().await {
//!     if let KucoinWsEvent::Message(msg) = event? {
//!         println!("{}: {}", msg.subject, msg.data);
//!     }
//! }
//! ```
//!
//! ## Private topics
//!
//! ```rust,ignore
//! let client = KucoinWsClient::new(rest_client_with_credentials);
//! let mut stream = client.connect_private().await?;
//!
//! stream.subscribe(topics::TRADE_ORDERS, true).await?;
//! stream.subscribe(&topics::position("XBTUSDM"), true).await?;
//! ```

mod client;
mod messages;
mod stream;

pub use client::{KucoinWsClient, WsConfig, WsConfigBuilder, connect_url};
pub use messages::*;
pub use stream::{KucoinStream, KucoinWsEvent, Subscription};

/// Topic names.
pub mod topics {
    // Public topics

    /// Ticker for a symbol.
    pub fn ticker(symbol: &str) -> String {
        format!("/contractMarket/ticker:{symbol}")
    }

    /// Incremental level 2 order book updates.
    pub fn level2(symbol: &str) -> String {
        format!("/contractMarket/level2:{symbol}")
    }

    /// Top 5 levels of the order book.
    pub fn level2_depth5(symbol: &str) -> String {
        format!("/contractMarket/level2Depth5:{symbol}")
    }

    /// Top 50 levels of the order book.
    pub fn level2_depth50(symbol: &str) -> String {
        format!("/contractMarket/level2Depth50:{symbol}")
    }

    /// Trade executions.
    pub fn execution(symbol: &str) -> String {
        format!("/contractMarket/execution:{symbol}")
    }

    /// Mark price, index price and funding rate.
    pub fn instrument(symbol: &str) -> String {
        format!("/contract/instrument:{symbol}")
    }

    /// Funding settlement announcements.
    pub fn announcement(symbol: &str) -> String {
        format!("/contract/announcement:{symbol}")
    }

    /// Transaction statistics snapshot.
    pub fn snapshot(symbol: &str) -> String {
        format!("/contractMarket/snapshot:{symbol}")
    }

    // Private topics

    /// Order changes for all symbols.
    pub const TRADE_ORDERS: &str = "/contractMarket/tradeOrders";

    /// Order changes for one symbol.
    pub fn trade_orders(symbol: &str) -> String {
        format!("{TRADE_ORDERS}:{symbol}")
    }

    /// Untriggered stop order changes.
    pub const ADVANCED_ORDERS: &str = "/contractMarket/advancedOrders";

    /// Position changes for a symbol.
    pub fn position(symbol: &str) -> String {
        format!("/contract/position:{symbol}")
    }

    /// Account balance changes.
    pub const WALLET: &str = "/contractAccount/wallet";

}
