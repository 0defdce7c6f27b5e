//! # KuCoin Futures Client
//!
//! An async Rust client library for the KuCoin Futures REST and WebSocket APIs.
//!
//! ## Features
//!
//! - Market data, account, funding and trading REST endpoints
//! - KuCoin v2 request signing (`KC-API-*` headers, HMAC-SHA256)
//! - WebSocket feeds with token negotiation and keep-alive pings
//! - Live and sandbox environments
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kucoin_futures_api_client::rest::{KucoinFuturesClient, MarketApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KucoinFuturesClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {}", time["data"]);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;
pub mod ws;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, KucoinError};
pub use rest::{AccountApi, KucoinFuturesClient, MarketApi, TradeApi};
pub use types::common::{OrderStatus, OrderType, Side};

/// Result type alias using KucoinError
pub type Result<T> = std::result::Result<T, KucoinError>;
