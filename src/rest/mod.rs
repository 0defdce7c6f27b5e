//! KuCoin Futures REST API.
//!
//! [`KucoinFuturesClient`] implements [`MarketApi`], [`AccountApi`] and
//! [`TradeApi`]; bring the trait you need into scope to call its operations.

mod account;
mod client;
pub mod endpoints;
mod market;
mod trade;
mod traits;
pub mod types;

pub use client::{KucoinFuturesClient, KucoinFuturesClientBuilder};
pub use traits::{AccountApi, MarketApi, TradeApi};
pub use types::*;
