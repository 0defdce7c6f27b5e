//! Capability traits grouping the KuCoin Futures REST operations.
//!
//! The operations are split the way the exchange documents them:
//! - [`MarketApi`]: public market data, no credentials needed
//! - [`AccountApi`]: account overview, deposits, withdrawals and transfers
//! - [`TradeApi`]: orders, fills and positions
//!
//! Code that only needs one capability can be generic over that trait,
//! which also makes it easy to substitute a mock in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use kucoin_futures_api_client::rest::MarketApi;
//!
//! async fn print_mark_price<C: MarketApi>(client: &C) -> Result<(), kucoin_futures_api_client::KucoinError> {
//!     let price = client.get_mark_price("XBTUSDM").await?;
//!     println!("Mark price: {}", price["data"]["value"]);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use serde_json::Value;

use crate::error::KucoinError;
use crate::rest::types::{
    AddMarginRequest, BookDepth, BookMessagesRequest, FillsRequest, FundRecordsRequest,
    HistoryQuery, KlineRequest, OrderRef, OrdersRequest, PlaceOrderRequest,
    TransactionHistoryRequest, TransferOutRequest, WithdrawalRequest,
};

/// Public market data operations.
pub trait MarketApi: Send + Sync {
    /// Get contract details for a symbol.
    fn get_contract(&self, symbol: &str)
    -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get all open contracts.
    fn get_all_contracts(&self) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the real-time ticker for a symbol.
    fn get_ticker(&self, symbol: &str) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the full aggregated order book.
    fn get_full_order_book(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the top 20 or 100 levels of the aggregated order book.
    fn get_part_order_book(
        &self,
        depth: BookDepth,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Pull level 2 messages for a sequence range.
    fn get_level2_messages(
        &self,
        request: &BookMessagesRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the full atomic (level 3) order book.
    fn get_full_order_book_atomic(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Pull level 3 messages for a sequence range.
    fn get_level3_messages(
        &self,
        request: &BookMessagesRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the last 100 trades for a symbol.
    fn get_trade_history(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the interest rate list.
    fn get_interest_rates(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the index list.
    fn get_index_list(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the current mark price.
    fn get_mark_price(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the premium index list.
    fn get_premium_index(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the current funding rate.
    fn get_funding_rate(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the server time.
    fn get_server_time(&self) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get klines.
    fn get_klines(
        &self,
        request: &KlineRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;
}

/// Account and funding operations (signed).
pub trait AccountApi: Send + Sync {
    /// Get the account overview, optionally for one currency.
    fn get_account_overview(
        &self,
        currency: Option<&str>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get transaction history.
    fn get_transaction_history(
        &self,
        request: Option<&TransactionHistoryRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the deposit address for a currency.
    fn get_deposit_address(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List deposits.
    fn get_deposit_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get withdrawal quotas for a currency.
    fn get_withdrawal_quotas(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Apply for a withdrawal.
    fn apply_withdrawal(
        &self,
        request: &WithdrawalRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List withdrawals.
    fn get_withdrawal_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Cancel a pending withdrawal.
    fn cancel_withdrawal(
        &self,
        withdrawal_id: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Transfer funds out of the futures account.
    fn transfer_out(
        &self,
        request: &TransferOutRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List transfers out.
    fn get_transfer_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Cancel a pending transfer out.
    fn cancel_transfer_out(
        &self,
        apply_id: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;
}

/// Order and position operations (signed).
pub trait TradeApi: Send + Sync {
    /// Place a new order.
    fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Cancel an order (including a stop order).
    fn cancel_order(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Cancel all open orders, optionally for one symbol. Stop orders are kept.
    fn cancel_all_orders(
        &self,
        symbol: Option<&str>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Cancel all untriggered stop orders, optionally for one symbol.
    fn cancel_all_stop_orders(
        &self,
        symbol: Option<&str>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List orders.
    fn get_orders(
        &self,
        request: Option<&OrdersRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List untriggered stop orders.
    fn get_stop_orders(
        &self,
        request: Option<&OrdersRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get up to 1000 orders completed in the last 24 hours.
    fn get_recent_done_orders(&self) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get a single order by order id or client order id.
    fn get_order(
        &self,
        order: &OrderRef,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// List fills.
    fn get_fills(
        &self,
        request: Option<&FillsRequest>,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get up to 1000 fills from the last 24 hours.
    fn get_recent_fills(&self) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the value of active orders for a symbol.
    fn get_open_order_statistics(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get the position for a symbol.
    fn get_position(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get all positions.
    fn get_all_positions(&self) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Enable or disable auto-deposit margin for a position.
    fn set_auto_deposit_margin(
        &self,
        symbol: &str,
        enabled: bool,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Add margin to a position.
    fn add_margin(
        &self,
        request: &AddMarginRequest,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;

    /// Get funding fee history.
    fn get_funding_history(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = Result<Value, KucoinError>> + Send;
}
