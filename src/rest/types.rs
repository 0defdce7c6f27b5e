//! Request types for the Futures REST API.
//!
//! Every request serializes with camelCase keys and omits unset fields, so the
//! encoded query or body carries only what the caller set. Timestamps are
//! milliseconds since the UNIX epoch.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::common::{
    OrderStatus, OrderType, OrderTypeFilter, Side, StopDirection, StopPriceType, TimeInForce,
};

// Market data requests.

/// Order book depth for partial snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookDepth {
    /// Top 20 levels
    Depth20,
    /// Top 100 levels
    Depth100,
}

impl BookDepth {
    /// Number of levels.
    pub fn levels(&self) -> u32 {
        match self {
            BookDepth::Depth20 => 20,
            BookDepth::Depth100 => 100,
        }
    }
}

/// Request for level 2 / level 3 message pulling.
#[derive(Debug, Clone, Serialize)]
pub struct BookMessagesRequest {
    /// Contract symbol
    pub symbol: String,
    /// First sequence number
    pub start: u64,
    /// Last sequence number
    pub end: u64,
}

impl BookMessagesRequest {
    /// Create a new request for a sequence range.
    pub fn new(symbol: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }
}

/// Paged query over a symbol's history: interest rates, index, premium
/// index and funding fees.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Contract or index symbol
    pub symbol: String,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
    /// Newest first (exchange default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    /// Paging offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Page forward from the offset (exchange default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<bool>,
    /// Page size (exchange default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
}

impl HistoryQuery {
    /// Create a query for a symbol with exchange defaults.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Restrict to a time range.
    pub fn time_range(mut self, start_at: u64, end_at: u64) -> Self {
        self.start_at = Some(start_at);
        self.end_at = Some(end_at);
        self
    }

    /// Set the page size.
    pub fn max_count(mut self, max_count: u32) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Set the paging offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Request for klines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KlineRequest {
    /// Contract symbol
    pub symbol: String,
    /// Candle size in minutes
    pub granularity: u32,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
}

impl KlineRequest {
    /// Create a kline request.
    pub fn new(symbol: impl Into<String>, granularity: u32) -> Self {
        Self {
            symbol: symbol.into(),
            granularity,
            start_at: None,
            end_at: None,
        }
    }

    /// Restrict to a time range.
    pub fn time_range(mut self, start_at: u64, end_at: u64) -> Self {
        self.start_at = Some(start_at);
        self.end_at = Some(end_at);
        self
    }
}

// Account and funding requests.

/// Request for transaction history.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryRequest {
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
    /// Transaction type (RealisedPNL, Deposit, Withdrawal, TransferIn, TransferOut)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Paging offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Page size (exchange default: 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    /// Currency filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Page forward from the offset (exchange default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<bool>,
}

/// Filter for deposit, withdrawal and transfer records.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecordsRequest {
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
    /// Record status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Currency filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl FundRecordsRequest {
    /// Filter by currency.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Filter by status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request to withdraw funds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Currency to withdraw
    pub currency: String,
    /// Destination address
    pub address: String,
    /// Amount to withdraw
    pub amount: Decimal,
    /// Internal transfer between KuCoin accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inner: Option<bool>,
    /// Free-form remark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Chain name (exchange default: ERC20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    /// Address memo/tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl WithdrawalRequest {
    /// Create a withdrawal request.
    pub fn new(currency: impl Into<String>, address: impl Into<String>, amount: Decimal) -> Self {
        Self {
            currency: currency.into(),
            address: address.into(),
            amount,
            is_inner: None,
            remark: None,
            chain: None,
            memo: None,
        }
    }

    /// Set the chain.
    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    /// Set the address memo.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Request to transfer funds out of the futures account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutRequest {
    /// Unique request id chosen by the caller
    pub biz_no: String,
    /// Amount to transfer
    pub amount: Decimal,
    /// Currency
    pub currency: String,
}

impl TransferOutRequest {
    /// Create a transfer request.
    pub fn new(biz_no: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            biz_no: biz_no.into(),
            amount,
            currency: currency.into(),
        }
    }
}

// Trading requests.

/// Request to place a new order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// Unique order id chosen by the caller
    pub client_oid: String,
    /// Order side
    pub side: Side,
    /// Contract symbol (e.g., "XBTUSDM")
    pub symbol: String,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Leverage
    pub leverage: Decimal,
    /// Remark, at most 100 UTF-8 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Stop trigger direction; requires `stop_price_type` and `stop_price`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopDirection>,
    /// Price feed for the stop trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price_type: Option<StopPriceType>,
    /// Stop trigger price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// Only reduce the position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    /// Close the position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_order: Option<bool>,
    /// Force-hold funds for the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_hold: Option<bool>,
    /// Limit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Size in lots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Time in force for limit orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Post only; invalid with IOC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    /// Hide the order from the book
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Iceberg order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<bool>,
    /// Visible size of an iceberg order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_size: Option<u64>,
}

impl PlaceOrderRequest {
    fn base(
        client_oid: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        leverage: Decimal,
    ) -> Self {
        Self {
            client_oid: client_oid.into(),
            side,
            symbol: symbol.into(),
            order_type,
            leverage,
            remark: None,
            stop: None,
            stop_price_type: None,
            stop_price: None,
            reduce_only: None,
            close_order: None,
            force_hold: None,
            price: None,
            size: None,
            time_in_force: None,
            post_only: None,
            hidden: None,
            iceberg: None,
            visible_size: None,
        }
    }

    /// Create a limit order request.
    pub fn limit(
        client_oid: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        leverage: Decimal,
        price: Decimal,
        size: u64,
    ) -> Self {
        let mut order = Self::base(client_oid, symbol, side, OrderType::Limit, leverage);
        order.price = Some(price);
        order.size = Some(size);
        order
    }

    /// Create a market order request.
    pub fn market(
        client_oid: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        leverage: Decimal,
        size: u64,
    ) -> Self {
        let mut order = Self::base(client_oid, symbol, side, OrderType::Market, leverage);
        order.size = Some(size);
        order
    }

    /// Turn this into a stop order.
    pub fn stop(
        mut self,
        direction: StopDirection,
        price_type: StopPriceType,
        stop_price: Decimal,
    ) -> Self {
        self.stop = Some(direction);
        self.stop_price_type = Some(price_type);
        self.stop_price = Some(stop_price);
        self
    }

    /// Set the reduce-only flag.
    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = Some(reduce_only);
        self
    }

    /// Set the close-order flag.
    pub fn close_order(mut self, close_order: bool) -> Self {
        self.close_order = Some(close_order);
        self
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Set the post-only flag.
    pub fn post_only(mut self, post_only: bool) -> Self {
        self.post_only = Some(post_only);
        self
    }

    /// Hide the order from the book.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Make this an iceberg order showing `visible_size` lots.
    pub fn iceberg(mut self, visible_size: u64) -> Self {
        self.iceberg = Some(true);
        self.visible_size = Some(visible_size);
        self
    }

    /// Set a remark.
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

/// Identifies a single order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// Exchange-assigned order id
    OrderId(String),
    /// Caller-assigned client order id
    ClientOid(String),
}

/// Filter for order lists (regular and stop orders).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersRequest {
    /// Order status (exchange default: done); ignored for stop orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Contract symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Order side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Order type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderTypeFilter>,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
}

impl OrdersRequest {
    /// Filter by status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Filter by side.
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }
}

/// Filter for fills.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillsRequest {
    /// Fills of a single order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Contract symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Order side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Order type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderTypeFilter>,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
}

impl FillsRequest {
    /// Fills for a single order.
    pub fn for_order(order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            ..Default::default()
        }
    }

    /// Filter by symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// Request to add margin to a position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMarginRequest {
    /// Contract symbol
    pub symbol: String,
    /// Margin amount
    pub margin: Decimal,
    /// Unique request id chosen by the caller
    pub biz_no: String,
}

impl AddMarginRequest {
    /// Create an add-margin request.
    pub fn new(symbol: impl Into<String>, margin: Decimal, biz_no: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            margin,
            biz_no: biz_no.into(),
        }
    }
}
