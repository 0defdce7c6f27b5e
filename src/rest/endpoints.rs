//! Futures REST API endpoint constants.

/// Base URL for the KuCoin Futures production API.
pub const LIVE_BASE_URL: &str = "https://api-futures.kucoin.com";

/// Base URL for the KuCoin Futures sandbox API.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox-futures.kucoin.com";

/// Public endpoints (no authentication required).
pub mod market {
    /// Contract details; append `/{symbol}`.
    pub const CONTRACTS: &str = "/api/v1/contracts";

    /// All open contracts.
    pub const ACTIVE_CONTRACTS: &str = "/api/v1/contracts/active";

    /// Real-time ticker.
    pub const TICKER: &str = "/api/v1/ticker";

    /// Full aggregated order book.
    pub const LEVEL2_SNAPSHOT: &str = "/api/v1/level2/snapshot";

    /// Partial aggregated order book; append the depth (20 or 100).
    pub const LEVEL2_DEPTH: &str = "/api/v1/level2/depth";

    /// Level 2 message pulling.
    pub const LEVEL2_MESSAGES: &str = "/api/v1/level2/message/query";

    /// Full atomic order book.
    pub const LEVEL3_SNAPSHOT: &str = "/api/v2/level3/snapshot";

    /// Level 3 message pulling.
    pub const LEVEL3_MESSAGES: &str = "/api/v1/level3/message/query";

    /// Last 100 trades.
    pub const TRADE_HISTORY: &str = "/api/v1/trade/history";

    /// Interest rate list.
    pub const INTEREST_RATES: &str = "/api/v1/interest/query";

    /// Index list.
    pub const INDEX_LIST: &str = "/api/v1/index/query";

    /// Mark price; formatted as `/api/v1/mark-price/{symbol}/current`.
    pub const MARK_PRICE: &str = "/api/v1/mark-price";

    /// Premium index list.
    pub const PREMIUM_INDEX: &str = "/api/v1/premium/query";

    /// Current funding rate; formatted as `/api/v1/funding-rate/{symbol}/current`.
    pub const FUNDING_RATE: &str = "/api/v1/funding-rate";

    /// Server time.
    pub const SERVER_TIME: &str = "/api/v1/timestamp";

    /// Klines.
    pub const KLINES: &str = "/api/v1/kline/query";

    /// Public WebSocket token.
    pub const BULLET_PUBLIC: &str = "/api/v1/bullet-public";
}

/// Account and funding endpoints (authentication required).
pub mod account {
    /// Account overview.
    pub const ACCOUNT_OVERVIEW: &str = "/api/v1/account-overview";

    /// Transaction history.
    pub const TRANSACTION_HISTORY: &str = "/api/v1/transaction-history";

    /// Deposit address.
    pub const DEPOSIT_ADDRESS: &str = "/api/v1/deposit-address";

    /// Deposit list.
    pub const DEPOSIT_LIST: &str = "/api/v1/deposit-list";

    /// Withdrawal quotas.
    pub const WITHDRAWAL_QUOTAS: &str = "/api/v1/withdrawals/quotas";

    /// Apply for a withdrawal; append `/{withdrawalId}` to cancel one.
    pub const WITHDRAWALS: &str = "/api/v1/withdrawals";

    /// Withdrawal list.
    pub const WITHDRAWAL_LIST: &str = "/api/v1/withdrawal-list";

    /// Transfer funds out to the main account.
    pub const TRANSFER_OUT: &str = "/api/v2/transfer-out";

    /// Transfer list.
    pub const TRANSFER_LIST: &str = "/api/v1/transfer-list";

    /// Cancel a pending transfer out.
    pub const CANCEL_TRANSFER_OUT: &str = "/api/v1/cancel/transfer-out";

    /// Private WebSocket token.
    pub const BULLET_PRIVATE: &str = "/api/v1/bullet-private";
}

/// Trading and position endpoints (authentication required).
pub mod trade {
    /// Place, list and cancel orders; append `/{orderId}` for a single order.
    pub const ORDERS: &str = "/api/v1/orders";

    /// Look up an order by client order id.
    pub const ORDER_BY_CLIENT_OID: &str = "/api/v1/orders/byClientOid";

    /// Untriggered stop orders.
    pub const STOP_ORDERS: &str = "/api/v1/stopOrders";

    /// Orders completed in the last 24 hours.
    pub const RECENT_DONE_ORDERS: &str = "/api/v1/recentDoneOrders";

    /// Fills.
    pub const FILLS: &str = "/api/v1/fills";

    /// Fills in the last 24 hours.
    pub const RECENT_FILLS: &str = "/api/v1/recentFills";

    /// Active order value statistics.
    pub const OPEN_ORDER_STATISTICS: &str = "/api/v1/openOrderStatistics";

    /// Single position.
    pub const POSITION: &str = "/api/v1/position";

    /// All positions.
    pub const POSITIONS: &str = "/api/v1/positions";

    /// Enable or disable auto-deposit margin.
    pub const AUTO_DEPOSIT_STATUS: &str = "/api/v1/position/margin/auto-deposit-status";

    /// Add margin manually.
    pub const DEPOSIT_MARGIN: &str = "/api/v1/position/margin/deposit-margin";

    /// Funding fee history.
    pub const FUNDING_HISTORY: &str = "/api/v1/funding-history";
}
