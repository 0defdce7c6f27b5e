//! Public market data endpoints (no authentication required).

use serde::Serialize;
use serde_json::Value;

use crate::auth::NO_PARAMS;
use crate::error::KucoinError;
use crate::rest::KucoinFuturesClient;
use crate::rest::endpoints::market;
use crate::rest::traits::MarketApi;
use crate::rest::types::{BookDepth, BookMessagesRequest, HistoryQuery, KlineRequest};

#[derive(Serialize)]
struct SymbolParams<'a> {
    symbol: &'a str,
}

impl KucoinFuturesClient {
    async fn symbol_get(&self, endpoint: &str, symbol: &str) -> Result<Value, KucoinError> {
        self.public_get(endpoint, Some(&SymbolParams { symbol }))
            .await
    }
}

impl MarketApi for KucoinFuturesClient {
    async fn get_contract(&self, symbol: &str) -> Result<Value, KucoinError> {
        let endpoint = format!("{}/{}", market::CONTRACTS, symbol);
        self.public_get(&endpoint, NO_PARAMS).await
    }

    async fn get_all_contracts(&self) -> Result<Value, KucoinError> {
        self.public_get(market::ACTIVE_CONTRACTS, NO_PARAMS).await
    }

    async fn get_ticker(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.symbol_get(market::TICKER, symbol).await
    }

    async fn get_full_order_book(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.symbol_get(market::LEVEL2_SNAPSHOT, symbol).await
    }

    async fn get_part_order_book(
        &self,
        depth: BookDepth,
        symbol: &str,
    ) -> Result<Value, KucoinError> {
        let endpoint = format!("{}{}", market::LEVEL2_DEPTH, depth.levels());
        self.symbol_get(&endpoint, symbol).await
    }

    async fn get_level2_messages(
        &self,
        request: &BookMessagesRequest,
    ) -> Result<Value, KucoinError> {
        self.public_get(market::LEVEL2_MESSAGES, Some(request)).await
    }

    async fn get_full_order_book_atomic(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.symbol_get(market::LEVEL3_SNAPSHOT, symbol).await
    }

    async fn get_level3_messages(
        &self,
        request: &BookMessagesRequest,
    ) -> Result<Value, KucoinError> {
        self.public_get(market::LEVEL3_MESSAGES, Some(request)).await
    }

    async fn get_trade_history(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.symbol_get(market::TRADE_HISTORY, symbol).await
    }

    async fn get_interest_rates(&self, query: &HistoryQuery) -> Result<Value, KucoinError> {
        self.public_get(market::INTEREST_RATES, Some(query)).await
    }

    async fn get_index_list(&self, query: &HistoryQuery) -> Result<Value, KucoinError> {
        self.public_get(market::INDEX_LIST, Some(query)).await
    }

    async fn get_mark_price(&self, symbol: &str) -> Result<Value, KucoinError> {
        let endpoint = format!("{}/{}/current", market::MARK_PRICE, symbol);
        self.public_get(&endpoint, NO_PARAMS).await
    }

    async fn get_premium_index(&self, query: &HistoryQuery) -> Result<Value, KucoinError> {
        self.public_get(market::PREMIUM_INDEX, Some(query)).await
    }

    async fn get_funding_rate(&self, symbol: &str) -> Result<Value, KucoinError> {
        let endpoint = format!("{}/{}/current", market::FUNDING_RATE, symbol);
        self.public_get(&endpoint, NO_PARAMS).await
    }

    async fn get_server_time(&self) -> Result<Value, KucoinError> {
        self.public_get(market::SERVER_TIME, NO_PARAMS).await
    }

    async fn get_klines(&self, request: &KlineRequest) -> Result<Value, KucoinError> {
        self.public_get(market::KLINES, Some(request)).await
    }
}
