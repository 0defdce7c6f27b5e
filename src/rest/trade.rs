//! Order, fill and position endpoints (authentication required).

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::auth::NO_PARAMS;
use crate::error::KucoinError;
use crate::rest::KucoinFuturesClient;
use crate::rest::endpoints::trade;
use crate::rest::traits::TradeApi;
use crate::rest::types::{
    AddMarginRequest, FillsRequest, HistoryQuery, OrderRef, OrdersRequest, PlaceOrderRequest,
};

#[derive(Serialize)]
struct SymbolParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
}

impl TradeApi for KucoinFuturesClient {
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Value, KucoinError> {
        self.signed_request(Method::POST, trade::ORDERS, Some(request))
            .await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<Value, KucoinError> {
        let endpoint = format!("{}/{}", trade::ORDERS, order_id);
        self.signed_request(Method::DELETE, &endpoint, NO_PARAMS)
            .await
    }

    async fn cancel_all_orders(&self, symbol: Option<&str>) -> Result<Value, KucoinError> {
        self.signed_request(Method::DELETE, trade::ORDERS, Some(&SymbolParams { symbol }))
            .await
    }

    async fn cancel_all_stop_orders(&self, symbol: Option<&str>) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::DELETE,
            trade::STOP_ORDERS,
            Some(&SymbolParams { symbol }),
        )
        .await
    }

    async fn get_orders(&self, request: Option<&OrdersRequest>) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::ORDERS, request)
            .await
    }

    async fn get_stop_orders(&self, request: Option<&OrdersRequest>) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::STOP_ORDERS, request)
            .await
    }

    async fn get_recent_done_orders(&self) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::RECENT_DONE_ORDERS, NO_PARAMS)
            .await
    }

    async fn get_order(&self, order: &OrderRef) -> Result<Value, KucoinError> {
        match order {
            OrderRef::OrderId(order_id) => {
                let endpoint = format!("{}/{}", trade::ORDERS, order_id);
                self.signed_request(Method::GET, &endpoint, NO_PARAMS).await
            }
            OrderRef::ClientOid(client_oid) => {
                // Signed over `/byClientOid?clientOid=..`, exactly what is sent.
                #[derive(Serialize)]
                #[serde(rename_all = "camelCase")]
                struct Params<'a> {
                    client_oid: &'a str,
                }
                self.signed_request(
                    Method::GET,
                    trade::ORDER_BY_CLIENT_OID,
                    Some(&Params { client_oid }),
                )
                .await
            }
        }
    }

    async fn get_fills(&self, request: Option<&FillsRequest>) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::FILLS, request)
            .await
    }

    async fn get_recent_fills(&self) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::RECENT_FILLS, NO_PARAMS)
            .await
    }

    async fn get_open_order_statistics(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::GET,
            trade::OPEN_ORDER_STATISTICS,
            Some(&SymbolParams {
                symbol: Some(symbol),
            }),
        )
        .await
    }

    async fn get_position(&self, symbol: &str) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::GET,
            trade::POSITION,
            Some(&SymbolParams {
                symbol: Some(symbol),
            }),
        )
        .await
    }

    async fn get_all_positions(&self) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::POSITIONS, NO_PARAMS)
            .await
    }

    async fn set_auto_deposit_margin(
        &self,
        symbol: &str,
        enabled: bool,
    ) -> Result<Value, KucoinError> {
        #[derive(Serialize)]
        struct Params<'a> {
            symbol: &'a str,
            status: bool,
        }
        self.signed_request(
            Method::POST,
            trade::AUTO_DEPOSIT_STATUS,
            Some(&Params {
                symbol,
                status: enabled,
            }),
        )
        .await
    }

    async fn add_margin(&self, request: &AddMarginRequest) -> Result<Value, KucoinError> {
        self.signed_request(Method::POST, trade::DEPOSIT_MARGIN, Some(request))
            .await
    }

    async fn get_funding_history(&self, query: &HistoryQuery) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, trade::FUNDING_HISTORY, Some(query))
            .await
    }
}
