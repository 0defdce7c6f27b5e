//! Account and funding endpoints (authentication required).

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::auth::NO_PARAMS;
use crate::error::KucoinError;
use crate::rest::KucoinFuturesClient;
use crate::rest::endpoints::account;
use crate::rest::traits::AccountApi;
use crate::rest::types::{
    FundRecordsRequest, TransactionHistoryRequest, TransferOutRequest, WithdrawalRequest,
};

#[derive(Serialize)]
struct CurrencyParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
}

impl AccountApi for KucoinFuturesClient {
    async fn get_account_overview(&self, currency: Option<&str>) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::GET,
            account::ACCOUNT_OVERVIEW,
            Some(&CurrencyParams { currency }),
        )
        .await
    }

    async fn get_transaction_history(
        &self,
        request: Option<&TransactionHistoryRequest>,
    ) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, account::TRANSACTION_HISTORY, request)
            .await
    }

    async fn get_deposit_address(&self, currency: &str) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::GET,
            account::DEPOSIT_ADDRESS,
            Some(&CurrencyParams {
                currency: Some(currency),
            }),
        )
        .await
    }

    async fn get_deposit_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, account::DEPOSIT_LIST, request)
            .await
    }

    async fn get_withdrawal_quotas(&self, currency: &str) -> Result<Value, KucoinError> {
        self.signed_request(
            Method::GET,
            account::WITHDRAWAL_QUOTAS,
            Some(&CurrencyParams {
                currency: Some(currency),
            }),
        )
        .await
    }

    async fn apply_withdrawal(&self, request: &WithdrawalRequest) -> Result<Value, KucoinError> {
        self.signed_request(Method::POST, account::WITHDRAWALS, Some(request))
            .await
    }

    async fn get_withdrawal_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, account::WITHDRAWAL_LIST, request)
            .await
    }

    async fn cancel_withdrawal(&self, withdrawal_id: &str) -> Result<Value, KucoinError> {
        let endpoint = format!("{}/{}", account::WITHDRAWALS, withdrawal_id);
        self.signed_request(Method::DELETE, &endpoint, NO_PARAMS)
            .await
    }

    async fn transfer_out(&self, request: &TransferOutRequest) -> Result<Value, KucoinError> {
        self.signed_request(Method::POST, account::TRANSFER_OUT, Some(request))
            .await
    }

    async fn get_transfer_list(
        &self,
        request: Option<&FundRecordsRequest>,
    ) -> Result<Value, KucoinError> {
        self.signed_request(Method::GET, account::TRANSFER_LIST, request)
            .await
    }

    async fn cancel_transfer_out(&self, apply_id: &str) -> Result<Value, KucoinError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'a> {
            apply_id: &'a str,
        }
        self.signed_request(
            Method::DELETE,
            account::CANCEL_TRANSFER_OUT,
            Some(&Params { apply_id }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::format_query;

    #[test]
    fn test_currency_params() {
        let all = CurrencyParams { currency: None };
        assert_eq!(format_query(Some(&all)).unwrap(), "");

        let usdt = CurrencyParams {
            currency: Some("USDT"),
        };
        assert_eq!(format_query(Some(&usdt)).unwrap(), "?currency=USDT");
    }
}
