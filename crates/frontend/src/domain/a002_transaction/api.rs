use std::collections::BTreeMap;

use async_trait::async_trait;
use contracts::domain::a001_account::AccountId;
use contracts::domain::a002_transaction::{TransactionId, TransactionRecord};
use contracts::shared::ApiResponse;
use serde_json::Value;

use crate::shared::api_utils::join_url;
use crate::shared::error::RequestError;
use crate::shared::request::{fetch, RequestOptions};

/// Операции с доходами и расходами
#[async_trait(?Send)]
pub trait TransactionService {
    /// Список транзакций счёта; `filters` уходят в запрос как есть
    async fn list(
        &self,
        account_id: &AccountId,
        filters: &BTreeMap<String, String>,
    ) -> Result<ApiResponse<Vec<TransactionRecord>>, RequestError>;

    async fn remove(&self, id: &TransactionId) -> Result<ApiResponse<Value>, RequestError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransactionService {
    base_url: String,
}

impl HttpTransactionService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self) -> String {
        join_url(&self.base_url, "/transaction")
    }
}

/// Параметры запроса списка: фильтры страницы плюс `account_id`
pub fn list_options(
    url: String,
    account_id: &AccountId,
    filters: &BTreeMap<String, String>,
) -> RequestOptions {
    let options = filters
        .iter()
        .fold(RequestOptions::get(url), |opts, (k, v)| opts.with_data(k.as_str(), v));
    options.with_data("account_id", account_id)
}

#[async_trait(?Send)]
impl TransactionService for HttpTransactionService {
    async fn list(
        &self,
        account_id: &AccountId,
        filters: &BTreeMap<String, String>,
    ) -> Result<ApiResponse<Vec<TransactionRecord>>, RequestError> {
        fetch(list_options(self.url(), account_id, filters)).await
    }

    async fn remove(&self, id: &TransactionId) -> Result<ApiResponse<Value>, RequestError> {
        fetch(RequestOptions::delete(self.url()).with_data("id", id)).await
    }
}
