use async_trait::async_trait;
use contracts::domain::a001_account::{Account, AccountId};
use contracts::shared::ApiResponse;
use serde_json::Value;

use crate::shared::api_utils::join_url;
use crate::shared::error::RequestError;
use crate::shared::request::{fetch, RequestOptions};

/// Операции со счетами, которые нужны странице транзакций
#[async_trait(?Send)]
pub trait AccountService {
    async fn get(&self, id: &AccountId) -> Result<ApiResponse<Account>, RequestError>;

    async fn remove(&self, id: &AccountId) -> Result<ApiResponse<Value>, RequestError>;
}

/// Клиент `/account` поверх шлюза запросов
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    base_url: String,
}

impl HttpAccountService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self) -> String {
        join_url(&self.base_url, "/account")
    }
}

#[async_trait(?Send)]
impl AccountService for HttpAccountService {
    async fn get(&self, id: &AccountId) -> Result<ApiResponse<Account>, RequestError> {
        fetch(RequestOptions::get(self.url()).with_data("id", id)).await
    }

    async fn remove(&self, id: &AccountId) -> Result<ApiResponse<Value>, RequestError> {
        fetch(RequestOptions::delete(self.url()).with_data("id", id)).await
    }
}
