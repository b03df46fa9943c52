use crate::domain::model::{ExpenseRecord, NewExpense, Registration};
use crate::domain::session::Session;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// 遠端支出 API
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    async fn fetch_expenses(&self, session: &Session) -> Result<Vec<ExpenseRecord>>;
    async fn add_expense(&self, session: &Session, expense: &NewExpense) -> Result<serde_json::Value>;
    async fn register(&self, registration: &Registration) -> Result<serde_json::Value>;
}
