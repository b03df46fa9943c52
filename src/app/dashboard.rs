use crate::core::aggregation::{self, ExpenseSummary};
use crate::domain::model::{ExpenseRecord, YearMonth};
use crate::domain::ports::ExpenseApi;
use crate::domain::session::Session;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// 一次抓取的支出紀錄，摘要直接借用其中的資料
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSnapshot {
    pub records: Vec<ExpenseRecord>,
}

impl ExpenseSnapshot {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn summarize(&self, selected_month: Option<YearMonth>, today: NaiveDate) -> ExpenseSummary<'_> {
        aggregation::summarize(&self.records, selected_month, today)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct Dashboard<A: ExpenseApi> {
    api: A,
}

impl<A: ExpenseApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load(&self, session: &Session) -> Result<ExpenseSnapshot> {
        tracing::info!("🚀 Fetching expenses");
        let records = match self.api.fetch_expenses(session).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("❌ Failed to fetch expenses: {}", e);
                return Err(e);
            }
        };

        let gas = records.iter().filter(|r| r.is_gas_expense).count();
        tracing::debug!(
            "Fetched {} records ({} gas, {} regular)",
            records.len(),
            gas,
            records.len() - gas
        );

        Ok(ExpenseSnapshot::new(records))
    }
}
