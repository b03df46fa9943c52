use crate::domain::model::{ExpenseRecord, NewExpense, Registration};
use crate::domain::ports::ExpenseApi;
use crate::domain::session::Session;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockExpenseApi {
    records: Vec<ExpenseRecord>,
    fail_status: Option<u16>,
    fetches: Arc<Mutex<usize>>,
    submitted: Arc<Mutex<Vec<NewExpense>>>,
    registered: Arc<Mutex<Vec<String>>>,
}

impl MockExpenseApi {
    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    pub fn submitted(&self) -> Vec<NewExpense> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        match self.fail_status {
            Some(status) => Err(TrackerError::HttpStatusError {
                status,
                message: if status == 403 {
                    "Forbidden".to_string()
                } else {
                    "Submission Failed".to_string()
                },
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExpenseApi for MockExpenseApi {
    async fn fetch_expenses(&self, session: &Session) -> Result<Vec<ExpenseRecord>> {
        session.credentials()?;
        *self.fetches.lock().unwrap() += 1;
        self.check()?;
        Ok(self.records.clone())
    }

    async fn add_expense(&self, session: &Session, expense: &NewExpense) -> Result<serde_json::Value> {
        session.credentials()?;
        self.check()?;
        self.submitted.lock().unwrap().push(expense.clone());
        Ok(serde_json::json!({ "message": "created" }))
    }

    async fn register(&self, registration: &Registration) -> Result<serde_json::Value> {
        self.check()?;
        self.registered
            .lock()
            .unwrap()
            .push(registration.username.clone());
        Ok(serde_json::json!({ "success": true }))
    }
}
