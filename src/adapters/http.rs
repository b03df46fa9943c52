use crate::domain::model::{ExpenseRecord, NewExpense, Registration};
use crate::domain::ports::{ConfigProvider, ExpenseApi};
use crate::domain::session::Session;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use url::Url;

const EXPENSES_PATH: &str = "expenses";
const USERS_PATH: &str = "users";

/// reqwest 實作的遠端支出 API 用戶端
pub struct HttpExpenseApi {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl HttpExpenseApi {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = Url::parse(config.api_base_url()).map_err(|e| {
            TrackerError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: config.api_base_url().to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            base_url,
            client: Client::new(),
            timeout: Duration::from_secs(config.timeout_seconds()),
        })
    }

    /// 在 base URL 後加上路徑片段 (自動百分比編碼)
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                TrackerError::config(format!("base URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

// 每個操作各自的錯誤訊息對應
struct StatusMessages {
    fallback: &'static str,
    // 403 是否顯示 "Forbidden"
    forbidden: bool,
    // 409 是否帶出伺服器的 message
    conflict: bool,
}

const FETCH_MESSAGES: StatusMessages = StatusMessages {
    fallback: "Failed to fetch expenses",
    forbidden: true,
    conflict: false,
};

const SUBMIT_MESSAGES: StatusMessages = StatusMessages {
    fallback: "Submission Failed",
    forbidden: true,
    conflict: true,
};

const REGISTER_MESSAGES: StatusMessages = StatusMessages {
    fallback: "Registration Failed",
    forbidden: false,
    conflict: true,
};

// 將非 2xx 回應轉成錯誤
async fn check_status(response: Response, messages: &StatusMessages) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match status {
        StatusCode::FORBIDDEN if messages.forbidden => "Forbidden".to_string(),
        StatusCode::CONFLICT if messages.conflict => {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            body.get("message")
                .map(|m| m.to_string())
                .unwrap_or_else(|| messages.fallback.to_string())
        }
        _ => messages.fallback.to_string(),
    };

    tracing::warn!("API responded with {}: {}", status, message);
    Err(TrackerError::HttpStatusError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn fetch_expenses(&self, session: &Session) -> Result<Vec<ExpenseRecord>> {
        let creds = session.credentials()?;
        let url = self.endpoint(&[EXPENSES_PATH, "user", creds.user_id])?;

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .request(self.client.get(url), Some(creds.access_token))
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        let response = check_status(response, &FETCH_MESSAGES).await?;
        let body = response.text().await?;
        let records: Vec<ExpenseRecord> = serde_json::from_str(&body)?;

        tracing::info!("📥 Expenses fetched successfully ({} records)", records.len());
        Ok(records)
    }

    async fn add_expense(&self, session: &Session, expense: &NewExpense) -> Result<serde_json::Value> {
        let creds = session.credentials()?;
        let url = self.endpoint(&[EXPENSES_PATH])?;

        tracing::debug!("Posting expense to: {}", url);
        let response = self
            .request(self.client.post(url).json(expense), Some(creds.access_token))
            .send()
            .await?;

        let response = check_status(response, &SUBMIT_MESSAGES).await?;
        let created = response.json().await.unwrap_or(serde_json::Value::Null);
        tracing::info!("✅ Expense submitted");
        Ok(created)
    }

    async fn register(&self, registration: &Registration) -> Result<serde_json::Value> {
        let url = self.endpoint(&[USERS_PATH])?;

        tracing::debug!("Registering user '{}' at: {}", registration.username, url);
        let response = self
            .request(self.client.post(url).json(registration), None)
            .send()
            .await?;

        let response = check_status(response, &REGISTER_MESSAGES).await?;
        let created = response.json().await.unwrap_or(serde_json::Value::Null);
        tracing::info!("✅ Registered user '{}'", registration.username);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn api_base_url(&self) -> &str {
            &self.base_url
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }
    }

    fn api_for(base_url: String) -> HttpExpenseApi {
        HttpExpenseApi::new(&MockConfig { base_url }).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_user_id() {
        let api = api_for("https://api.example.com/api/".to_string());
        let url = api.endpoint(&["expenses", "user", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/expenses/user/a%20b%2Fc");

        let api = api_for("https://api.example.com".to_string());
        let url = api.endpoint(&["users"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = HttpExpenseApi::new(&MockConfig {
            base_url: "not a url".to_string(),
        });
        assert!(matches!(
            result,
            Err(TrackerError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_expenses_sends_bearer_token() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/expenses/user/u1")
                .header("Authorization", "Bearer tok");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"_id": "1", "category": "Gas", "cost": 40, "date": "2024-01-15",
                     "isGasExpense": true, "gasGallons": 10, "milesTraveledForGas": 300,
                     "milesPerGallon": 30},
                    {"_id": "2", "category": "Wash", "cost": 25, "date": "2024-01-20",
                     "isGasExpense": false}
                ]));
        });

        let api = api_for(server.base_url());
        let records = api
            .fetch_expenses(&Session::new("alice", "u1", "tok"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_gas_expense);
        assert_eq!(records[1].cost, 25.0);
    }

    #[tokio::test]
    async fn test_fetch_expenses_without_token_makes_no_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!([]));
        });

        let api = api_for(server.base_url());
        let session = Session {
            user_id: Some("u1".to_string()),
            ..Session::default()
        };
        let result = api.fetch_expenses(&session).await;

        assert!(matches!(result, Err(TrackerError::AuthenticationError { .. })));
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_fetch_expenses_forbidden() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/expenses/user/u1");
            then.status(403);
        });

        let api = api_for(server.base_url());
        let err = api
            .fetch_expenses(&Session::new("alice", "u1", "expired"))
            .await
            .unwrap_err();

        assert_eq!(err.user_friendly_message(), "Forbidden");
    }

    #[tokio::test]
    async fn test_fetch_expenses_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/expenses/user/u1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"expenses": "nope"}));
        });

        let api = api_for(server.base_url());
        let err = api
            .fetch_expenses(&Session::new("alice", "u1", "tok"))
            .await
            .unwrap_err();

        assert!(matches!(err, TrackerError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_server_message() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/users")
                .json_body(serde_json::json!({
                    "username": "alice",
                    "password": "Passw0rd!",
                    "email": "alice@example.com"
                }));
            then.status(409)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"message": "Username Taken"}));
        });

        let api = api_for(server.base_url());
        let err = api
            .register(&Registration {
                username: "alice".to_string(),
                password: "Passw0rd!".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap_err();

        api_mock.assert();
        assert_eq!(err.user_friendly_message(), "\"Username Taken\"");
    }

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            password: "Passw0rd!".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn new_expense() -> NewExpense {
        NewExpense {
            user_id: "u1".to_string(),
            category: "Gas".to_string(),
            cost: "40.00".to_string(),
            mileage: "120500".to_string(),
            date: "01/15/24".to_string(),
            notes: String::new(),
            is_gas_expense: true,
            miles_traveled_for_gas: "300".to_string(),
            gas_gallons: "10".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_forbidden_is_registration_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users");
            then.status(403);
        });

        let api = api_for(server.base_url());
        let err = api.register(&registration()).await.unwrap_err();

        assert!(matches!(err, TrackerError::HttpStatusError { status: 403, .. }));
        assert_eq!(err.user_friendly_message(), "Registration Failed");
    }

    #[tokio::test]
    async fn test_add_expense_status_messages() {
        let server = MockServer::start();
        let session = Session::new("alice", "u1", "tok");
        let api = api_for(server.base_url());

        let mut forbidden = server.mock(|when, then| {
            when.method(POST).path("/expenses");
            then.status(403);
        });
        let err = api.add_expense(&session, &new_expense()).await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "Forbidden");
        forbidden.delete();

        // 401 沒有特別處理
        server.mock(|when, then| {
            when.method(POST).path("/expenses");
            then.status(401);
        });
        let err = api.add_expense(&session, &new_expense()).await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "Submission Failed");
    }
}
