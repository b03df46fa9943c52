use crate::utils::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

/// 由外部驗證服務取得的登入狀態，明確地傳給需要它的元件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<String>,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

/// 同時具備使用者 ID 與 bearer token 的登入資訊
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub user_id: &'a str,
    pub access_token: &'a str,
}

impl Session {
    pub fn new(user: &str, user_id: &str, access_token: &str) -> Self {
        Self {
            user: Some(user.to_string()),
            user_id: Some(user_id.to_string()),
            access_token: Some(access_token.to_string()),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let user_id = self
            .user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TrackerError::AuthenticationError {
                message: "no user id in session".to_string(),
            })?;
        let access_token = self
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TrackerError::AuthenticationError {
                message: "no access token in session".to_string(),
            })?;

        Ok(Credentials {
            user_id,
            access_token,
        })
    }
}
