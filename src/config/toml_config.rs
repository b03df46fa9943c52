use crate::domain::ports::ConfigProvider;
use crate::domain::session::Session;
use crate::report::ExportFormat;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_BASE_URL: &str = "https://car-expense-tracker-h6k1.onrender.com/api";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user: Option<String>,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string()],
        }
    }
}

impl TrackerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRACKER_ACCESS_TOKEN})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        validation::validate_path("export.output_path", &self.export.output_path)?;
        // 與 --formats 共用同一套解析規則 (不分大小寫)
        ExportFormat::parse_list(&self.export.formats)?;

        for (field, value) in [
            ("session.user", &self.session.user),
            ("session.user_id", &self.session.user_id),
            ("session.access_token", &self.session.access_token),
        ] {
            if let Some(value) = value {
                if let Some(caps) = ENV_VAR_RE.captures(value) {
                    return Err(TrackerError::InvalidConfigValueError {
                        field: field.to_string(),
                        value: value.clone(),
                        reason: format!("environment variable {} is not set", &caps[1]),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn session(&self) -> Session {
        Session {
            user: self.session.user.clone(),
            user_id: self.session.user_id.clone(),
            access_token: self.session.access_token.clone(),
        }
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(30)
    }
}

impl ConfigProvider for TrackerConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }
}

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
