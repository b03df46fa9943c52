use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    FormError {
        message: String,
        fields: Vec<String>,
    },

    #[error("Not signed in: {message}")]
    AuthenticationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authorization,
    Data,
    Configuration,
    Input,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl TrackerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn form(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self::FormError {
            message: message.into(),
            fields,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::HttpStatusError { status, .. } if matches!(status, 401 | 403) => {
                ErrorCategory::Authorization
            }
            Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::AuthenticationError { .. } => ErrorCategory::Authorization,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::FormError { .. } => ErrorCategory::Input,
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Authorization | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base_url and your network connection, then retry",
            ErrorCategory::Authorization => {
                "Sign in again and update the access token in the [session] section"
            }
            ErrorCategory::Data => "The server returned an unexpected payload; check the API version",
            ErrorCategory::Configuration => "Fix the configuration file or the command line flags",
            ErrorCategory::Input => "Correct the highlighted fields and submit again",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
        }
    }

    /// 提供給終端使用者的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "No Server Response".to_string(),
            Self::HttpStatusError { message, .. } => message.clone(),
            Self::FormError { message, .. } => message.clone(),
            Self::AuthenticationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
