use thiserror::Error;

/// 計算引擎的輸入錯誤。引擎的 `Option` 介面會把它吸收成「沒有結果」。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl EngineError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            EngineError::InvalidInput { field, .. } => field,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("External service '{service}' failed: {message}")]
    ExternalServiceError { service: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Feature '{feature}' is disabled in this deployment")]
    FeatureDisabledError { feature: String },

    #[error("Access denied: {reason}")]
    AccessDeniedError { reason: String },
}

impl AppError {
    pub fn external(service: &str, message: impl Into<String>) -> Self {
        AppError::ExternalServiceError {
            service: service.to_string(),
            message: message.into(),
        }
    }

    /// 身分或權限服務本身出錯（不是「沒有權限」）
    pub fn is_external_service_failure(&self) -> bool {
        matches!(
            self,
            AppError::ExternalServiceError { .. } | AppError::HttpError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::HttpError(_) | AppError::ExternalServiceError { .. } => {
                "Could not reach the Whop platform".to_string()
            }
            AppError::IoError(e) => format!("File access failed: {}", e),
            AppError::SerializationError(_) => "Received malformed data".to_string(),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            AppError::FeatureDisabledError { feature } => {
                format!("The {} is not enabled for this app", feature)
            }
            AppError::AccessDeniedError { .. } => {
                "You need access to this app through Whop to use the Affiliate Marketing Calculator"
                    .to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::HttpError(_) | AppError::ExternalServiceError { .. } => {
                "Check your network connection and WHOP_API_KEY, then try again"
            }
            AppError::IoError(_) => "Make sure the file exists and is readable",
            AppError::SerializationError(_) => "Check that whop.base_url points at the Whop API",
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            AppError::FeatureDisabledError { .. } => "Enable the feature under [features]",
            AppError::AccessDeniedError { .. } => {
                "Purchase the access pass on Whop or pass a valid --user-token"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
