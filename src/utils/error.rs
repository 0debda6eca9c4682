use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Misconfigured endpoint '{endpoint}': {reason}")]
    MisconfiguredEndpoint { endpoint: String, reason: String },

    #[error("Order dispatch failed: {reason}")]
    SubmitTransport { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Checkout,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 已在本地復原，不需要使用者處理
    Low,
    /// 使用者可以重試
    Medium,
    /// 需要修正輸入或設定
    High,
    /// 系統層級錯誤
    Critical,
}

impl StorefrontError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StorefrontError::CatalogUnavailable { .. } => ErrorCategory::Catalog,
            StorefrontError::EmptyCart => ErrorCategory::Checkout,
            StorefrontError::SubmitTransport { .. } => ErrorCategory::Network,
            StorefrontError::MisconfiguredEndpoint { .. }
            | StorefrontError::ConfigValidationError { .. }
            | StorefrontError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StorefrontError::IoError(_) | StorefrontError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StorefrontError::CatalogUnavailable { .. } => ErrorSeverity::Low,
            StorefrontError::EmptyCart | StorefrontError::SubmitTransport { .. } => {
                ErrorSeverity::Medium
            }
            StorefrontError::MisconfiguredEndpoint { .. }
            | StorefrontError::ConfigValidationError { .. }
            | StorefrontError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            StorefrontError::IoError(_) | StorefrontError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StorefrontError::CatalogUnavailable { .. } => {
                "The bundled catalog is shown instead; check the endpoint if this persists"
                    .to_string()
            }
            StorefrontError::EmptyCart => "Add at least one tour before checking out".to_string(),
            StorefrontError::MisconfiguredEndpoint { .. } => {
                "The backend URL looks wrong; it should end in /exec".to_string()
            }
            StorefrontError::SubmitTransport { .. } => {
                "Check your connection and submit the order again".to_string()
            }
            StorefrontError::ConfigValidationError { field, .. }
            | StorefrontError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the configuration file", field)
            }
            StorefrontError::IoError(_) => "Check file paths and permissions".to_string(),
            StorefrontError::SerializationError(_) => {
                "The data could not be encoded; report this as a bug".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StorefrontError::EmptyCart => "Your cart is empty".to_string(),
            StorefrontError::MisconfiguredEndpoint { reason, .. } => {
                format!("Error: {}", reason)
            }
            StorefrontError::SubmitTransport { reason } => format!("Error: {}", reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
