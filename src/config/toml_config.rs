use crate::core::submitter::SubmitterSettings;
use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/REPLACE_WITH_DEPLOYMENT_ID/exec";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_catalog_timeout_ms")]
    pub catalog_timeout_ms: u64,
    /// 0 或未設定時使用傳輸層預設值
    pub submit_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_required_path_marker")]
    pub required_path_marker: String,
    #[serde(default = "default_placeholder_marker")]
    pub placeholder_marker: String,
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_catalog_timeout_ms() -> u64 {
    10_000
}

fn default_required_path_marker() -> String {
    "/exec".to_string()
}

fn default_placeholder_marker() -> String {
    "REPLACE".to_string()
}

fn default_simulated_delay_ms() -> u64 {
    1500
}

fn default_currency_symbol() -> String {
    "S/".to_string()
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/400x300?text=Paracas+Tour".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            catalog_timeout_ms: default_catalog_timeout_ms(),
            submit_timeout_ms: None,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            required_path_marker: default_required_path_marker(),
            placeholder_marker: default_placeholder_marker(),
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl StorefrontConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StorefrontError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StorefrontError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STOREFRONT_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StorefrontError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.api.endpoint
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.api.catalog_timeout_ms)
    }

    pub fn submit_timeout(&self) -> Option<Duration> {
        self.api
            .submit_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Whether the endpoint still carries the placeholder marker.
    pub fn is_placeholder_endpoint(&self) -> bool {
        self.api.endpoint.contains(&self.checkout.placeholder_marker)
    }

    pub fn submitter_settings(&self) -> SubmitterSettings {
        SubmitterSettings {
            required_path_marker: self.checkout.required_path_marker.clone(),
            placeholder_marker: self.checkout.placeholder_marker.clone(),
            simulated_delay: Duration::from_millis(self.checkout.simulated_delay_ms),
            timeout: self.submit_timeout(),
        }
    }
}

impl Validate for StorefrontConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        validation::validate_positive_number("api.catalog_timeout_ms", self.api.catalog_timeout_ms, 1)?;
        validation::validate_non_empty_string(
            "checkout.required_path_marker",
            &self.checkout.required_path_marker,
        )?;
        validation::validate_non_empty_string(
            "checkout.placeholder_marker",
            &self.checkout.placeholder_marker,
        )?;
        validation::validate_non_empty_string(
            "display.placeholder_image",
            &self.display.placeholder_image,
        )?;
        Ok(())
    }
}
