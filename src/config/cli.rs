use crate::config::toml_config::StorefrontConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tour-storefront")]
#[command(about = "Browse tours, fill a cart and place a booking from the terminal")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the backend endpoint from the config file
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the catalog request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<StorefrontConfig> {
        let mut config = match &self.config {
            Some(path) => StorefrontConfig::from_file(path)?,
            None => StorefrontConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
            config.api.endpoint = endpoint.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.api.catalog_timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }
}
