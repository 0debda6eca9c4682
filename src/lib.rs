pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpOrderTransport, terminal::TerminalView};
pub use app::storefront::{Intent, Outcome, Storefront, SubmitLock};
pub use config::StorefrontConfig;
pub use crate::core::{catalog::CatalogLoader, ledger::CartLedger, submitter::OrderSubmitter};
pub use utils::error::{Result, StorefrontError};
