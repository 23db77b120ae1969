pub mod app_config;
mod config;
pub mod listing;
pub mod request;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{derive_discounted_price, ListingRecord, PLATFORM};
pub use request::{RequestError, ScrapeMeta, ScrapeRequest, ScrapeResponse};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
