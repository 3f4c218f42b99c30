//! Shared domain records and configuration for tagscout.
//!
//! The discovery pipeline produces [`PostRecord`]s and [`CreatorRecord`]s and
//! reports them through a [`CrawlResult`]; everything that crosses a crate
//! boundary lives here.

pub mod app_config;
pub mod config;
pub mod creators;
pub mod posts;
pub mod results;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use creators::{CreatorRecord, CreatorStatus, Platform};
pub use posts::{EngagementCounts, PostRecord};
pub use results::{CrawlResult, CrawlStats};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("post record requires a non-empty creator handle")]
    EmptyHandle,
}
