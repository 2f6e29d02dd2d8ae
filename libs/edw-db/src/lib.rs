#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Warehouse connection crate.
//!
//! Turns an explicit [`DbConnConfig`] into a live `SeaORM` connection and runs
//! rendered statements against it. Credentials never come from ambient global
//! state: the caller builds (or loads) the configuration and hands it to
//! [`EdwConnector`].
//!
//! # Features
//! - `pg`, `mysql`, `sqlite`: enable the matching `SQLx` backend (`sqlite` is on
//!   by default for local development and tests)
//!
//! # Example
//! ```rust,no_run
//! use edw_db::{ConnectionProvider, DbConnConfig, EdwConnector};
//! use figment::{Figment, providers::Serialized};
//!
//! # async fn run() -> edw_db::Result<()> {
//! let figment = Figment::new().merge(Serialized::defaults(serde_json::json!({
//!     "connection": { "engine": "sqlite", "path": "/tmp/edw.sqlite" }
//! })));
//! let cfg: DbConnConfig = figment.extract_inner("connection")?;
//!
//! let connector = EdwConnector::new(cfg);
//! let conn = connector.connect(None).await?;
//! // ... run statements ...
//! conn.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod exec;
pub mod options;
pub mod provider;

pub use config::{DbConnConfig, DbEngineCfg, PoolCfg, config_figment};
pub use exec::{fetch_all, fetch_one, render};
pub use options::{DbConnectOptions, build_connect_options, redact_credentials_in_dsn};
pub use provider::{ConnectionProvider, EdwConnector, release};

pub use sea_orm::{DatabaseConnection, DbBackend};

use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for connection building and statement execution.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),

    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),

    #[error("Invalid connection parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Config(#[from] Box<figment::Error>),

    #[error(transparent)]
    Secret(#[from] edw_utils::SecretError),

    #[cfg(any(feature = "pg", feature = "mysql", feature = "sqlite"))]
    #[error(transparent)]
    Sqlx(#[from] sea_orm::sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),
}

impl From<figment::Error> for DbError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}
