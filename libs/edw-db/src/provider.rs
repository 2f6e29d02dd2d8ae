use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::config::DbConnConfig;
use crate::options::build_connect_options;
use crate::{DbError, Result};

/// Capability to open a warehouse connection.
///
/// Implementations hand out a fresh connection per call; the caller owns it
/// and closes it when done. Nothing is cached between calls.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection, optionally to a specific database on the server.
    ///
    /// # Errors
    /// Returns `DbError` when options cannot be built or the server refuses
    /// the connection.
    async fn connect(&self, database: Option<&str>) -> Result<DatabaseConnection>;
}

/// Default provider backed by an explicit [`DbConnConfig`].
#[derive(Debug, Clone)]
pub struct EdwConnector {
    cfg: DbConnConfig,
}

impl EdwConnector {
    #[must_use]
    pub fn new(cfg: DbConnConfig) -> Self {
        Self { cfg }
    }

    /// Extract the connection config stored under `key` in `figment`.
    ///
    /// # Errors
    /// Returns `DbError::Config` when the section is missing or malformed.
    pub fn from_figment(figment: &figment::Figment, key: &str) -> Result<Self> {
        let cfg: DbConnConfig = figment.extract_inner(key)?;
        Ok(Self::new(cfg))
    }

    #[must_use]
    pub fn config(&self) -> &DbConnConfig {
        &self.cfg
    }
}

#[async_trait]
impl ConnectionProvider for EdwConnector {
    async fn connect(&self, database: Option<&str>) -> Result<DatabaseConnection> {
        let opts = build_connect_options(&self.cfg, database)?;
        let pool = self.cfg.pool.clone().unwrap_or_default();

        let conn = opts.connect(&pool).await.inspect_err(|e| {
            tracing::warn!(server = %opts, error = %e, "Warehouse connection failed");
        })?;

        tracing::debug!(server = %opts, user = self.cfg.user.as_deref(), "Connected to warehouse");
        Ok(conn)
    }
}

impl From<DbConnConfig> for EdwConnector {
    fn from(cfg: DbConnConfig) -> Self {
        Self::new(cfg)
    }
}

/// Close a connection obtained from a [`ConnectionProvider`].
///
/// # Errors
/// Returns `DbError::Sea` when the driver fails to shut the pool down.
pub async fn release(conn: DatabaseConnection) -> Result<()> {
    conn.close().await.map_err(DbError::from)
}
