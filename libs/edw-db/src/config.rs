//! Warehouse connection configuration.
//!
//! The configuration is an explicit value handed to the connector; nothing in
//! this crate reads process-wide settings on its own. [`config_figment`] is the
//! conventional way to assemble it from a YAML file plus `EDW_*` variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use edw_utils::Secret;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

/// Database engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbEngineCfg {
    Postgres,
    Mysql,
    Sqlite,
}

/// Connection settings for one warehouse server.
///
/// Either `dsn` or the individual fields may be used; individual fields
/// override the matching DSN parts. `password` may contain `${VAR}`
/// placeholders, resolved when the connection is opened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConnConfig {
    /// Explicit engine; required when `dsn` is absent.
    #[serde(default)]
    pub engine: Option<DbEngineCfg>,
    #[serde(default)]
    pub dsn: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<Secret>,
    /// Default database; callers may override it per connection.
    #[serde(default)]
    pub dbname: Option<String>,
    /// `SQLite` database file.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Engine-specific settings: server options on `PostgreSQL`, `charset`,
    /// `collation` and `time_zone` on `MySQL`, `busy_timeout`, `cache_size`
    /// and `query_only` on `SQLite`.
    #[serde(default)]
    pub params: Option<HashMap<String, String>>,
    #[serde(default)]
    pub pool: Option<PoolCfg>,
}

/// Knobs for the single-connection pool opened per call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolCfg {
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Option<Duration>,
    pub test_before_acquire: bool,
}

impl Default for PoolCfg {
    fn default() -> Self {
        Self {
            acquire_timeout: Some(Duration::from_secs(30)),
            test_before_acquire: false,
        }
    }
}

/// Legacy flat variables and the config paths they populate.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("EDW_SERVER", "connection.host"),
    ("EDW_USER", "connection.user"),
    ("EDW_PASSWORD", "connection.password"),
];

/// Build the layered configuration source.
///
/// Layers, lowest precedence first:
/// 1. the YAML file at `path`, when given
/// 2. the legacy flat variables `EDW_SERVER`, `EDW_USER`, `EDW_PASSWORD`
/// 3. nested `EDW_` variables using `__` as separator,
///    e.g. `EDW_CONNECTION__DBNAME`, `EDW_COMPASS__MAX_ROWS`
#[must_use]
pub fn config_figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }

    let legacy_keys: Vec<&str> = LEGACY_ENV.iter().map(|(var, _)| *var).collect();
    figment
        .merge(Env::raw().only(&legacy_keys).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(var, _)| key == *var)
                .map_or_else(|| key.into(), |(_, target)| (*target).into())
        }))
        .merge(
            Env::prefixed("EDW_")
                .ignore(&["SERVER", "USER", "PASSWORD"])
                .split("__"),
        )
}
