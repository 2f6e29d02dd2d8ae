//! Typed connection options built from [`DbConnConfig`].

use sea_orm::DatabaseConnection;

use crate::config::{DbConnConfig, DbEngineCfg, PoolCfg};
use crate::{DbError, Result};

/// Database connection options using typed sqlx `ConnectOptions`.
#[derive(Debug, Clone)]
pub enum DbConnectOptions {
    #[cfg(feature = "sqlite")]
    Sqlite(sea_orm::sqlx::sqlite::SqliteConnectOptions),
    #[cfg(feature = "pg")]
    Postgres(sea_orm::sqlx::postgres::PgConnectOptions),
    #[cfg(feature = "mysql")]
    MySql(sea_orm::sqlx::mysql::MySqlConnectOptions),
}

impl std::fmt::Display for DbConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(opts) => write!(f, "sqlite://{}", opts.get_filename().display()),
            #[cfg(feature = "pg")]
            Self::Postgres(opts) => write!(
                f,
                "postgresql://<redacted>@{}:{}/{}",
                opts.get_host(),
                opts.get_port(),
                opts.get_database().unwrap_or("")
            ),
            #[cfg(feature = "mysql")]
            Self::MySql(_) => f.write_str("mysql://<redacted>@..."),
            #[cfg(not(any(feature = "sqlite", feature = "pg", feature = "mysql")))]
            _ => unreachable!("no database features enabled"),
        }
    }
}

impl DbConnectOptions {
    /// Open a single-connection pool and wrap it as a `SeaORM` connection.
    ///
    /// The caller owns the returned connection and should `close()` it once
    /// its statement has completed.
    ///
    /// # Errors
    /// Returns the driver error when the connection cannot be established.
    pub async fn connect(&self, pool: &PoolCfg) -> Result<DatabaseConnection> {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(opts) => {
                let sqlx_pool = single_connection(sea_orm::sqlx::sqlite::SqlitePoolOptions::new(), pool)
                    .connect_with(opts.clone())
                    .await?;
                Ok(sea_orm::SqlxSqliteConnector::from_sqlx_sqlite_pool(sqlx_pool))
            }
            #[cfg(feature = "pg")]
            Self::Postgres(opts) => {
                let sqlx_pool = single_connection(sea_orm::sqlx::postgres::PgPoolOptions::new(), pool)
                    .connect_with(opts.clone())
                    .await?;
                Ok(sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
            }
            #[cfg(feature = "mysql")]
            Self::MySql(opts) => {
                let sqlx_pool = single_connection(sea_orm::sqlx::mysql::MySqlPoolOptions::new(), pool)
                    .connect_with(opts.clone())
                    .await?;
                Ok(sea_orm::SqlxMySqlConnector::from_sqlx_mysql_pool(sqlx_pool))
            }
            #[cfg(not(any(feature = "sqlite", feature = "pg", feature = "mysql")))]
            _ => {
                let _ = pool;
                unreachable!("no database features enabled")
            }
        }
    }
}

#[cfg(any(feature = "sqlite", feature = "pg", feature = "mysql"))]
fn single_connection<DB: sea_orm::sqlx::Database>(
    opts: sea_orm::sqlx::pool::PoolOptions<DB>,
    cfg: &PoolCfg,
) -> sea_orm::sqlx::pool::PoolOptions<DB> {
    let opts = opts
        .max_connections(1)
        .min_connections(0)
        .test_before_acquire(cfg.test_before_acquire);
    match cfg.acquire_timeout {
        Some(t) => opts.acquire_timeout(t),
        None => opts,
    }
}

/// Build typed connection options from configuration.
///
/// `database` overrides `cfg.dbname` for server engines; it is ignored for
/// `SQLite`, where the file is the database. `cfg.params` are applied per
/// engine: server options on `PostgreSQL`, a fixed set of session settings
/// on `MySQL` and pragmas on `SQLite`. Keys an engine does not understand are
/// rejected rather than dropped.
///
/// # Errors
/// Returns an error when the configuration is inconsistent, incomplete,
/// carries unsupported params, or names an engine whose feature is disabled.
pub fn build_connect_options(
    cfg: &DbConnConfig,
    database: Option<&str>,
) -> Result<DbConnectOptions> {
    check_conflicts(cfg)?;
    let engine = resolve_engine(cfg)?;

    tracing::debug!(
        dsn = redact_credentials_in_dsn(cfg.dsn.as_deref()),
        ?engine,
        database,
        "Building connection options"
    );

    match engine {
        DbEngineCfg::Sqlite => sqlite_options(cfg),
        DbEngineCfg::Postgres => pg_options(cfg, database),
        DbEngineCfg::Mysql => mysql_options(cfg, database),
    }
}

fn resolve_engine(cfg: &DbConnConfig) -> Result<DbEngineCfg> {
    match (cfg.engine, cfg.dsn.as_deref()) {
        (Some(engine), _) => Ok(engine),
        (None, Some(dsn)) => engine_from_dsn(dsn),
        // Without a DSN, Postgres and MySQL look the same.
        (None, None) => Err(DbError::InvalidParameter(
            "Missing 'engine': required when 'dsn' is not provided".to_owned(),
        )),
    }
}

fn engine_from_dsn(dsn: &str) -> Result<DbEngineCfg> {
    let s = dsn.trim_start();
    if s.starts_with("postgres://") || s.starts_with("postgresql://") {
        Ok(DbEngineCfg::Postgres)
    } else if s.starts_with("mysql://") {
        Ok(DbEngineCfg::Mysql)
    } else if s.starts_with("sqlite:") {
        Ok(DbEngineCfg::Sqlite)
    } else {
        Err(DbError::UnknownDsn(redact_credentials_in_dsn(Some(dsn))))
    }
}

fn check_conflicts(cfg: &DbConnConfig) -> Result<()> {
    if let (Some(engine), Some(dsn)) = (cfg.engine, cfg.dsn.as_deref()) {
        let inferred = engine_from_dsn(dsn)?;
        if inferred != engine {
            return Err(DbError::ConfigConflict(format!(
                "engine='{engine:?}' conflicts with DSN scheme inferred as '{inferred:?}'"
            )));
        }
    }

    let server_fields = cfg.host.is_some()
        || cfg.port.is_some()
        || cfg.user.is_some()
        || cfg.password.is_some()
        || cfg.dbname.is_some();
    let sqlite = cfg.engine == Some(DbEngineCfg::Sqlite) || cfg.path.is_some();

    if sqlite && server_fields {
        return Err(DbError::ConfigConflict(
            "SQLite settings cannot be combined with host/port/user/password/dbname".to_owned(),
        ));
    }
    if cfg.path.is_some() && matches!(cfg.engine, Some(DbEngineCfg::Postgres | DbEngineCfg::Mysql)) {
        return Err(DbError::ConfigConflict(
            "'path' is only valid for engine=sqlite".to_owned(),
        ));
    }
    Ok(())
}

fn dsn_options<T>(dsn: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    dsn.parse::<T>()
        .map_err(|e| DbError::InvalidParameter(e.to_string()))
}

#[cfg(feature = "sqlite")]
fn sqlite_options(cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::sqlite::SqliteConnectOptions;

    let mut opts = match (&cfg.path, cfg.dsn.as_deref()) {
        (Some(path), _) => SqliteConnectOptions::new().filename(path),
        (None, Some(dsn)) => dsn_options::<SqliteConnectOptions>(dsn)?,
        (None, None) => {
            return Err(DbError::InvalidParameter(
                "SQLite connection requires either 'dsn' or 'path'".to_owned(),
            ));
        }
    };

    for (key, value) in cfg.params.iter().flatten() {
        opts = apply_sqlite_param(opts, key, value)?;
    }

    // Never create a missing warehouse file.
    Ok(DbConnectOptions::Sqlite(opts.create_if_missing(false)))
}

#[cfg(feature = "sqlite")]
fn apply_sqlite_param(
    opts: sea_orm::sqlx::sqlite::SqliteConnectOptions,
    key: &str,
    value: &str,
) -> Result<sea_orm::sqlx::sqlite::SqliteConnectOptions> {
    let invalid = |expected: &str| {
        DbError::InvalidParameter(format!("SQLite param '{key}' must be {expected}, got '{value}'"))
    };

    match key.to_ascii_lowercase().as_str() {
        "busy_timeout" => {
            let ms: u64 = value
                .parse()
                .map_err(|_| invalid("a number of milliseconds"))?;
            Ok(opts.busy_timeout(std::time::Duration::from_millis(ms)))
        }
        "query_only" => {
            let on = match value.to_ascii_lowercase().as_str() {
                "true" | "on" | "1" => "ON",
                "false" | "off" | "0" => "OFF",
                _ => return Err(invalid("true/false")),
            };
            Ok(opts.pragma("query_only", on))
        }
        "cache_size" => {
            let pages: i64 = value.parse().map_err(|_| invalid("an integer"))?;
            Ok(opts.pragma("cache_size", pages.to_string()))
        }
        _ => Err(DbError::InvalidParameter(format!(
            "unsupported SQLite param '{key}'; expected one of busy_timeout, cache_size, query_only"
        ))),
    }
}

#[cfg(not(feature = "sqlite"))]
fn sqlite_options(_: &DbConnConfig) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("SQLite feature not enabled"))
}

/// Server fields layered over the DSN, with the per-call database applied.
#[cfg(any(feature = "pg", feature = "mysql"))]
struct ServerTarget<'a> {
    host: Option<&'a str>,
    port: Option<u16>,
    user: Option<&'a str>,
    password: Option<edw_utils::Secret>,
    database: Option<&'a str>,
}

#[cfg(any(feature = "pg", feature = "mysql"))]
impl<'a> ServerTarget<'a> {
    fn resolve(cfg: &'a DbConnConfig, database: Option<&'a str>) -> Result<Self> {
        let database = database.or(cfg.dbname.as_deref());
        if database.is_none() && cfg.dsn.is_none() {
            return Err(DbError::InvalidParameter(
                "'dbname' is required when no 'dsn' is given".to_owned(),
            ));
        }

        Ok(Self {
            host: cfg.host.as_deref(),
            port: cfg.port,
            user: cfg.user.as_deref(),
            password: cfg.password.as_ref().map(edw_utils::Secret::resolve).transpose()?,
            database,
        })
    }
}

#[cfg(feature = "pg")]
fn pg_options(cfg: &DbConnConfig, database: Option<&str>) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::postgres::PgConnectOptions;

    let target = ServerTarget::resolve(cfg, database)?;
    let mut opts = match cfg.dsn.as_deref() {
        Some(dsn) => dsn_options::<PgConnectOptions>(dsn)?,
        None => PgConnectOptions::new(),
    };

    if let Some(host) = target.host {
        opts = opts.host(host);
    }
    if let Some(port) = target.port {
        opts = opts.port(port);
    }
    if let Some(user) = target.user {
        opts = opts.username(user);
    }
    if let Some(password) = &target.password {
        opts = opts.password(password.expose());
    }
    if let Some(database) = target.database {
        opts = opts.database(database);
    }
    if let Some(params) = &cfg.params {
        opts = opts.options(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(DbConnectOptions::Postgres(opts))
}

#[cfg(not(feature = "pg"))]
fn pg_options(_: &DbConnConfig, _: Option<&str>) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("PostgreSQL feature not enabled"))
}

#[cfg(feature = "mysql")]
fn mysql_options(cfg: &DbConnConfig, database: Option<&str>) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::mysql::MySqlConnectOptions;

    let target = ServerTarget::resolve(cfg, database)?;
    let mut opts = match cfg.dsn.as_deref() {
        Some(dsn) => dsn_options::<MySqlConnectOptions>(dsn)?,
        None => MySqlConnectOptions::new(),
    };

    if let Some(host) = target.host {
        opts = opts.host(host);
    }
    if let Some(port) = target.port {
        opts = opts.port(port);
    }
    if let Some(user) = target.user {
        opts = opts.username(user);
    }
    if let Some(password) = &target.password {
        opts = opts.password(password.expose());
    }
    if let Some(database) = target.database {
        opts = opts.database(database);
    }
    for (key, value) in cfg.params.iter().flatten() {
        opts = match key.to_ascii_lowercase().as_str() {
            "charset" => opts.charset(value),
            "collation" => opts.collation(value),
            "time_zone" => opts.timezone(Some(value.clone())),
            _ => {
                return Err(DbError::InvalidParameter(format!(
                    "unsupported MySQL param '{key}'; expected one of charset, collation, time_zone"
                )));
            }
        };
    }

    Ok(DbConnectOptions::MySql(opts))
}

#[cfg(not(feature = "mysql"))]
fn mysql_options(_: &DbConnConfig, _: Option<&str>) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("MySQL feature not enabled"))
}

/// Redact credentials from DSN for logging.
#[must_use]
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => match url::Url::parse(dsn) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "***".to_owned(),
        },
        Some(dsn) => dsn.to_owned(),
        None => "none".to_owned(),
    }
}
