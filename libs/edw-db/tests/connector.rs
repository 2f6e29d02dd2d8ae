#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for `EdwConnector` against file-backed `SQLite`.

use std::collections::HashMap;

use edw_db::{
    ConnectionProvider, DbBackend, DbConnConfig, DbEngineCfg, DbError, EdwConnector, fetch_all,
    release,
};
use figment::{Figment, providers::Serialized};
use sea_orm::{ConnectionTrait, Database, FromQueryResult, Statement};
use tempfile::TempDir;

#[derive(Debug, FromQueryResult)]
struct Term {
    yrq: String,
}

async fn seed_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("edw.sqlite");
    let conn = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .unwrap();
    conn.execute_unprepared("CREATE TABLE terms (yrq TEXT NOT NULL)")
        .await
        .unwrap();
    conn.execute_unprepared("INSERT INTO terms (yrq) VALUES ('20214'), ('20221')")
        .await
        .unwrap();
    conn.close().await.unwrap();
    path
}

#[tokio::test]
async fn connects_and_runs_bound_statement() {
    let dir = TempDir::new().unwrap();
    let path = seed_file(&dir).await;

    let connector = EdwConnector::new(DbConnConfig {
        engine: Some(DbEngineCfg::Sqlite),
        path: Some(path),
        ..Default::default()
    });

    let conn = connector.connect(Some("EDWPresentation")).await.unwrap();
    assert_eq!(conn.get_database_backend(), DbBackend::Sqlite);

    let stmt = Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "SELECT yrq FROM terms WHERE yrq = ?",
        ["20221".into()],
    );
    let rows: Vec<Term> = fetch_all(&conn, stmt).await.unwrap();
    release(conn).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].yrq, "20221");
}

#[tokio::test]
async fn each_call_opens_a_fresh_connection() {
    let dir = TempDir::new().unwrap();
    let path = seed_file(&dir).await;
    let connector = EdwConnector::new(DbConnConfig {
        engine: Some(DbEngineCfg::Sqlite),
        path: Some(path),
        ..Default::default()
    });

    let first = connector.connect(None).await.unwrap();
    release(first).await.unwrap();

    // A closed connection must not poison later calls.
    let second = connector.connect(None).await.unwrap();
    let rows: Vec<Term> = fetch_all(
        &second,
        Statement::from_string(DbBackend::Sqlite, "SELECT yrq FROM terms ORDER BY yrq"),
    )
    .await
    .unwrap();
    release(second).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn sqlite_params_become_pragmas() {
    let dir = TempDir::new().unwrap();
    let path = seed_file(&dir).await;
    let connector = EdwConnector::new(DbConnConfig {
        engine: Some(DbEngineCfg::Sqlite),
        path: Some(path),
        params: Some(HashMap::from([
            ("query_only".to_owned(), "true".to_owned()),
            ("busy_timeout".to_owned(), "1000".to_owned()),
        ])),
        ..Default::default()
    });

    let conn = connector.connect(None).await.unwrap();
    let read: Vec<Term> = fetch_all(
        &conn,
        Statement::from_string(DbBackend::Sqlite, "SELECT yrq FROM terms"),
    )
    .await
    .unwrap();
    assert_eq!(read.len(), 2);

    let write = conn
        .execute_unprepared("INSERT INTO terms (yrq) VALUES ('20222')")
        .await;
    assert!(write.is_err(), "query_only connection accepted a write");
    release(conn).await.unwrap();
}

#[tokio::test]
async fn unsupported_sqlite_param_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    let path = seed_file(&dir).await;
    let connector = EdwConnector::new(DbConnConfig {
        engine: Some(DbEngineCfg::Sqlite),
        path: Some(path),
        params: Some(HashMap::from([("journal_mode".to_owned(), "WAL".to_owned())])),
        ..Default::default()
    });

    let err = connector.connect(None).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidParameter(_)));
    assert!(err.to_string().contains("journal_mode"));
}

#[tokio::test]
async fn missing_database_file_is_a_connection_error() {
    let dir = TempDir::new().unwrap();
    let connector = EdwConnector::new(DbConnConfig {
        engine: Some(DbEngineCfg::Sqlite),
        path: Some(dir.path().join("absent.sqlite")),
        ..Default::default()
    });

    let err = connector.connect(None).await.unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)), "unexpected error: {err}");
    assert!(!dir.path().join("absent.sqlite").exists());
}

#[tokio::test]
async fn invalid_configuration_fails_before_connecting() {
    let connector = EdwConnector::new(DbConnConfig::default());

    let err = connector.connect(None).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidParameter(_)));
}

#[test]
fn connector_from_figment_section() {
    let figment = Figment::new().merge(Serialized::defaults(serde_json::json!({
        "connection": {
            "engine": "sqlite",
            "path": "/tmp/edw.sqlite"
        }
    })));

    let connector = EdwConnector::from_figment(&figment, "connection").unwrap();
    assert_eq!(connector.config().engine, Some(DbEngineCfg::Sqlite));

    let missing = EdwConnector::from_figment(&figment, "nope").unwrap_err();
    assert!(matches!(missing, DbError::Config(_)));
}
