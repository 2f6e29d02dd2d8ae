//! Statement rendering and execution with bound parameters.
//!
//! Values always travel separately from the SQL text; nothing here
//! interpolates caller input into a statement.

use sea_orm::sea_query::QueryStatementWriter;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

/// Render a `sea-query` statement for `backend`, keeping its values bound.
#[must_use]
pub fn render<S: QueryStatementWriter>(backend: DbBackend, stmt: &S) -> Statement {
    let (sql, values) = stmt.build_any(&*backend.get_query_builder());
    Statement::from_sql_and_values(backend, sql, values)
}

/// Run `stmt` and decode every row into `T`.
///
/// # Errors
/// Returns the driver error unchanged when the statement fails or a row does
/// not decode into `T`.
pub async fn fetch_all<T, C>(conn: &C, stmt: Statement) -> Result<Vec<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    log_statement(&stmt);
    let rows = T::find_by_statement(stmt).all(conn).await?;
    tracing::debug!(rows = rows.len(), "Statement returned");
    Ok(rows)
}

/// Run `stmt` and decode the first row into `T`, if any.
///
/// # Errors
/// Returns the driver error unchanged when the statement fails or the row
/// does not decode into `T`.
pub async fn fetch_one<T, C>(conn: &C, stmt: Statement) -> Result<Option<T>, DbErr>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    log_statement(&stmt);
    T::find_by_statement(stmt).one(conn).await
}

fn log_statement(stmt: &Statement) {
    // Bound values may carry caller input; only their count is logged.
    let params = stmt.values.as_ref().map_or(0, |v| v.0.len());
    tracing::debug!(backend = ?stmt.db_backend, sql = %stmt.sql, params, "Executing statement");
}
