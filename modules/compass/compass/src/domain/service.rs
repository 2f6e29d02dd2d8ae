use std::sync::Arc;

use compass_sdk::{EnrollmentRecord, SearchFilter, TermId, parse_term};
use edw_db::{ConnectionProvider, DatabaseConnection, EdwConnector, fetch_all, fetch_one, release, render};
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use crate::config::{ColumnSet, CompassConfig, ConfigError, EdwConfig, UnknownFilterPolicy};
use crate::infra::warehouse::rows::{CountRow, DetailRow, SummaryRow};
use crate::infra::warehouse::{EnrollmentQueryBuilder, SearchField, SearchPredicate};

/// Enrollment listing and counts for one warehouse.
///
/// Methods without a connection argument open a connection through the
/// provider, run a single statement and close it again. The `*_on` variants
/// run on a connection the caller owns and leave it open.
pub struct Service {
    provider: Arc<dyn ConnectionProvider>,
    config: CompassConfig,
    queries: EnrollmentQueryBuilder,
}

impl Service {
    /// # Errors
    /// Returns `ConfigError` when `config` fails [`CompassConfig::validate`].
    pub fn new(
        provider: Arc<dyn ConnectionProvider>,
        config: CompassConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let queries = EnrollmentQueryBuilder::new(&config);
        Ok(Self {
            provider,
            config,
            queries,
        })
    }

    /// Service backed by an [`EdwConnector`] for `cfg.connection`.
    ///
    /// # Errors
    /// Returns `ConfigError` when `cfg.compass` is invalid.
    pub fn from_config(cfg: EdwConfig) -> Result<Self, ConfigError> {
        Self::new(Arc::new(EdwConnector::new(cfg.connection)), cfg.compass)
    }

    #[must_use]
    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub async fn list_enrolled_students(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<EnrollmentRecord>, DomainError> {
        let (term, search) = self.prepare(term, filter)?;
        let conn = self.open().await?;
        let result = self.run_listing(&conn, &term, search.as_ref()).await;
        close(conn).await;
        result
    }

    /// Distinct students enrolled in `term`; search filters do not apply.
    pub async fn count_enrolled_students(&self, term: &str) -> Result<u64, DomainError> {
        self.count_students(term, None).await
    }

    /// Distinct students enrolled in `term` that match `filter`.
    pub async fn count_filtered_students(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<u64, DomainError> {
        self.count_students(term, filter).await
    }

    pub async fn list_enrolled_students_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<EnrollmentRecord>, DomainError> {
        let (term, search) = self.prepare(term, filter)?;
        self.run_listing(conn, &term, search.as_ref()).await
    }

    pub async fn count_enrolled_students_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<u64, DomainError> {
        let (term, search) = self.prepare(term, filter)?;
        self.run_count(conn, &term, search.as_ref()).await
    }

    async fn count_students(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<u64, DomainError> {
        let (term, search) = self.prepare(term, filter)?;
        let conn = self.open().await?;
        let result = self.run_count(&conn, &term, search.as_ref()).await;
        close(conn).await;
        result
    }

    fn prepare(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<(TermId, Option<SearchPredicate>), DomainError> {
        let term = parse_term(term)?;
        let search = match filter {
            Some(filter) => self.search_predicate(filter)?,
            None => None,
        };
        Ok((term, search))
    }

    fn search_predicate(
        &self,
        filter: &SearchFilter,
    ) -> Result<Option<SearchPredicate>, DomainError> {
        if let Some(field) = SearchField::from_filter_type(&filter.filter_type) {
            return Ok(SearchPredicate::contains(field, &filter.filter_text));
        }

        match self.config.unknown_filter {
            UnknownFilterPolicy::Ignore => {
                tracing::warn!(
                    filter_type = filter.filter_type.as_str(),
                    "Ignoring unrecognized search filter type"
                );
                Ok(None)
            }
            UnknownFilterPolicy::Reject => Err(DomainError::UnsupportedFilter {
                filter_type: filter.filter_type.as_str().to_owned(),
            }),
        }
    }

    async fn open(&self) -> Result<DatabaseConnection, DomainError> {
        self.provider
            .connect(Some(self.config.database.as_str()))
            .await
            .map_err(DomainError::Connection)
    }

    async fn run_listing<C: ConnectionTrait>(
        &self,
        conn: &C,
        term: &TermId,
        search: Option<&SearchPredicate>,
    ) -> Result<Vec<EnrollmentRecord>, DomainError> {
        let backend = conn.get_database_backend();
        let partition = term.partition_key();
        let stmt = render(backend, &self.queries.listing(backend, &partition, search));

        let records: Vec<EnrollmentRecord> = match self.queries.column_set() {
            ColumnSet::Minimal => fetch_all::<SummaryRow, _>(conn, stmt)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            ColumnSet::Extended => fetch_all::<DetailRow, _>(conn, stmt)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };

        tracing::debug!(%term, %partition, rows = records.len(), "Listed enrolled students");
        Ok(records)
    }

    async fn run_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        term: &TermId,
        search: Option<&SearchPredicate>,
    ) -> Result<u64, DomainError> {
        let backend = conn.get_database_backend();
        let partition = term.partition_key();
        let stmt = render(backend, &self.queries.count(backend, &partition, search));

        let total = fetch_one::<CountRow, _>(conn, stmt)
            .await?
            .map_or(0, u64::from);

        tracing::debug!(%term, %partition, total, "Counted enrolled students");
        Ok(total)
    }
}

async fn close(conn: DatabaseConnection) {
    // The statement already completed; a failed close does not change its result.
    if let Err(e) = release(conn).await {
        tracing::warn!(error = %e, "Failed to close warehouse connection");
    }
}
