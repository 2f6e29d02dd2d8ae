use compass_sdk::{CompassError, TermParseError};
use edw_db::DbError;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidTerm(#[from] TermParseError),

    #[error("Unsupported search filter type '{filter_type}'")]
    UnsupportedFilter { filter_type: String },

    #[error("Warehouse connection failed: {0}")]
    Connection(#[source] DbError),

    #[error("Warehouse query failed: {0}")]
    Query(#[from] DbErr),
}

impl From<DomainError> for CompassError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidTerm(e) => Self::InvalidTerm(e),
            DomainError::UnsupportedFilter { filter_type } => {
                Self::invalid_filter(format!("unsupported filter type '{filter_type}'"))
            }
            DomainError::Connection(e) => Self::connection(e.to_string()),
            DomainError::Query(e) => Self::query_execution(e.to_string()),
        }
    }
}
