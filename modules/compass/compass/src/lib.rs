//! Compass module implementation
//!
//! Lists and counts the students enrolled in an academic term, reading the
//! enterprise data warehouse through `edw-db`. The public API is defined in
//! `compass-sdk` and re-exported here.
//!
//! ```ignore
//! let cfg = compass::EdwConfig::load(Some(Path::new("edw.yaml")))?;
//! let client = compass::LocalClient::new(Arc::new(compass::Service::from_config(cfg)?));
//! let rows = client.get_enrolled_students("2021-AUTUMN", None).await?;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use compass_sdk::{
    CompassClient, CompassError, EnrollmentRecord, PartitionKey, Quarter, SearchFilter,
    SearchFilterType, StudentDetail, StudentSummary, TermId, TermParseError, parse_term,
};

pub mod config;
pub mod local_client;

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::{
    ColumnSet, CompassConfig, ConfigError, EdwConfig, MajorJoin, TableLocation,
    UnknownFilterPolicy, WarehouseTables,
};
pub use domain::error::DomainError;
pub use domain::service::Service;
pub use local_client::LocalClient;
