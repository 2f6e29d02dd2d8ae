//! Compass SDK
//!
//! Public surface of the compass enrollment module:
//! - `CompassClient` trait for callers that list or count enrolled students
//! - Term identifiers (`TermId`, `Quarter`, `PartitionKey`)
//! - Model types (`SearchFilter`, `EnrollmentRecord` and its two shapes)
//! - Error type (`CompassError`)
//!
//! ```ignore
//! let students = client.get_enrolled_students("2021-AUTUMN", None).await?;
//! let total = client.get_enrolled_student_count("2021-AUTUMN").await?;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;
pub mod term;

pub use api::CompassClient;
pub use errors::CompassError;
pub use models::{EnrollmentRecord, SearchFilter, SearchFilterType, StudentDetail, StudentSummary};
pub use term::{PartitionKey, Quarter, TermId, TermParseError, parse_term};
