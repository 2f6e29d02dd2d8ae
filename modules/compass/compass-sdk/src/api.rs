//! `CompassClient` trait definition.

use async_trait::async_trait;

use crate::errors::CompassError;
use crate::models::{EnrollmentRecord, SearchFilter};

/// Public API of the compass module.
///
/// Every call opens its own warehouse connection, runs one statement and
/// closes the connection again; implementations keep no state between calls.
#[async_trait]
pub trait CompassClient: Send + Sync {
    /// Students enrolled in `term` (e.g. `"2021-AUTUMN"`), sorted by name and
    /// optionally narrowed by `filter`.
    async fn get_enrolled_students(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<EnrollmentRecord>, CompassError>;

    /// Number of distinct students enrolled in `term`. Search filters do not
    /// apply here; see [`CompassClient::get_filtered_student_count`].
    async fn get_enrolled_student_count(&self, term: &str) -> Result<u64, CompassError>;

    /// Number of distinct students in `term` that match `filter`.
    async fn get_filtered_student_count(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<u64, CompassError>;
}
