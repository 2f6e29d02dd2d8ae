use std::sync::Arc;

use async_trait::async_trait;
use compass_sdk::{CompassClient, CompassError, EnrollmentRecord, SearchFilter};

use crate::domain::service::Service;

/// In-process [`CompassClient`] backed by a [`Service`].
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CompassClient for LocalClient {
    async fn get_enrolled_students(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<EnrollmentRecord>, CompassError> {
        self.service
            .list_enrolled_students(term, filter)
            .await
            .map_err(Into::into)
    }

    async fn get_enrolled_student_count(&self, term: &str) -> Result<u64, CompassError> {
        self.service
            .count_enrolled_students(term)
            .await
            .map_err(Into::into)
    }

    async fn get_filtered_student_count(
        &self,
        term: &str,
        filter: Option<&SearchFilter>,
    ) -> Result<u64, CompassError> {
        self.service
            .count_filtered_students(term, filter)
            .await
            .map_err(Into::into)
    }
}
