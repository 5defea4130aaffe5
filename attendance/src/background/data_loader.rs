use crate::state::Dashboard;
use attendance_api::{
    endpoints::{attendance::MarkAttendanceResponse, students::Student},
    ApiError, Client, Endpoint, JsonReply, Request,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No usable data from {0}")]
    NoData(&'static str),

    #[error("Session expired, please log in again")]
    SessionExpired,
}

/// Fetches and assembles the data behind each view
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
}

impl DataLoader {
    pub fn new(api_client: Arc<Client>) -> Self {
        Self { api_client }
    }

    /// Load attendance and the student count concurrently.
    /// Either one failing fails the whole dashboard.
    pub async fn load_dashboard(&self, date: NaiveDate) -> Result<Dashboard, LoadError> {
        tracing::info!("Loading dashboard for {}", date);

        let (records, count) = tokio::try_join!(
            self.fetch(Request::attendance().list(), "attendance"),
            self.fetch(Request::students().count(), "students/count"),
        )?;

        tracing::debug!(
            "Loaded {} attendance records, {} students",
            records.len(),
            count.count
        );
        Ok(Dashboard::build(date, records, count.count))
    }

    pub async fn load_students(&self) -> Result<Vec<Student>, LoadError> {
        tracing::info!("Loading students");
        let students = self.fetch(Request::students().list(), "students").await?;
        tracing::debug!("Loaded {} students", students.len());
        Ok(students)
    }

    pub async fn mark_attendance(
        &self,
        student_id: &str,
    ) -> Result<MarkAttendanceResponse, LoadError> {
        tracing::info!("Marking attendance for {}", student_id);
        self.fetch(Request::attendance().mark(student_id), "mark_attendance")
            .await
    }

    async fn fetch<E>(&self, endpoint: E, source: &'static str) -> Result<E::Response, LoadError>
    where
        E: Endpoint,
    {
        match self.api_client.fetch(endpoint).await {
            Ok(JsonReply::Data(data)) => Ok(data),
            Ok(JsonReply::Empty) => {
                tracing::error!("No usable data from {}", source);
                Err(LoadError::NoData(source))
            }
            Ok(JsonReply::SessionExpired) => Err(LoadError::SessionExpired),
            Err(e) => {
                tracing::error!("Failed to load {}: {}", source, e);
                Err(LoadError::Api(e))
            }
        }
    }
}
