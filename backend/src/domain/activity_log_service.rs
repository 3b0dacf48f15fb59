//! Activity log service.
//!
//! Implements the activity log driving port over an append-only repository.
//! Report views are deliberately unfiltered: each period returns the same
//! rows as `list_for_user`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::emissions::assess;
use crate::domain::ports::{ActivityLog, ActivityPersistenceError, ActivityRepository};
use crate::domain::{
    ActivityRecord, Assessment, DailyActivity, Error, NewActivityRecord, RecordId, Report,
    ReportPeriod, Session,
};

fn map_repository_error(error: ActivityPersistenceError) -> Error {
    match error {
        ActivityPersistenceError::Connection { message } => {
            Error::storage_unavailable(format!("activity log unavailable: {message}"))
        }
        ActivityPersistenceError::Query { message } => {
            Error::storage_failure(format!("activity log error: {message}"))
        }
    }
}

/// Activity log backed by an [`ActivityRepository`].
#[derive(Clone)]
pub struct ActivityLogService<R> {
    activity_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ActivityLogService<R> {
    /// Create a new service over the repository; `clock` dates submissions.
    pub fn new(activity_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_repo,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }
}

impl<R> ActivityLogService<R>
where
    R: ActivityRepository,
{
    async fn insert(&self, record: &NewActivityRecord) -> Result<RecordId, Error> {
        let record_id = self
            .activity_repo
            .append(record)
            .await
            .map_err(map_repository_error)?;

        info!(
            %record_id,
            user_id = %record.user_id,
            date = %record.date,
            total_emissions = record.total_emissions,
            "activity recorded"
        );
        Ok(record_id)
    }
}

#[async_trait]
impl<R> ActivityLog for ActivityLogService<R>
where
    R: ActivityRepository,
{
    async fn append(
        &self,
        session: &Session,
        date: NaiveDate,
        assessment: &Assessment,
    ) -> Result<RecordId, Error> {
        self.insert(&NewActivityRecord::new(session, date, assessment))
            .await
    }

    async fn submit(
        &self,
        session: &Session,
        region: &str,
        daily: &DailyActivity,
    ) -> Result<ActivityRecord, Error> {
        let assessment =
            assess(region, daily).map_err(|err| Error::unknown_region(err.to_string()))?;
        let record = NewActivityRecord::new(session, self.today(), &assessment);
        let record_id = self.insert(&record).await?;
        Ok(record.with_id(record_id))
    }

    async fn list_for_user(&self, session: &Session) -> Result<Vec<ActivityRecord>, Error> {
        let records = self
            .activity_repo
            .list_for_user(session.user_id(), session.username())
            .await
            .map_err(map_repository_error)?;

        debug!(user_id = %session.user_id(), count = records.len(), "activity listed");
        Ok(records)
    }

    async fn report(&self, session: &Session, period: ReportPeriod) -> Result<Report, Error> {
        let records = self.list_for_user(session).await?;
        Ok(Report { period, records })
    }
}

#[cfg(test)]
#[path = "activity_log_service_tests.rs"]
mod tests;
