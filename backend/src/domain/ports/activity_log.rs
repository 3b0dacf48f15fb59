//! Driving port for recording and browsing activity.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    ActivityRecord, Assessment, DailyActivity, Error, RecordId, Report, ReportPeriod, Session,
};

/// Domain use-case port for the activity log.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Append an assessed submission for `session` on `date`.
    async fn append(
        &self,
        session: &Session,
        date: NaiveDate,
        assessment: &Assessment,
    ) -> Result<RecordId, Error>;

    /// Assess `daily` for `region`, stamp it with today's date and append it.
    async fn submit(
        &self,
        session: &Session,
        region: &str,
        daily: &DailyActivity,
    ) -> Result<ActivityRecord, Error>;

    /// Every record owned by `session`, in insertion order.
    async fn list_for_user(&self, session: &Session) -> Result<Vec<ActivityRecord>, Error>;

    /// Rows for one report view; every period lists the same rows.
    async fn report(&self, session: &Session, period: ReportPeriod) -> Result<Report, Error>;
}
