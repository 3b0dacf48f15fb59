//! Port abstraction for activity log persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ActivityRecord, NewActivityRecord, RecordId, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by activity repository adapters.
    pub enum ActivityPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "activity repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => "activity repository query failed: {message}",
    }
}

/// Append-only storage of activity records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Insert one immutable row and return its identifier.
    ///
    /// No deduplication is performed; repeated submissions for the same user
    /// and date accumulate.
    async fn append(&self, record: &NewActivityRecord)
    -> Result<RecordId, ActivityPersistenceError>;

    /// Return every row matching both `user_id` and `username`, in insertion
    /// order.
    async fn list_for_user(
        &self,
        user_id: UserId,
        username: &Username,
    ) -> Result<Vec<ActivityRecord>, ActivityPersistenceError>;
}

/// In-memory activity repository for tests.
#[derive(Debug, Default)]
pub struct FixtureActivityRepository {
    records: Mutex<Vec<ActivityRecord>>,
}

#[async_trait]
impl ActivityRepository for FixtureActivityRepository {
    async fn append(
        &self,
        record: &NewActivityRecord,
    ) -> Result<RecordId, ActivityPersistenceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ActivityPersistenceError::connection("fixture store poisoned"))?;
        let next = i64::try_from(records.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or_else(|| ActivityPersistenceError::query("fixture id space exhausted"))?;
        let id = RecordId::new(next);
        records.push(record.clone().with_id(id));
        Ok(id)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        username: &Username,
    ) -> Result<Vec<ActivityRecord>, ActivityPersistenceError> {
        let records = self
            .records
            .lock()
            .map_err(|_| ActivityPersistenceError::connection("fixture store poisoned"))?;
        Ok(records
            .iter()
            .filter(|record| record.user_id == user_id && &record.username == username)
            .cloned()
            .collect())
    }
}
