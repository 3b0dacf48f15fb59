//! SQLite-backed `ActivityRepository` implementation using Diesel ORM.
//!
//! Records are appended to the `data` table and listed back in insertion
//! order. Rows are converted through validated domain constructors.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActivityPersistenceError, ActivityRepository};
use crate::domain::{ActivityRecord, AnnualActivity, NewActivityRecord, RecordId, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_storage_error};
use super::models::{ActivityRow, NewActivityRow};
use super::schema::data;
use super::storage::{StorageError, StorageHandle};

/// Storage format of the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Diesel-backed implementation of the activity repository port.
#[derive(Clone)]
pub struct DieselActivityRepository {
    storage: StorageHandle,
}

impl DieselActivityRepository {
    /// Create a new repository over the shared storage handle.
    pub fn new(storage: StorageHandle) -> Self {
        Self { storage }
    }
}

fn map_handle_error(error: StorageError) -> ActivityPersistenceError {
    map_storage_error(error, ActivityPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ActivityPersistenceError {
    map_basic_diesel_error(
        error,
        ActivityPersistenceError::query,
        ActivityPersistenceError::connection,
    )
}

fn record_to_row(
    record: &NewActivityRecord,
) -> Result<NewActivityRow<'_>, ActivityPersistenceError> {
    let meals = i64::try_from(record.annual.meals).map_err(|_| {
        ActivityPersistenceError::query(format!(
            "meal count {} exceeds the storable range",
            record.annual.meals
        ))
    })?;

    Ok(NewActivityRow {
        user_id: record.user_id.get(),
        username: record.username.as_ref(),
        date: record.date.format(DATE_FORMAT).to_string(),
        distance: record.annual.distance,
        electricity: record.annual.electricity,
        waste: record.annual.waste,
        meals,
        total_emissions: record.total_emissions,
    })
}

fn row_to_record(row: ActivityRow) -> Result<ActivityRecord, ActivityPersistenceError> {
    let ActivityRow {
        id,
        user_id,
        username,
        date,
        distance,
        electricity,
        waste,
        meals,
        total_emissions,
    } = row;

    let invalid = |field: &str, detail: String| {
        ActivityPersistenceError::query(format!("activity row {id} has invalid {field}: {detail}"))
    };

    let user_id = UserId::new(user_id).map_err(|err| invalid("user_id", err.to_string()))?;
    let username = Username::new(username).map_err(|err| invalid("username", err.to_string()))?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
        .map_err(|err| invalid("date", format!("{date:?} ({err})")))?;
    let meals = u64::try_from(meals).map_err(|err| invalid("meals", err.to_string()))?;

    Ok(ActivityRecord {
        id: RecordId::new(id),
        user_id,
        username,
        date,
        annual: AnnualActivity {
            distance,
            electricity,
            waste,
            meals,
        },
        total_emissions,
    })
}

#[async_trait]
impl ActivityRepository for DieselActivityRepository {
    async fn append(
        &self,
        record: &NewActivityRecord,
    ) -> Result<RecordId, ActivityPersistenceError> {
        let new_row = record_to_row(record)?;
        let mut conn = self.storage.connection().await.map_err(map_handle_error)?;

        diesel::insert_into(data::table)
            .values(&new_row)
            .returning(data::id)
            .get_result::<i64>(&mut *conn)
            .await
            .map(RecordId::new)
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        username: &Username,
    ) -> Result<Vec<ActivityRecord>, ActivityPersistenceError> {
        let mut conn = self.storage.connection().await.map_err(map_handle_error)?;

        let rows: Vec<ActivityRow> = data::table
            .filter(
                data::user_id
                    .eq(user_id.get())
                    .and(data::username.eq(username.as_ref())),
            )
            .order(data::id.asc())
            .select(ActivityRow::as_select())
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}
