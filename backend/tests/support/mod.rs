//! Shared helper utilities for the SQLite-backed integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module keeps the temporary database and fixed clock helpers in one place.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use footprint::outbound::persistence::{StorageConfig, StorageHandle};
use mockable::{Clock, MockClock};
use tempfile::TempDir;

/// SQLite file inside a temporary directory removed on drop.
pub struct TempDatabase {
    _dir: TempDir,
    path: String,
}

impl TempDatabase {
    /// Reserve a fresh database path; the file is created on first open.
    pub fn new() -> Result<Self, String> {
        let dir = tempfile::tempdir().map_err(|err| format!("create temp dir: {err}"))?;
        let path = dir
            .path()
            .join("carbon_calculator.db")
            .to_string_lossy()
            .into_owned();
        Ok(Self { _dir: dir, path })
    }

    /// Storage configuration pointing at the temporary file.
    pub fn config(&self) -> StorageConfig {
        StorageConfig::new(&self.path)
    }

    /// Open a storage handle over the temporary file.
    pub async fn open(&self) -> Result<StorageHandle, String> {
        StorageHandle::open(self.config())
            .await
            .map_err(|err| err.to_string())
    }
}

/// Clock pinned to midday local time on `date`.
pub fn fixed_clock(date: NaiveDate) -> Arc<dyn Clock> {
    let local: DateTime<Local> = date
        .and_hms_opt(12, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .expect("fixture timestamp is representable");
    let utc: DateTime<Utc> = local.with_timezone(&Utc);

    let mut clock = MockClock::new();
    clock.expect_local().return_const(local);
    clock.expect_utc().return_const(utc);
    Arc::new(clock)
}
