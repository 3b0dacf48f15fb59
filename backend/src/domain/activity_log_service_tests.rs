//! Tests for the activity log service.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{FixtureActivityRepository, MockActivityRepository};
use crate::domain::{UserId, Username};
use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock() -> Arc<dyn Clock> {
    let utc_now = Local
        .with_ymd_and_hms(2024, 11, 5, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
        .with_timezone(&Utc);
    Arc::new(FixtureClock { utc_now })
}

fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid fixture date")
}

fn session(id: i64, username: &str) -> Session {
    Session::new(
        UserId::new(id).expect("valid id"),
        Username::new(username).expect("valid username"),
    )
}

fn daily(distance: f64, electricity: f64, waste: f64, meals: u32) -> DailyActivity {
    DailyActivity::try_new(distance, electricity, waste, meals).expect("valid daily activity")
}

#[fixture]
fn service() -> ActivityLogService<FixtureActivityRepository> {
    ActivityLogService::new(Arc::new(FixtureActivityRepository::default()), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn submit_records_assessment_dated_today(
    service: ActivityLogService<FixtureActivityRepository>,
) {
    let asha = session(1, "asha");

    let record = service
        .submit(&asha, "India", &daily(10.0, 100.0, 1.0, 2))
        .await
        .expect("submission succeeds");

    assert_eq!(record.date, fixture_date());
    assert_eq!(record.user_id, asha.user_id());
    assert_eq!(record.username, *asha.username());
    assert_eq!(record.annual.distance, 3650.0);
    assert_eq!(record.annual.electricity, 1200.0);
    assert_eq!(record.annual.waste, 52.0);
    assert_eq!(record.annual.meals, 730);
    assert_eq!(record.total_emissions, 2.41);
}

#[rstest]
#[tokio::test]
async fn submit_rejects_unknown_region_without_writing() {
    let mut repo = MockActivityRepository::new();
    repo.expect_append().times(0);
    let service = ActivityLogService::new(Arc::new(repo), fixture_clock());

    let err = service
        .submit(&session(1, "asha"), "Atlantis", &daily(1.0, 1.0, 1.0, 1))
        .await
        .expect_err("unknown region must fail");

    assert_eq!(err.code(), ErrorCode::UnknownRegion);
    assert!(err.message().contains("Atlantis"));
}

#[rstest]
#[tokio::test]
async fn appended_records_list_back_unchanged_in_order(
    service: ActivityLogService<FixtureActivityRepository>,
) {
    let asha = session(1, "asha");
    let first = service
        .submit(&asha, "India", &daily(10.0, 100.0, 1.0, 2))
        .await
        .expect("first submission");
    let second = service
        .submit(&asha, "India", &daily(10.0, 100.0, 1.0, 2))
        .await
        .expect("same-day submission accumulates");

    let records = service.list_for_user(&asha).await.expect("listing succeeds");

    assert_eq!(records, vec![first, second]);
}

#[rstest]
#[tokio::test]
async fn listing_excludes_other_users(service: ActivityLogService<FixtureActivityRepository>) {
    let asha = session(1, "asha");
    let ravi = session(2, "ravi");
    service
        .submit(&ravi, "India", &daily(50.0, 500.0, 5.0, 3))
        .await
        .expect("ravi submission");

    let records = service.list_for_user(&asha).await.expect("listing succeeds");

    assert!(records.is_empty());
}

#[rstest]
#[tokio::test]
async fn listing_twice_is_idempotent(service: ActivityLogService<FixtureActivityRepository>) {
    let asha = session(1, "asha");
    service
        .submit(&asha, "India", &daily(3.0, 30.0, 0.5, 3))
        .await
        .expect("submission");

    let first = service.list_for_user(&asha).await.expect("first listing");
    let second = service.list_for_user(&asha).await.expect("second listing");

    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn every_report_period_lists_identical_rows(
    service: ActivityLogService<FixtureActivityRepository>,
) {
    let asha = session(1, "asha");
    let assessment = assess("India", &daily(20.0, 150.0, 2.0, 3)).expect("known region");
    let earlier = NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date");
    service
        .append(&asha, earlier, &assessment)
        .await
        .expect("append");
    service
        .append(&asha, fixture_date(), &assessment)
        .await
        .expect("append");

    let expected = service.list_for_user(&asha).await.expect("listing");
    for period in ReportPeriod::ALL {
        let report = service.report(&asha, period).await.expect("report");
        assert_eq!(report.period, period);
        assert_eq!(report.records, expected);
    }
}

#[rstest]
#[case(ActivityPersistenceError::connection("database closed"), ErrorCode::StorageUnavailable)]
#[case(ActivityPersistenceError::query("disk I/O error"), ErrorCode::StorageFailure)]
#[tokio::test]
async fn append_maps_storage_failures(
    #[case] failure: ActivityPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockActivityRepository::new();
    repo.expect_append()
        .times(1)
        .return_once(move |_| Err(failure));
    let service = ActivityLogService::new(Arc::new(repo), fixture_clock());
    let assessment = assess("India", &daily(1.0, 1.0, 1.0, 1)).expect("known region");

    let err = service
        .append(&session(1, "asha"), fixture_date(), &assessment)
        .await
        .expect_err("storage failure must surface");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn list_passes_both_identity_fields_to_repository() {
    let mut repo = MockActivityRepository::new();
    repo.expect_list_for_user()
        .withf(|user_id, username| user_id.get() == 4 && username.as_ref() == "meera")
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let service = ActivityLogService::new(Arc::new(repo), fixture_clock());

    let records = service
        .list_for_user(&session(4, "meera"))
        .await
        .expect("listing succeeds");

    assert!(records.is_empty());
}
