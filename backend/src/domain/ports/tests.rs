//! Behaviour of the in-memory fixture repositories.

use super::*;
use crate::domain::{AnnualActivity, NewActivityRecord, PasswordDigest, UserId, Username};
use chrono::NaiveDate;
use rstest::{fixture, rstest};

#[fixture]
fn asha() -> Username {
    Username::new("asha").expect("valid username")
}

fn record_for(user_id: i64, username: &str, day: u32, total: f64) -> NewActivityRecord {
    NewActivityRecord {
        user_id: UserId::new(user_id).expect("valid id"),
        username: Username::new(username).expect("valid username"),
        date: NaiveDate::from_ymd_opt(2024, 5, day).expect("valid date"),
        annual: AnnualActivity {
            distance: 365.0,
            electricity: 12.0,
            waste: 52.0,
            meals: 365,
        },
        total_emissions: total,
    }
}

#[rstest]
#[tokio::test]
async fn fixture_users_assign_sequential_ids(asha: Username) {
    let repo = FixtureUserRepository::default();
    let ravi = Username::new("ravi").expect("valid username");

    let first = repo
        .insert(&asha, &PasswordDigest::of("pw"))
        .await
        .expect("first insert");
    let second = repo
        .insert(&ravi, &PasswordDigest::of("pw"))
        .await
        .expect("second insert");

    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);
    assert_eq!(repo.len(), 2);
}

#[rstest]
#[tokio::test]
async fn fixture_users_reject_duplicate_usernames(asha: Username) {
    let repo = FixtureUserRepository::default();
    repo.insert(&asha, &PasswordDigest::of("one"))
        .await
        .expect("first insert");

    let err = repo
        .insert(&asha, &PasswordDigest::of("two"))
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err, UserPersistenceError::duplicate_username("asha"));
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case("monsoon", true)]
#[case("Monsoon", false)]
#[case("", false)]
#[tokio::test]
async fn fixture_users_match_username_and_digest(
    asha: Username,
    #[case] password: &str,
    #[case] should_match: bool,
) {
    let repo = FixtureUserRepository::default();
    repo.insert(&asha, &PasswordDigest::of("monsoon"))
        .await
        .expect("insert");

    let found = repo
        .find_by_credentials(&asha, &PasswordDigest::of(password))
        .await
        .expect("lookup");

    assert_eq!(found.is_some(), should_match);
}

#[rstest]
#[tokio::test]
async fn fixture_activity_lists_only_matching_user_in_order() {
    let repo = FixtureActivityRepository::default();
    repo.append(&record_for(1, "asha", 1, 1.5)).await.expect("append");
    repo.append(&record_for(2, "ravi", 1, 9.0)).await.expect("append");
    repo.append(&record_for(1, "asha", 1, 2.5)).await.expect("append");

    let asha = Username::new("asha").expect("valid username");
    let records = repo
        .list_for_user(UserId::new(1).expect("valid id"), &asha)
        .await
        .expect("list");

    let totals: Vec<f64> = records.iter().map(|record| record.total_emissions).collect();
    assert_eq!(totals, vec![1.5, 2.5]);
    assert_eq!(records[0].id.get(), 1);
    assert_eq!(records[1].id.get(), 3);
}

#[rstest]
#[tokio::test]
async fn fixture_activity_requires_both_id_and_username() {
    let repo = FixtureActivityRepository::default();
    repo.append(&record_for(1, "asha", 2, 1.0)).await.expect("append");

    let other_name = Username::new("impostor").expect("valid username");
    let records = repo
        .list_for_user(UserId::new(1).expect("valid id"), &other_name)
        .await
        .expect("list");

    assert!(records.is_empty());
}
