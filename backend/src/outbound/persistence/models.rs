//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{data, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the data table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ActivityRow {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub date: String,
    pub distance: f64,
    pub electricity: f64,
    pub waste: f64,
    pub meals: i64,
    pub total_emissions: f64,
}

/// Insertable struct for appending activity records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = data)]
pub(crate) struct NewActivityRow<'a> {
    pub user_id: i64,
    pub username: &'a str,
    pub date: String,
    pub distance: f64,
    pub electricity: f64,
    pub waste: f64,
    pub meals: i64,
    pub total_emissions: f64,
}
