//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{Car, CarChanges, NewCar, NewUser, User, UserChanges};

use super::schema::{cars, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at.and_utc(),
        }
    }
}

/// Insertable struct for creating user records; `None` is written as `NULL`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewUserRow {
    pub name: String,
    pub email: Option<String>,
}

impl From<NewUser> for NewUserRow {
    fn from(draft: NewUser) -> Self {
        Self {
            name: draft.name,
            email: draft.email,
        }
    }
}

/// Changeset for partial user updates; `None` fields are left out of `SET`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
}

impl From<UserChanges> for UserChangeset {
    fn from(changes: UserChanges) -> Self {
        Self {
            name: changes.name,
            email: changes.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Car models
// ---------------------------------------------------------------------------

/// Row struct for reading from the cars table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CarRow {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub mileage: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Self {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
            color: row.color,
            price: row.price,
            mileage: row.mileage,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

/// Insertable struct for creating car records; `None` is written as `NULL`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cars)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewCarRow {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub mileage: Option<i64>,
}

impl From<NewCar> for NewCarRow {
    fn from(draft: NewCar) -> Self {
        Self {
            make: draft.make,
            model: draft.model,
            year: draft.year,
            color: draft.color,
            price: draft.price,
            mileage: draft.mileage,
        }
    }
}

/// Changeset for partial car updates.
///
/// Outer `None` leaves the column out of `SET`; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cars)]
pub(crate) struct CarChangeset {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<Option<i32>>,
    pub color: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub mileage: Option<Option<i64>>,
}

impl From<CarChanges> for CarChangeset {
    fn from(changes: CarChanges) -> Self {
        Self {
            make: changes.make,
            model: changes.model,
            year: changes.year,
            color: changes.color,
            price: changes.price,
            mileage: changes.mileage,
        }
    }
}
