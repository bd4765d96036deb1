//! SQLite-backed `RecordStore<Car>` implementation using Diesel ORM.
//!
//! Every operation holds the shared connection lock for its whole duration,
//! so an insert and the re-read that follows it cannot interleave with other
//! requests.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Timestamp;
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};
use tracing::{debug, info};

use crate::domain::ports::{RecordStore, StoreError};
use crate::domain::{Car, CarChanges, NewCar, RecordId};

use super::SQLITE_NEXT_STAMP;
use super::connection::{AsyncSqliteConnection, DbConnection};
use super::diesel_error_mapping::map_diesel_error;
use super::models::{CarChangeset, CarRow, NewCarRow};
use super::schema::cars;

const CREATE_CARS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS cars (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        year INTEGER,
        color TEXT,
        price REAL,
        mileage INTEGER,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    );
";

/// Diesel-backed implementation of the car record store.
#[derive(Clone)]
pub struct DieselCarStore {
    db: DbConnection,
}

impl DieselCarStore {
    /// Create a new store over the shared connection.
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

async fn fetch_car(
    conn: &mut AsyncSqliteConnection,
    id: RecordId,
) -> Result<Option<Car>, StoreError> {
    cars::table
        .find(id)
        .select(CarRow::as_select())
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Car::from))
        .map_err(map_diesel_error)
}

#[async_trait]
impl RecordStore<Car> for DieselCarStore {
    async fn create_table(&self) -> Result<(), StoreError> {
        let mut conn = self.db.lock().await;
        conn.batch_execute(CREATE_CARS_TABLE)
            .await
            .map_err(map_diesel_error)?;
        info!(table = "cars", "table created/verified");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Car>, StoreError> {
        let mut conn = self.db.lock().await;
        let rows: Vec<CarRow> = cars::table
            .order(cars::id.asc())
            .select(CarRow::as_select())
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Car>, StoreError> {
        let mut conn = self.db.lock().await;
        fetch_car(&mut conn, id).await
    }

    async fn create(&self, draft: NewCar) -> Result<Car, StoreError> {
        let mut conn = self.db.lock().await;
        let id: i64 = diesel::insert_into(cars::table)
            .values(NewCarRow::from(draft))
            .returning(cars::id)
            .get_result(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        fetch_car(&mut conn, id)
            .await?
            .ok_or_else(|| StoreError::query(format!("car {id} missing after insert")))
    }

    async fn update(&self, id: RecordId, changes: CarChanges) -> Result<Option<Car>, StoreError> {
        let mut conn = self.db.lock().await;
        if changes.is_empty() {
            debug!(id, "empty car change set; returning current record");
            return fetch_car(&mut conn, id).await;
        }

        let affected = diesel::update(cars::table.find(id))
            .set((
                CarChangeset::from(changes),
                cars::updated_at.eq(sql::<Timestamp>(SQLITE_NEXT_STAMP)),
            ))
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Ok(None);
        }

        fetch_car(&mut conn, id).await
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut conn = self.db.lock().await;
        let removed = diesel::delete(cars::table.find(id))
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.db.lock().await;
        cars::table
            .count()
            .get_result(&mut *conn)
            .await
            .map_err(map_diesel_error)
    }
}
