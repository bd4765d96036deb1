//! SQLite-backed `RecordStore<User>` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};
use tracing::{debug, info};

use crate::domain::ports::{RecordStore, StoreError};
use crate::domain::{NewUser, RecordId, User, UserChanges};

use super::connection::{AsyncSqliteConnection, DbConnection};
use super::diesel_error_mapping::map_diesel_error;
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::schema::users;

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    );
";

/// Diesel-backed implementation of the user record store.
#[derive(Clone)]
pub struct DieselUserStore {
    db: DbConnection,
}

impl DieselUserStore {
    /// Create a new store over the shared connection.
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

async fn fetch_user(
    conn: &mut AsyncSqliteConnection,
    id: RecordId,
) -> Result<Option<User>, StoreError> {
    users::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(User::from))
        .map_err(map_diesel_error)
}

#[async_trait]
impl RecordStore<User> for DieselUserStore {
    async fn create_table(&self) -> Result<(), StoreError> {
        let mut conn = self.db.lock().await;
        conn.batch_execute(CREATE_USERS_TABLE)
            .await
            .map_err(map_diesel_error)?;
        info!(table = "users", "table created/verified");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.db.lock().await;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<User>, StoreError> {
        let mut conn = self.db.lock().await;
        fetch_user(&mut conn, id).await
    }

    async fn create(&self, draft: NewUser) -> Result<User, StoreError> {
        let mut conn = self.db.lock().await;
        let id: i64 = diesel::insert_into(users::table)
            .values(NewUserRow::from(draft))
            .returning(users::id)
            .get_result(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        fetch_user(&mut conn, id)
            .await?
            .ok_or_else(|| StoreError::query(format!("user {id} missing after insert")))
    }

    async fn update(&self, id: RecordId, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut conn = self.db.lock().await;
        if changes.is_empty() {
            debug!(id, "empty user change set; returning current record");
            return fetch_user(&mut conn, id).await;
        }

        let affected = diesel::update(users::table.find(id))
            .set(UserChangeset::from(changes))
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Ok(None);
        }

        fetch_user(&mut conn, id).await
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut conn = self.db.lock().await;
        let removed = diesel::delete(users::table.find(id))
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.db.lock().await;
        users::table
            .count()
            .get_result(&mut *conn)
            .await
            .map_err(map_diesel_error)
    }
}
