use anyhow::Context;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

use super::RecordStore;
use crate::domain::{NewUserRecord, UserChangeset, UserId, UserRecord};

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: UserId::from(row.id),
            name: row.name,
            email: row.email,
            password_hash: Secret::new(row.password_hash),
            created_at: row.created_at,
        }
    }
}

impl RecordStore for SqliteUserStore {
    #[tracing::instrument(name = "Fetching all users", skip(self))]
    async fn find_all(&self) -> Result<Vec<UserRecord>, anyhow::Error> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to perform a query to retrieve all users.")?;
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    #[tracing::instrument(name = "Fetching a user by id", skip(self))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, anyhow::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve a user.")?;
        Ok(row.map(UserRecord::from))
    }

    #[tracing::instrument(
        name = "Saving new user details in the database",
        skip(self, record),
        fields(user_id = tracing::field::Empty)
    )]
    async fn insert(&self, record: NewUserRecord) -> Result<UserRecord, anyhow::Error> {
        let id = UserId::generate();
        let created_at = Utc::now();
        tracing::Span::current().record("user_id", tracing::field::display(&id));

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.as_ref())
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.password_hash.expose_secret())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })
        .context("Failed to insert a new user.")?;

        Ok(UserRecord {
            id,
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            created_at,
        })
    }

    #[tracing::instrument(name = "Updating a user", skip(self, changes))]
    async fn update_by_id(
        &self,
        id: &UserId,
        changes: UserChangeset,
    ) -> Result<bool, anyhow::Error> {
        let password_hash = changes
            .password_hash
            .as_ref()
            .map(|h| h.expose_secret().as_str());
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash)
            WHERE id = $4
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(password_hash)
        .bind(id.as_ref())
        .execute(&self.pool)
        .await
        .context("Failed to update the user.")?
        .rows_affected();
        Ok(rows_affected > 0)
    }

    #[tracing::instrument(name = "Deleting a user", skip(self))]
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, anyhow::Error> {
        let rows_affected = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .context("Failed to delete the user.")?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}
