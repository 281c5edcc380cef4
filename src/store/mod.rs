//! Persistence collaborator for [`UserRecord`]s.
mod sqlite;

pub use sqlite::SqliteUserStore;

use crate::domain::{NewUserRecord, UserChangeset, UserId, UserRecord};

/// CRUD contract the user service is written against.
///
/// `update_by_id` and `delete_by_id` report whether a record matched; an unknown id is
/// not an error.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, anyhow::Error>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, anyhow::Error>;

    async fn insert(&self, record: NewUserRecord) -> Result<UserRecord, anyhow::Error>;

    async fn update_by_id(
        &self,
        id: &UserId,
        changes: UserChangeset,
    ) -> Result<bool, anyhow::Error>;

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, anyhow::Error>;
}
