use chrono::{DateTime, Utc};
use secrecy::Secret;

/// Opaque, store-assigned identifier of a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        Self(tsid::create_tsid().to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One stored account. The password only ever exists here as an Argon2 PHC string.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated user whose password has already been hashed, ready to be inserted.
#[derive(Debug)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: Secret<String>,
}

/// Fields to overwrite on an existing record. `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct UserChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<Secret<String>>,
}

impl UserChangeset {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// What the edit page shows again after a rejected update: the submitted values, not a re-fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for UserDraft {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
