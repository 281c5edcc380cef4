//! Validated CRUD over user records.
//!
//! Create and update both hash the submitted password before it reaches the store, so a
//! stored `password_hash` is always an Argon2 PHC string.
use actix_web::{http::StatusCode, ResponseError};
use anyhow::Context;

use crate::domain::{
    NewUserForm, NewUserRecord, UserChangeset, UserDraft, UserId, UserRecord, UserUpdateForm,
};
use crate::hashing::CredentialHasher;
use crate::store::{RecordStore, SqliteUserStore};
use crate::utils::error_chain_fmt;
use crate::validation::{validate, ValidationErrors, CREATE_RULES, UPDATE_RULES};

pub struct UserRecordService<S = SqliteUserStore> {
    store: S,
    hasher: CredentialHasher,
}

#[derive(thiserror::Error)]
pub enum CreateUserError {
    #[error("{errors}")]
    Validation {
        errors: ValidationErrors,
        users: Vec<UserRecord>,
    },
    #[error("Failed to hash the password")]
    Hashing(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CreateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CreateUserError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Handlers re-render rejected forms; this only applies if one escapes.
            CreateUserError::Validation { .. } => StatusCode::BAD_REQUEST,
            CreateUserError::Hashing(_) | CreateUserError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(thiserror::Error)]
pub enum UpdateUserError {
    #[error("{errors}")]
    Validation {
        errors: ValidationErrors,
        draft: UserDraft,
    },
    #[error("Failed to hash the password")]
    Hashing(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UpdateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UpdateUserError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Handlers re-render rejected forms; this only applies if one escapes.
            UpdateUserError::Validation { .. } => StatusCode::BAD_REQUEST,
            UpdateUserError::Hashing(_) | UpdateUserError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl<S: RecordStore> UserRecordService<S> {
    pub fn new(store: S, hasher: CredentialHasher) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "Listing users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, anyhow::Error> {
        self.store.find_all().await
    }

    #[tracing::instrument(
        name = "Creating a new user",
        skip(self, form),
        fields(user_name = %form.name, user_email = %form.email)
    )]
    pub async fn create_user(&self, form: NewUserForm) -> Result<UserRecord, CreateUserError> {
        if let Err(errors) = validate(CREATE_RULES, &form) {
            tracing::info!(%errors, "Rejected user submission");
            let users = self
                .store
                .find_all()
                .await
                .context("Failed to reload users after a rejected submission.")?;
            return Err(CreateUserError::Validation { errors, users });
        }

        let NewUserForm {
            name,
            email,
            password,
        } = form;
        let password_hash = self
            .hasher
            .hash(password)
            .await
            .map_err(CreateUserError::Hashing)?;

        let user = self
            .store
            .insert(NewUserRecord {
                name,
                email,
                password_hash,
            })
            .await?;
        Ok(user)
    }

    /// `Ok(None)` for an unknown id.
    #[tracing::instrument(name = "Fetching a user for editing", skip(self))]
    pub async fn get_user_for_edit(&self, id: &UserId) -> Result<Option<UserRecord>, anyhow::Error> {
        self.store.find_by_id(id).await
    }

    /// Overwrites only the submitted fields. An unknown id is a silent no-op.
    #[tracing::instrument(name = "Applying a user update", skip(self, form))]
    pub async fn update_user(&self, id: &UserId, form: UserUpdateForm) -> Result<(), UpdateUserError> {
        let form = form.without_blanks();
        if let Err(errors) = validate(UPDATE_RULES, &form) {
            tracing::info!(%errors, "Rejected user update");
            let draft = UserDraft {
                id: id.clone(),
                name: form.name.unwrap_or_default(),
                email: form.email.unwrap_or_default(),
            };
            return Err(UpdateUserError::Validation { errors, draft });
        }

        let UserUpdateForm {
            name,
            email,
            password,
        } = form;
        let password_hash = match password {
            Some(password) => Some(
                self.hasher
                    .hash(password)
                    .await
                    .map_err(UpdateUserError::Hashing)?,
            ),
            None => None,
        };
        let changes = UserChangeset {
            name,
            email,
            password_hash,
        };
        if changes.is_empty() {
            return Ok(());
        }

        if !self.store.update_by_id(id, changes).await? {
            tracing::info!("No user matched the id; nothing was updated");
        }
        Ok(())
    }

    /// Deleting an unknown id is not an error.
    #[tracing::instrument(name = "Deleting a user", skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), anyhow::Error> {
        if !self.store.delete_by_id(id).await? {
            tracing::info!("No user matched the id; nothing was deleted");
        }
        Ok(())
    }
}
