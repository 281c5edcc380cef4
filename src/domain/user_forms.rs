use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// The fields a submission may carry. Anything else in a form body is dropped on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

/// Read access to submitted values, keyed by [`Field`].
///
/// `None` means the field was not submitted at all.
pub trait Submission {
    fn value(&self, field: Field) -> Option<&str>;
}

#[derive(Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

impl Submission for NewUserForm {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(self.name.as_str()),
            Field::Email => Some(self.email.as_str()),
            Field::Password => Some(self.password.expose_secret().as_str()),
        }
    }
}

/// Allow-list of the fields an update may touch.
#[derive(Deserialize, Default)]
pub struct UserUpdateForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

impl UserUpdateForm {
    /// Blank inputs from the edit form count as "not submitted".
    pub fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|v| !v.trim().is_empty()),
            email: self.email.filter(|v| !v.trim().is_empty()),
            password: self.password.filter(|p| !p.expose_secret().is_empty()),
        }
    }
}

impl Submission for UserUpdateForm {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_ref().map(|p| p.expose_secret().as_str()),
        }
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}
