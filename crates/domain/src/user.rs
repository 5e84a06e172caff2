//! User: an account that authenticates and owns appointments.

use serde::Serialize;

use crate::error::{CitasError, ValidationError};
use crate::id::UserId;
use crate::time::Timestamp;

/// One-way, salted digest of a password in PHC string format.
///
/// Never serialized; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed hash string.
    #[must_use]
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A registered account.
///
/// `email` is unique across all users and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub role: String,
    pub created_at: Timestamp,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Public projection without the password hash.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// What may be shown about a user to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    name: Option<String>,
    email: Option<String>,
    password_hash: Option<PasswordHash>,
    role: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::Validation`] listing every field that is
    /// missing or blank.
    pub fn build(self) -> Result<User, CitasError> {
        let name = self.name.filter(|v| !v.trim().is_empty());
        let email = self.email.filter(|v| !v.trim().is_empty());
        let role = self.role.filter(|v| !v.trim().is_empty());

        match (name, email, self.password_hash, role) {
            (Some(name), Some(email), Some(password_hash), Some(role)) => Ok(User {
                id: UserId::new(),
                name,
                email,
                password_hash,
                role,
                created_at: crate::time::now(),
            }),
            (name, email, password_hash, role) => {
                let missing = [
                    ("name", name.is_none()),
                    ("email", email.is_none()),
                    ("password_hash", password_hash.is_none()),
                    ("role", role.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(ValidationError::MissingFields(missing).into())
            }
        }
    }
}
