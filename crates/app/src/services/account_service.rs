//! Account service: use-cases for registering and authenticating users.

use citas_domain::error::{
    AuthenticationError, CitasError, DuplicateError, NotFoundError, ValidationError,
};
use citas_domain::user::{User, UserProfile};

use crate::ports::{PasswordHasher, UserRepository};

/// Registration payload as received from a client. Any field may be absent.
#[derive(Default)]
pub struct RegisterUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login payload as received from a client. Any field may be absent.
#[derive(Default)]
pub struct LoginUser {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registered {
    pub profile: UserProfile,
    /// Number of users after the insert.
    pub total: usize,
}

/// Application service for account registration and login.
pub struct AccountService<R, H> {
    repo: R,
    hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> AccountService<R, H> {
    /// Create a new service backed by the given repository and hasher.
    pub fn new(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Register a new user.
    ///
    /// The password is hashed before storage; neither the password nor the
    /// hash is part of the returned payload.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::Validation`] if any field is missing or blank
    /// (an empty password is missing, a whitespace one is not),
    /// [`CitasError::Duplicate`] if the email is taken, or an internal error
    /// from the repository or hasher.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, request: RegisterUser) -> Result<Registered, CitasError> {
        let (name, email, password, role) = match (
            present(request.name),
            present(request.email),
            given(request.password),
            present(request.role),
        ) {
            (Some(name), Some(email), Some(password), Some(role)) => (name, email, password, role),
            (name, email, password, role) => {
                return Err(missing_fields(&[
                    ("name", name.is_none()),
                    ("email", email.is_none()),
                    ("password", password.is_none()),
                    ("role", role.is_none()),
                ]));
            }
        };

        if self.repo.find_by_email(&email).await?.is_some() {
            tracing::debug!("registration rejected, email already taken");
            return Err(DuplicateError::Email.into());
        }

        let password_hash = self.hasher.hash(&password).await?;
        let user = User::builder()
            .name(name)
            .email(email)
            .password_hash(password_hash)
            .role(role)
            .build()?;

        let created = self.repo.create(user).await?;
        let total = self.repo.count().await?;
        tracing::info!(user_id = %created.id, total, "user registered");

        Ok(Registered {
            profile: created.profile(),
            total,
        })
    }

    /// Authenticate a user by email and password.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::Validation`] if either field is missing,
    /// [`CitasError::NotFound`] if no user has that email,
    /// [`CitasError::Authentication`] if the password does not match, or an
    /// internal error from the repository or hasher.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, request: LoginUser) -> Result<UserProfile, CitasError> {
        let (email, password) = match (present(request.email), given(request.password)) {
            (Some(email), Some(password)) => (email, password),
            (email, password) => {
                return Err(missing_fields(&[
                    ("email", email.is_none()),
                    ("password", password.is_none()),
                ]));
            }
        };

        let Some(user) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("login rejected, unknown email");
            return Err(NotFoundError {
                entity: "User",
                id: email,
            }
            .into());
        };

        if !self.hasher.verify(&password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "login rejected, wrong password");
            return Err(AuthenticationError::WrongPassword.into());
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user.profile())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Passwords are taken verbatim: only an absent or empty one is missing.
fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn missing_fields(fields: &[(&'static str, bool)]) -> CitasError {
    let missing = fields
        .iter()
        .filter_map(|&(field, absent)| absent.then_some(field))
        .collect();
    ValidationError::MissingFields(missing).into()
}
