//! # citas-adapter-password-argon2
//!
//! [`PasswordHasher`] port implementation backed by
//! [argon2](https://docs.rs/argon2).
//!
//! Hashes are Argon2id with a fresh random salt per call, encoded as PHC
//! strings (`$argon2id$v=19$...`) so the parameters travel with the hash.
//! Hashing and verification run on tokio's blocking pool so a login never
//! stalls the executor.
//!
//! ## Dependency rule
//! Depends on `citas-app` (for the port trait) and `citas-domain`.

use std::future::Future;

use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString};

use citas_app::ports::PasswordHasher;
use citas_domain::error::CitasError;
use citas_domain::user::PasswordHash;

/// Argon2id hasher with the crate's default (OWASP-recommended) parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<PasswordHash, CitasError>> + Send {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        offload(move || hash_blocking(&argon2, &password))
    }

    fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> impl Future<Output = Result<bool, CitasError>> + Send {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let stored = hash.as_str().to_owned();
        offload(move || verify_blocking(&argon2, &password, &stored))
    }
}

async fn offload<T, F>(work: F) -> Result<T, CitasError>
where
    F: FnOnce() -> Result<T, CitasError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        tracing::error!(error = %err, "password worker did not complete");
        CitasError::internal(err)
    })?
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> Result<PasswordHash, CitasError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| {
            tracing::error!(error = %err, "password hashing failed");
            CitasError::internal(err)
        })?;
    Ok(PasswordHash::new(hash.to_string()))
}

fn verify_blocking(argon2: &Argon2<'_>, password: &str, stored: &str) -> Result<bool, CitasError> {
    let parsed = password_hash::PasswordHash::new(stored).map_err(|err| {
        tracing::error!(error = %err, "stored password hash is malformed");
        CitasError::internal(err)
    })?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CitasError::internal(err)),
    }
}
