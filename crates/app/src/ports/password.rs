//! Password hashing port.

use std::future::Future;

use citas_domain::error::CitasError;
use citas_domain::user::PasswordHash;

/// One-way, salted password hashing primitive.
///
/// Implementations are expected to be slow on purpose, so they should keep
/// the work off the async executor.
pub trait PasswordHasher {
    /// Derive a hash from a raw password.
    ///
    /// Must fail with [`CitasError::Internal`] if the primitive fails.
    fn hash(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<PasswordHash, CitasError>> + Send;

    /// Check `password` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`, not an error. An undecodable `hash` is
    /// [`CitasError::Internal`].
    fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> impl Future<Output = Result<bool, CitasError>> + Send;
}
