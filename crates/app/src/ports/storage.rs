//! Storage port: repository traits for persistence.
//!
//! A repository is the "collection" a service operates on. Implementations own
//! their own atomicity: uniqueness of `email` and `id` is enforced there.

use std::future::Future;

use citas_domain::appointment::Appointment;
use citas_domain::error::CitasError;
use citas_domain::id::AppointmentId;
use citas_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user.
    ///
    /// Must fail with [`CitasError::Duplicate`] if the email is already taken.
    fn create(&self, user: User) -> impl Future<Output = Result<User, CitasError>> + Send;

    /// Find a user by exact (case-sensitive) email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, CitasError>> + Send;

    /// Number of stored users.
    fn count(&self) -> impl Future<Output = Result<usize, CitasError>> + Send;
}

/// Repository for persisting and querying [`Appointment`]s.
pub trait AppointmentRepository {
    /// Insert a new appointment.
    fn create(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, CitasError>> + Send;

    /// Get an appointment by its unique identifier.
    fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Appointment>, CitasError>> + Send;

    /// Get all appointments, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, CitasError>> + Send;

    /// Overwrite an existing appointment.
    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, CitasError>> + Send;

    /// Delete an appointment by its unique identifier.
    fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), CitasError>> + Send;

    /// Number of stored appointments.
    fn count(&self) -> impl Future<Output = Result<usize, CitasError>> + Send;
}
