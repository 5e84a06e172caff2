//! Shared application state for axum handlers.

use std::sync::Arc;

use citas_app::ports::{AppointmentRepository, PasswordHasher, UserRepository};
use citas_app::services::account_service::AccountService;
use citas_app::services::appointment_service::AppointmentService;

/// Application state shared across all axum handlers.
///
/// Generic over the user repository, appointment repository, and password
/// hasher to avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<UR, AR, H> {
    /// Registration and login.
    pub account_service: Arc<AccountService<UR, H>>,
    /// Appointment CRUD service.
    pub appointment_service: Arc<AppointmentService<AR>>,
}

impl<UR, AR, H> Clone for AppState<UR, AR, H> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            appointment_service: Arc::clone(&self.appointment_service),
        }
    }
}

impl<UR, AR, H> AppState<UR, AR, H>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        account_service: AccountService<UR, H>,
        appointment_service: AppointmentService<AR>,
    ) -> Self {
        Self {
            account_service: Arc::new(account_service),
            appointment_service: Arc::new(appointment_service),
        }
    }
}
