//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accounts;
#[allow(clippy::missing_errors_doc)]
pub mod appointments;

use axum::Router;
use axum::routing::{get, post};

use citas_app::ports::{AppointmentRepository, PasswordHasher, UserRepository};

use crate::state::AppState;

/// Build the API sub-router.
pub fn routes<UR, AR, H>() -> Router<AppState<UR, AR, H>>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        // Accounts
        .route("/register", post(accounts::register::<UR, AR, H>))
        .route("/login", post(accounts::login::<UR, AR, H>))
        // Appointments
        .route(
            "/appointments",
            get(appointments::list::<UR, AR, H>).post(appointments::create::<UR, AR, H>),
        )
        .route(
            "/appointments/{id}",
            get(appointments::get::<UR, AR, H>)
                .patch(appointments::update::<UR, AR, H>)
                .delete(appointments::delete::<UR, AR, H>),
        )
}
