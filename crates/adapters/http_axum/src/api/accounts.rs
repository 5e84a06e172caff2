//! JSON handlers for account registration and login.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use citas_app::ports::{AppointmentRepository, PasswordHasher, UserRepository};
use citas_app::services::account_service::{LoginUser, RegisterUser};
use citas_domain::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /register`.
///
/// Accepts both `name`/`role` and `nombre`/`rol`.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "rol")]
    pub role: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// Request body for `POST /login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginUser {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Body of a successful registration.
#[derive(Serialize)]
pub struct RegisteredBody {
    pub message: &'static str,
    pub user_id: UserId,
    pub nombre: String,
    pub email: String,
    pub rol: String,
    pub total: usize,
}

/// Body of a successful login.
#[derive(Serialize)]
pub struct LoggedInBody {
    pub message: &'static str,
    pub user_id: UserId,
    pub nombre: String,
    pub rol: String,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(Json<RegisteredBody>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    Ok(Json<LoggedInBody>),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /register`
pub async fn register<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<RegisterResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = body?;
    let registered = state.account_service.register(req.into()).await?;
    let profile = registered.profile;
    Ok(RegisterResponse::Created(Json(RegisteredBody {
        message: "user registered successfully",
        user_id: profile.id,
        nombre: profile.name,
        email: profile.email,
        rol: profile.role,
        total: registered.total,
    })))
}

/// `POST /login`
pub async fn login<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<LoginResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = body?;
    let profile = state
        .account_service
        .login(req.into())
        .await
        .map_err(ApiError::unauthorized_if_not_found)?;
    Ok(LoginResponse::Ok(Json(LoggedInBody {
        message: "login successful",
        user_id: profile.id,
        nombre: profile.name,
        rol: profile.role,
    })))
}
