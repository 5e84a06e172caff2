//! JSON REST handlers for appointments.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use citas_app::ports::{AppointmentRepository, PasswordHasher, UserRepository};
use citas_domain::appointment::{Appointment, AppointmentPatch};
use citas_domain::error::ValidationError;
use citas_domain::id::{AppointmentId, UserId};
use citas_domain::time;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an appointment.
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub owner_id: Option<String>,
    pub title: Option<String>,
    /// RFC 3339 timestamp.
    pub scheduled_at: Option<String>,
}

/// Body of a successful creation.
#[derive(Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    pub appointment: Appointment,
    pub total: usize,
}

/// Body of a successful update.
#[derive(Serialize)]
pub struct UpdatedBody {
    pub message: &'static str,
    pub appointment: Appointment,
}

/// Body of a successful deletion.
#[derive(Serialize)]
pub struct DeletedBody {
    pub message: &'static str,
    pub total: usize,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Appointment>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Appointment>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CreatedBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<UpdatedBody>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<DeletedBody>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<AppointmentId, ApiError> {
    AppointmentId::from_str(raw).map_err(|_| ValidationError::InvalidId.into())
}

/// `GET /appointments`
pub async fn list<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let appointments = state.appointment_service.list_appointments().await?;
    Ok(ListResponse::Ok(Json(appointments)))
}

/// `GET /appointments/:id`
pub async fn get<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let appointment = state.appointment_service.get_appointment(id).await?;
    Ok(GetResponse::Ok(Json(appointment)))
}

/// `POST /appointments`
pub async fn create<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    body: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = body?;
    let missing = [
        ("owner_id", req.owner_id.is_none()),
        ("title", req.title.is_none()),
        ("scheduled_at", req.scheduled_at.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();
    let (Some(owner_id), Some(title), Some(scheduled_at)) =
        (req.owner_id, req.title, req.scheduled_at)
    else {
        return Err(ValidationError::MissingFields(missing).into());
    };

    let owner_id =
        UserId::from_str(&owner_id).map_err(|_| ApiError::from(ValidationError::InvalidId))?;
    let scheduled_at = time::parse_rfc3339(&scheduled_at)
        .map_err(|_| ApiError::from(ValidationError::InvalidTimestamp))?;

    let created = state
        .appointment_service
        .create_appointment(owner_id, title, scheduled_at)
        .await?;
    Ok(CreateResponse::Created(Json(CreatedBody {
        message: "appointment created",
        appointment: created.appointment,
        total: created.total,
    })))
}

/// `PATCH /appointments/:id`
pub async fn update<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    Path(id): Path<String>,
    body: Result<Json<AppointmentPatch>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    let appointment = state
        .appointment_service
        .update_appointment(id, patch)
        .await?;
    Ok(UpdateResponse::Ok(Json(UpdatedBody {
        message: "appointment updated",
        appointment,
    })))
}

/// `DELETE /appointments/:id`
pub async fn delete<UR, AR, H>(
    State(state): State<AppState<UR, AR, H>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let total = state.appointment_service.delete_appointment(id).await?;
    Ok(DeleteResponse::Ok(Json(DeletedBody {
        message: "appointment deleted",
        total,
    })))
}
