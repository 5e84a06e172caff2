//! Appointment: a scheduled visit owned by a user.

use serde::{Deserialize, Serialize};

use crate::error::{CitasError, ValidationError};
use crate::id::{AppointmentId, UserId};
use crate::time::Timestamp;

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Stable lowercase name, as stored and serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Returned when parsing a status string that names no known variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown appointment status `{0}`")]
pub struct UnknownStatus(pub String);

/// A scheduled appointment.
///
/// `id` is immutable and `updated_at >= created_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub owner_id: UserId,
    pub title: String,
    pub scheduled_at: Timestamp,
    pub status: AppointmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Create a builder for constructing an [`Appointment`].
    #[must_use]
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::default()
    }

    /// Shallow-merge `patch` into this appointment and stamp `updated_at`.
    ///
    /// Patched fields are taken as given; creation rules are not re-checked.
    pub fn apply(&mut self, patch: AppointmentPatch, now: Timestamp) {
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// Partial field-set applied to an existing [`Appointment`].
///
/// `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppointmentPatch {
    pub owner_id: Option<UserId>,
    pub title: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub status: Option<AppointmentStatus>,
}

/// Step-by-step builder for [`Appointment`].
#[derive(Debug, Default)]
pub struct AppointmentBuilder {
    owner_id: Option<UserId>,
    title: Option<String>,
    scheduled_at: Option<Timestamp>,
}

impl AppointmentBuilder {
    #[must_use]
    pub fn owner_id(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn scheduled_at(mut self, scheduled_at: Timestamp) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    /// Consume the builder, validate against `now`, and return an
    /// [`Appointment`] in the [`Scheduled`](AppointmentStatus::Scheduled) state.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::Validation`] when the owner or schedule is
    /// missing, the title is blank, or `scheduled_at` is not strictly after `now`.
    pub fn build_at(self, now: Timestamp) -> Result<Appointment, CitasError> {
        let mut missing = Vec::new();
        if self.owner_id.is_none() {
            missing.push("owner_id");
        }
        if self.scheduled_at.is_none() {
            missing.push("scheduled_at");
        }
        let (Some(owner_id), Some(scheduled_at)) = (self.owner_id, self.scheduled_at) else {
            return Err(ValidationError::MissingFields(missing).into());
        };

        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if scheduled_at <= now {
            return Err(ValidationError::PastSchedule.into());
        }

        Ok(Appointment {
            id: AppointmentId::new(),
            owner_id,
            title,
            scheduled_at,
            status: AppointmentStatus::Scheduled,
            created_at: now,
            updated_at: now,
        })
    }
}
