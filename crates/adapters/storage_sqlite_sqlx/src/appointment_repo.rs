//! `SQLite` implementation of [`AppointmentRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use citas_app::ports::AppointmentRepository;
use citas_domain::appointment::{Appointment, AppointmentStatus};
use citas_domain::error::CitasError;
use citas_domain::id::{AppointmentId, UserId};
use citas_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Appointment`].
struct Wrapper(Appointment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Appointment> {
        value.map(|w| w.0)
    }
}

fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let owner_id: String = row.try_get("owner_id")?;
        let title: String = row.try_get("title")?;
        let scheduled_at: String = row.try_get("scheduled_at")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Appointment {
            id: AppointmentId::from_str(&id).map_err(decode)?,
            owner_id: UserId::from_str(&owner_id).map_err(decode)?,
            title,
            scheduled_at: time::parse_rfc3339(&scheduled_at).map_err(decode)?,
            status: AppointmentStatus::from_str(&status).map_err(decode)?,
            created_at: time::parse_rfc3339(&created_at).map_err(decode)?,
            updated_at: time::parse_rfc3339(&updated_at).map_err(decode)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO appointments (id, owner_id, title, scheduled_at, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM appointments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM appointments ORDER BY rowid";
const UPDATE: &str = r"
    UPDATE appointments
    SET owner_id = ?, title = ?, scheduled_at = ?, status = ?, updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM appointments WHERE id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM appointments";

/// `SQLite`-backed appointment repository.
pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    fn create(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(appointment.id.to_string())
                .bind(appointment.owner_id.to_string())
                .bind(&appointment.title)
                .bind(appointment.scheduled_at.to_rfc3339())
                .bind(appointment.status.as_str())
                .bind(appointment.created_at.to_rfc3339())
                .bind(appointment.updated_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment)
        }
    }

    fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Appointment>, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(appointment.owner_id.to_string())
                .bind(&appointment.title)
                .bind(appointment.scheduled_at.to_rfc3339())
                .bind(appointment.status.as_str())
                .bind(appointment.updated_at.to_rfc3339())
                .bind(appointment.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment)
        }
    }

    fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn count(&self) -> impl Future<Output = Result<usize, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(count).map_err(StorageError::from)?)
        }
    }
}
