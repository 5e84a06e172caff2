//! Appointment service: use-cases for managing appointments.

use citas_domain::appointment::{Appointment, AppointmentPatch};
use citas_domain::error::{CitasError, NotFoundError};
use citas_domain::id::{AppointmentId, UserId};
use citas_domain::time::{self, Timestamp};

use crate::ports::AppointmentRepository;

/// Outcome of a successful creation.
#[derive(Debug, Clone)]
pub struct Created {
    pub appointment: Appointment,
    /// Number of appointments after the insert.
    pub total: usize,
}

/// Application service for appointment CRUD operations.
pub struct AppointmentService<R> {
    repo: R,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Schedule a new appointment.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::Validation`] if the title is blank or
    /// `scheduled_at` is not in the future, or a storage error propagated
    /// from the repository.
    #[tracing::instrument(skip(self, title))]
    pub async fn create_appointment(
        &self,
        owner_id: UserId,
        title: String,
        scheduled_at: Timestamp,
    ) -> Result<Created, CitasError> {
        let appointment = Appointment::builder()
            .owner_id(owner_id)
            .title(title)
            .scheduled_at(scheduled_at)
            .build_at(time::now())?;

        let appointment = self.repo.create(appointment).await?;
        let total = self.repo.count().await?;
        tracing::info!(appointment_id = %appointment.id, total, "appointment created");

        Ok(Created { appointment, total })
    }

    /// Look up an appointment by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, CitasError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Appointment",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List every appointment, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, CitasError> {
        self.repo.get_all().await
    }

    /// Merge `patch` into an existing appointment.
    ///
    /// Patched values are not re-validated against the creation rules.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Appointment, CitasError> {
        let mut appointment = self.get_appointment(id).await?;
        appointment.apply(patch, time::now());
        let updated = self.repo.update(appointment).await?;
        tracing::info!(status = %updated.status, "appointment updated");
        Ok(updated)
    }

    /// Delete an appointment and return the remaining count.
    ///
    /// # Errors
    ///
    /// Returns [`CitasError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_appointment(&self, id: AppointmentId) -> Result<usize, CitasError> {
        self.get_appointment(id).await?;
        self.repo.delete(id).await?;
        let total = self.repo.count().await?;
        tracing::info!(total, "appointment deleted");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use citas_domain::appointment::AppointmentStatus;
    use citas_domain::error::ValidationError;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryAppointmentRepo {
        store: Mutex<Vec<Appointment>>,
    }

    impl AppointmentRepository for InMemoryAppointmentRepo {
        fn create(
            &self,
            appointment: Appointment,
        ) -> impl Future<Output = Result<Appointment, CitasError>> + Send {
            self.store.lock().unwrap().push(appointment.clone());
            async { Ok(appointment) }
        }

        fn get_by_id(
            &self,
            id: AppointmentId,
        ) -> impl Future<Output = Result<Option<Appointment>, CitasError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|a| a.id == id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, CitasError>> + Send {
            let result = self.store.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn update(
            &self,
            appointment: Appointment,
        ) -> impl Future<Output = Result<Appointment, CitasError>> + Send {
            let mut store = self.store.lock().unwrap();
            if let Some(slot) = store.iter_mut().find(|a| a.id == appointment.id) {
                *slot = appointment.clone();
            }
            async { Ok(appointment) }
        }

        fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), CitasError>> + Send {
            self.store.lock().unwrap().retain(|a| a.id != id);
            async { Ok(()) }
        }

        fn count(&self) -> impl Future<Output = Result<usize, CitasError>> + Send {
            let len = self.store.lock().unwrap().len();
            async move { Ok(len) }
        }
    }

    /// A fresh service holding two scheduled appointments.
    async fn seeded() -> (AppointmentService<InMemoryAppointmentRepo>, Vec<AppointmentId>) {
        let svc = AppointmentService::new(InMemoryAppointmentRepo::default());
        let mut ids = Vec::new();
        for (title, days) in [("Chequeo general", 3), ("Revisión anual", 4)] {
            let created = svc
                .create_appointment(UserId::new(), title.to_string(), in_days(days))
                .await
                .unwrap();
            ids.push(created.appointment.id);
        }
        (svc, ids)
    }

    fn in_days(days: i64) -> Timestamp {
        time::now() + Duration::days(days)
    }

    #[tokio::test]
    async fn should_create_appointment_when_valid() {
        let (svc, _) = seeded().await;

        let created = svc
            .create_appointment(UserId::new(), "Medicina General".to_string(), in_days(2))
            .await
            .unwrap();

        assert_eq!(created.total, 3);
        assert_eq!(created.appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(created.appointment.created_at, created.appointment.updated_at);
        assert_eq!(svc.list_appointments().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_reject_empty_title_and_leave_collection_unchanged() {
        let (svc, _) = seeded().await;

        let result = svc
            .create_appointment(UserId::new(), String::new(), in_days(2))
            .await;

        assert!(matches!(
            result,
            Err(CitasError::Validation(ValidationError::EmptyTitle))
        ));
        assert_eq!(svc.list_appointments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_reject_past_schedule_and_leave_collection_unchanged() {
        let (svc, _) = seeded().await;

        let result = svc
            .create_appointment(UserId::new(), "Medicina General".to_string(), in_days(-1))
            .await;

        assert!(matches!(
            result,
            Err(CitasError::Validation(ValidationError::PastSchedule))
        ));
        assert_eq!(svc.list_appointments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_list_in_insertion_order() {
        let (svc, ids) = seeded().await;
        let listed: Vec<_> = svc
            .list_appointments()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn should_update_status_and_stamp_updated_at() {
        let (svc, ids) = seeded().await;
        let before = svc.get_appointment(ids[0]).await.unwrap();

        let updated = svc
            .update_appointment(
                ids[0],
                AppointmentPatch {
                    status: Some(AppointmentStatus::Cancelled),
                    ..AppointmentPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, AppointmentStatus::Cancelled);
        assert_eq!(updated.title, before.title);
        assert!(updated.updated_at >= before.updated_at);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(
            svc.get_appointment(ids[0]).await.unwrap().status,
            AppointmentStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn should_accept_patch_that_breaks_creation_rules() {
        let (svc, ids) = seeded().await;

        let updated = svc
            .update_appointment(
                ids[1],
                AppointmentPatch {
                    title: Some(String::new()),
                    scheduled_at: Some(in_days(-10)),
                    ..AppointmentPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.title.is_empty());
        assert!(updated.scheduled_at < time::now());
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_appointment() {
        let (svc, _) = seeded().await;
        let before = svc.list_appointments().await.unwrap();

        let result = svc
            .update_appointment(
                AppointmentId::new(),
                AppointmentPatch {
                    status: Some(AppointmentStatus::Completed),
                    ..AppointmentPatch::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CitasError::NotFound(_))));
        assert_eq!(svc.list_appointments().await.unwrap(), before);
    }

    #[tokio::test]
    async fn should_delete_exactly_one_appointment() {
        let (svc, ids) = seeded().await;

        let total = svc.delete_appointment(ids[0]).await.unwrap();

        assert_eq!(total, 1);
        let remaining = svc.list_appointments().await.unwrap();
        assert!(remaining.iter().all(|a| a.id != ids[0]));
        assert_eq!(remaining[0].id, ids[1]);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_appointment() {
        let (svc, _) = seeded().await;
        let before = svc.list_appointments().await.unwrap();

        let result = svc.delete_appointment(AppointmentId::new()).await;

        assert!(matches!(result, Err(CitasError::NotFound(_))));
        assert_eq!(svc.list_appointments().await.unwrap(), before);
    }

    #[tokio::test]
    async fn should_isolate_collections_between_services() {
        let (first, ids) = seeded().await;
        let (second, _) = seeded().await;

        first.delete_appointment(ids[0]).await.unwrap();

        assert_eq!(first.list_appointments().await.unwrap().len(), 1);
        assert_eq!(second.list_appointments().await.unwrap().len(), 2);
    }
}
