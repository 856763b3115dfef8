// src/service/appointment_service.rs

use std::sync::Arc;

use super::{CrudService, trace_failure};
use crate::{
    models::{Appointment, AppointmentDetail, AppointmentDraft, Entity},
    store::{AppointmentRepository, StoreResult},
};

/// Appointment CRUD plus the natural-key flows (patient DNI, dentist license).
#[derive(Clone)]
pub struct AppointmentService {
    crud: CrudService<Appointment>,
    lookup: Arc<dyn AppointmentRepository>,
}

impl AppointmentService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: AppointmentRepository + 'static,
    {
        Self {
            crud: CrudService::<Appointment>::new(repo.clone()),
            lookup: repo,
        }
    }

    pub fn crud(&self) -> &CrudService<Appointment> {
        &self.crud
    }

    pub async fn detail_by_national_id(&self, national_id: &str) -> StoreResult<AppointmentDetail> {
        self.lookup
            .detail_by_national_id(national_id)
            .await
            .inspect_err(|e| trace_failure(Appointment::COMPONENT, "detail_by_national_id", e))
    }

    /// Resolves both natural keys, then inserts. Resolution failures abort before
    /// any write; nothing spans the three statements, so a patient or dentist
    /// deleted in between surfaces as a foreign key failure on insert.
    pub async fn create_by_national_id_and_license(
        &self,
        draft: AppointmentDraft,
        national_id: &str,
        license: &str,
    ) -> StoreResult<i64> {
        const OP: &str = "create_by_national_id_and_license";

        let patient_id = self
            .lookup
            .patient_id_by_national_id(national_id)
            .await
            .inspect_err(|e| trace_failure(Appointment::COMPONENT, OP, e))?;

        let dentist_id = self
            .lookup
            .dentist_id_by_license(license)
            .await
            .inspect_err(|e| trace_failure(Appointment::COMPONENT, OP, e))?;

        let mut appointment = Appointment {
            id: 0,
            patient_id,
            dentist_id,
            scheduled_at: draft.scheduled_at,
            description: draft.description,
        };
        appointment.normalize();

        let created = self
            .lookup
            .create(appointment)
            .await
            .inspect_err(|e| trace_failure(Appointment::COMPONENT, OP, e))?;

        tracing::info!(
            appointment_id = created.id,
            patient_id,
            dentist_id,
            "appointment created"
        );
        Ok(created.id)
    }
}
