// src/store/appointment.rs

use async_trait::async_trait;

use super::{AppointmentRepository, PgQueryAs, PgStore, StoreError, StoreResult, Table};
use crate::models::{Appointment, AppointmentDetail};

const QUERY_INSERT: &str = r#"
    INSERT INTO appointment (patient_id, dentist_id, scheduled_at, description)
    VALUES ($1, $2, $3, $4)
    RETURNING id, patient_id, dentist_id, scheduled_at, description
"#;

const QUERY_SELECT_ALL: &str = r#"
    SELECT id, patient_id, dentist_id, scheduled_at, description
    FROM appointment
    ORDER BY id
"#;

const QUERY_SELECT_BY_ID: &str = r#"
    SELECT id, patient_id, dentist_id, scheduled_at, description
    FROM appointment
    WHERE id = $1
"#;

const QUERY_UPDATE: &str = r#"
    UPDATE appointment
    SET patient_id = $1,
        dentist_id = $2,
        scheduled_at = $3,
        description = $4
    WHERE id = $5
    RETURNING id, patient_id, dentist_id, scheduled_at, description
"#;

const QUERY_DELETE: &str = r#"DELETE FROM appointment WHERE id = $1"#;

// A patient may hold several appointments; the most recent one wins.
const QUERY_DETAIL_BY_NATIONAL_ID: &str = r#"
    SELECT
      a.id,
      a.patient_id,
      a.dentist_id,
      p.name    AS patient_name,
      p.surname AS patient_surname,
      a.scheduled_at,
      a.description
    FROM appointment a
    JOIN patient p ON p.id = a.patient_id
    WHERE p.national_id = $1
    ORDER BY a.scheduled_at DESC, a.id DESC
    LIMIT 1
"#;

const QUERY_PATIENT_ID_BY_NATIONAL_ID: &str = r#"
    SELECT id
    FROM patient
    WHERE national_id = $1
    ORDER BY id
    LIMIT 1
"#;

const QUERY_DENTIST_ID_BY_LICENSE: &str = r#"
    SELECT id
    FROM dentist
    WHERE license = $1
    ORDER BY id
    LIMIT 1
"#;

impl Table for Appointment {
    const INSERT: &'static str = QUERY_INSERT;
    const SELECT_ALL: &'static str = QUERY_SELECT_ALL;
    const SELECT_BY_ID: &'static str = QUERY_SELECT_BY_ID;
    const UPDATE: &'static str = QUERY_UPDATE;
    const DELETE: &'static str = QUERY_DELETE;

    fn bind_fields<'q, O>(&self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(self.patient_id)
            .bind(self.dentist_id)
            .bind(self.scheduled_at)
            .bind(self.description.clone())
    }
}

#[async_trait]
impl AppointmentRepository for PgStore<Appointment> {
    async fn detail_by_national_id(&self, national_id: &str) -> StoreResult<AppointmentDetail> {
        sqlx::query_as::<_, AppointmentDetail>(QUERY_DETAIL_BY_NATIONAL_ID)
            .bind(national_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn patient_id_by_national_id(&self, national_id: &str) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(QUERY_PATIENT_ID_BY_NATIONAL_ID)
            .bind(national_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn dentist_id_by_license(&self, license: &str) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(QUERY_DENTIST_ID_BY_LICENSE)
            .bind(license)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }
}
