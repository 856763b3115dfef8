use std::fmt::Debug;
use std::sync::Arc;

use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    auth::hash_access_token,
    service::{AppointmentService, CrudService},
    store::{AppointmentRepository, Repository},
};

#[derive(Clone)]
pub struct AppState {
    pub dentists: CrudService<Dentist>,
    pub patients: CrudService<Patient>,
    pub appointments: AppointmentService,
    /// SHA-256 hex of the configured API token; the plain token is never kept.
    pub api_token_hash: Arc<str>,
}

impl AppState {
    pub fn new<A>(
        dentists: Arc<dyn Repository<Dentist>>,
        patients: Arc<dyn Repository<Patient>>,
        appointments: Arc<A>,
        api_token: &str,
    ) -> Self
    where
        A: AppointmentRepository + 'static,
    {
        Self {
            dentists: CrudService::new(dentists),
            patients: CrudService::new(patients),
            appointments: AppointmentService::new(appointments),
            api_token_hash: hash_access_token(api_token).into(),
        }
    }
}

impl FromRef<AppState> for CrudService<Dentist> {
    fn from_ref(state: &AppState) -> Self {
        state.dentists.clone()
    }
}

impl FromRef<AppState> for CrudService<Patient> {
    fn from_ref(state: &AppState) -> Self {
        state.patients.clone()
    }
}

impl FromRef<AppState> for CrudService<Appointment> {
    fn from_ref(state: &AppState) -> Self {
        state.appointments.crud().clone()
    }
}

impl FromRef<AppState> for AppointmentService {
    fn from_ref(state: &AppState) -> Self {
        state.appointments.clone()
    }
}

/* -------------------------
   Entity contract
--------------------------*/

/// A clinic record managed through the generic CRUD stack.
///
/// Each entity names its optional-field patch payload and knows how to fold a
/// patch into a stored record. The surrogate `id` is owned by the store.
pub trait Entity:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Patch: DeserializeOwned + Debug + Send + Sync;

    /// Wire name, as used in routes and confirmation messages.
    const NAME: &'static str;
    /// Service name used in log lines.
    const COMPONENT: &'static str;

    fn id(&self) -> i64;

    /// Fields supplied in `patch` replace stored ones; absent or blank ones don't.
    /// The stored id always survives.
    fn merge(self, patch: Self::Patch) -> Self;

    /// Trims text fields the same way `merge` does, so keys stored through
    /// create/replace resolve like patched ones.
    fn normalize(&mut self);

    /// Checks a full record before create/replace.
    fn validate(&self) -> Result<(), String>;

    /// Checks a patch before any store access.
    fn validate_patch(_patch: &Self::Patch) -> Result<(), String> {
        Ok(())
    }
}

fn merge_text(stored: String, incoming: Option<String>) -> String {
    match incoming.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => stored,
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn require_text(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

fn require_positive(value: i64, field: &str) -> Result<(), String> {
    if value <= 0 {
        return Err(format!("{field} must be a positive id"));
    }
    Ok(())
}

/* -------------------------
   Dentist
--------------------------*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dentist {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "matricula")]
    pub license: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DentistPatch {
    #[serde(rename = "apellido")]
    pub surname: Option<String>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "matricula")]
    pub license: Option<String>,
}

impl Entity for Dentist {
    type Patch = DentistPatch;

    const NAME: &'static str = "dentista";
    const COMPONENT: &'static str = "DentistService";

    fn id(&self) -> i64 {
        self.id
    }

    fn merge(self, patch: DentistPatch) -> Self {
        Self {
            id: self.id,
            surname: merge_text(self.surname, patch.surname),
            name: merge_text(self.name, patch.name),
            license: merge_text(self.license, patch.license),
        }
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.surname);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.license);
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.surname, "apellido")?;
        require_text(&self.name, "nombre")?;
        require_text(&self.license, "matricula")
    }
}

/* -------------------------
   Patient
--------------------------*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "domicilio", default)]
    pub address: String,
    #[serde(rename = "DNI")]
    pub national_id: String,
    // free text, the clinic front desk decides the format
    #[serde(rename = "fecha_alta", default)]
    pub registration_date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PatientPatch {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "apellido")]
    pub surname: Option<String>,
    #[serde(rename = "domicilio")]
    pub address: Option<String>,
    #[serde(rename = "DNI")]
    pub national_id: Option<String>,
    #[serde(rename = "fecha_alta")]
    pub registration_date: Option<String>,
}

impl Entity for Patient {
    type Patch = PatientPatch;

    const NAME: &'static str = "paciente";
    const COMPONENT: &'static str = "PatientService";

    fn id(&self) -> i64 {
        self.id
    }

    fn merge(self, patch: PatientPatch) -> Self {
        Self {
            id: self.id,
            name: merge_text(self.name, patch.name),
            surname: merge_text(self.surname, patch.surname),
            address: merge_text(self.address, patch.address),
            national_id: merge_text(self.national_id, patch.national_id),
            registration_date: merge_text(self.registration_date, patch.registration_date),
        }
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.surname);
        trim_in_place(&mut self.address);
        trim_in_place(&mut self.national_id);
        trim_in_place(&mut self.registration_date);
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "nombre")?;
        require_text(&self.surname, "apellido")?;
        require_text(&self.national_id, "DNI")
    }
}

/* -------------------------
   Appointment (turno)
--------------------------*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "idPaciente")]
    pub patient_id: i64,
    #[serde(rename = "idDentista")]
    pub dentist_id: i64,
    #[serde(rename = "fecha_hora")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentPatch {
    #[serde(rename = "idPaciente")]
    pub patient_id: Option<i64>,
    #[serde(rename = "idDentista")]
    pub dentist_id: Option<i64>,
    #[serde(rename = "fecha_hora")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

impl Entity for Appointment {
    type Patch = AppointmentPatch;

    const NAME: &'static str = "turno";
    const COMPONENT: &'static str = "AppointmentService";

    fn id(&self) -> i64 {
        self.id
    }

    fn merge(self, patch: AppointmentPatch) -> Self {
        Self {
            id: self.id,
            patient_id: patch.patient_id.unwrap_or(self.patient_id),
            dentist_id: patch.dentist_id.unwrap_or(self.dentist_id),
            scheduled_at: patch.scheduled_at.unwrap_or(self.scheduled_at),
            description: merge_text(self.description, patch.description),
        }
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.description);
    }

    fn validate(&self) -> Result<(), String> {
        require_positive(self.patient_id, "idPaciente")?;
        require_positive(self.dentist_id, "idDentista")
    }

    fn validate_patch(patch: &AppointmentPatch) -> Result<(), String> {
        if let Some(id) = patch.patient_id {
            require_positive(id, "idPaciente")?;
        }
        if let Some(id) = patch.dentist_id {
            require_positive(id, "idDentista")?;
        }
        Ok(())
    }
}

/// Body of the composite creation call; the foreign keys come from the query string.
#[derive(Debug, Deserialize)]
pub struct AppointmentDraft {
    #[serde(rename = "fecha_hora")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// Appointment joined with its patient, keyed by the patient's DNI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AppointmentDetail {
    pub id: i64,
    #[serde(rename = "idPaciente")]
    pub patient_id: i64,
    #[serde(rename = "idDentista")]
    pub dentist_id: i64,
    #[serde(rename = "pacienteNombre")]
    pub patient_name: String,
    #[serde(rename = "pacienteApellido")]
    pub patient_surname: String,
    #[serde(rename = "fecha_hora")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/* -------------------------
   Response envelopes
--------------------------*/

#[derive(Debug, Serialize)]
pub struct ApiOk<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct DeletedData {
    pub mensaje: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedAppointment {
    #[serde(rename = "turnoID")]
    pub appointment_id: i64,
}
