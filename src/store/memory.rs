// src/store/memory.rs
//
// In-memory repositories backing service and router tests.

use std::collections::BTreeMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{AppointmentRepository, Repository, StoreError, StoreResult};
use crate::models::{Appointment, AppointmentDetail, Dentist, Entity, Patient};

/// Entities that can have their surrogate id assigned by a fake store.
pub trait Keyed: Entity {
    fn with_id(self, id: i64) -> Self;
}

impl Keyed for Dentist {
    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl Keyed for Patient {
    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

impl Keyed for Appointment {
    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

pub struct MemoryStore<T> {
    rows: Mutex<BTreeMap<i64, T>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
}

impl<T: Keyed> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            calls: AtomicUsize::new(0),
        }
    }
}

impl<T: Keyed> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its own id; later creates continue after it.
    pub fn seed(&self, record: T) {
        let id = record.id();
        let mut next = self.next_id.lock().unwrap();
        *next = (*next).max(id + 1);
        self.rows.lock().unwrap().insert(id, record);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    /// Number of repository calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: Keyed> Repository<T> for MemoryStore<T> {
    async fn create(&self, record: T) -> StoreResult<T> {
        self.touch();
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let record = record.with_id(id);
        self.rows.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn get_all(&self) -> StoreResult<Vec<T>> {
        self.touch();
        Ok(self.snapshot())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<T> {
        self.touch();
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, record: T, id: i64) -> StoreResult<T> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        let slot = rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = record.with_id(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.touch();
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Appointment store that resolves natural keys against sibling fakes.
#[derive(Default)]
pub struct MemoryClinic {
    pub dentists: Arc<MemoryStore<Dentist>>,
    pub patients: Arc<MemoryStore<Patient>>,
    pub appointments: MemoryStore<Appointment>,
}

impl MemoryClinic {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Appointment> for MemoryClinic {
    async fn create(&self, record: Appointment) -> StoreResult<Appointment> {
        self.appointments.create(record).await
    }

    async fn get_all(&self) -> StoreResult<Vec<Appointment>> {
        self.appointments.get_all().await
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Appointment> {
        self.appointments.get_by_id(id).await
    }

    async fn update(&self, record: Appointment, id: i64) -> StoreResult<Appointment> {
        self.appointments.update(record, id).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.appointments.delete(id).await
    }
}

#[async_trait]
impl AppointmentRepository for MemoryClinic {
    async fn detail_by_national_id(&self, national_id: &str) -> StoreResult<AppointmentDetail> {
        // same join as the SQL detail query: every patient row carrying the DNI
        let patients: BTreeMap<i64, Patient> = self
            .patients
            .snapshot()
            .into_iter()
            .filter(|p| p.national_id == national_id)
            .map(|p| (p.id, p))
            .collect();

        self.appointments
            .snapshot()
            .into_iter()
            .filter_map(|a| patients.get(&a.patient_id).map(|p| (a, p)))
            .max_by_key(|(a, _)| (a.scheduled_at, a.id))
            .map(|(a, p)| AppointmentDetail {
                id: a.id,
                patient_id: a.patient_id,
                dentist_id: a.dentist_id,
                patient_name: p.name.clone(),
                patient_surname: p.surname.clone(),
                scheduled_at: a.scheduled_at,
                description: a.description,
            })
            .ok_or(StoreError::NotFound)
    }

    async fn patient_id_by_national_id(&self, national_id: &str) -> StoreResult<i64> {
        self.patients
            .snapshot()
            .into_iter()
            .find(|p| p.national_id == national_id)
            .map(|p| p.id)
            .ok_or(StoreError::NotFound)
    }

    async fn dentist_id_by_license(&self, license: &str) -> StoreResult<i64> {
        self.dentists
            .snapshot()
            .into_iter()
            .find(|d| d.license == license)
            .map(|d| d.id)
            .ok_or(StoreError::NotFound)
    }
}
