// src/service/mod.rs

use std::sync::Arc;

use crate::{
    models::Entity,
    store::{Repository, StoreError, StoreResult},
};

mod appointment_service;

pub use appointment_service::AppointmentService;

/// Absent rows are an expected outcome; anything else is a store fault.
pub(crate) fn trace_failure(component: &'static str, op: &'static str, err: &StoreError) {
    match err {
        StoreError::NotFound => tracing::debug!(component, op, "record not found"),
        _ => tracing::error!(component, op, error = %err, "store operation failed"),
    }
}

/// Create/read/update/patch/delete orchestration shared by every entity.
pub struct CrudService<T: Entity> {
    repo: Arc<dyn Repository<T>>,
}

impl<T: Entity> Clone for CrudService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<T: Entity> CrudService<T> {
    pub fn new(repo: Arc<dyn Repository<T>>) -> Self {
        Self { repo }
    }

    fn logged<R>(&self, op: &'static str, res: StoreResult<R>) -> StoreResult<R> {
        if let Err(e) = &res {
            trace_failure(T::COMPONENT, op, e);
        }
        res
    }

    pub async fn create(&self, record: T) -> StoreResult<T> {
        let created = self.logged("create", self.repo.create(record).await)?;
        tracing::info!(component = T::COMPONENT, id = created.id(), "record created");
        Ok(created)
    }

    pub async fn get_all(&self) -> StoreResult<Vec<T>> {
        let res = self.repo.get_all().await;
        self.logged("get_all", res)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<T> {
        let res = self.repo.get_by_id(id).await;
        self.logged("get_by_id", res)
    }

    pub async fn update(&self, record: T, id: i64) -> StoreResult<T> {
        let res = self.repo.update(record, id).await;
        self.logged("update", res)
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let res = self.repo.delete(id).await;
        self.logged("delete", res)
    }

    /// Reads the stored record, folds `patch` into it and writes the result back.
    /// Not atomic: a concurrent writer between the read and the write is overwritten.
    pub async fn patch(&self, patch: T::Patch, id: i64) -> StoreResult<T> {
        let stored = self.logged("patch", self.repo.get_by_id(id).await)?;
        let merged = stored.merge(patch);
        let res = self.repo.patch(merged, id).await;
        self.logged("patch", res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dentist, DentistPatch};
    use crate::store::memory::MemoryStore;

    fn dentist(surname: &str, license: &str) -> Dentist {
        Dentist {
            id: 0,
            surname: surname.into(),
            name: "Juan".into(),
            license: license.into(),
        }
    }

    fn service() -> (Arc<MemoryStore<Dentist>>, CrudService<Dentist>) {
        let store = Arc::new(MemoryStore::new());
        let svc = CrudService::new(store.clone() as Arc<dyn Repository<Dentist>>);
        (store, svc)
    }

    #[tokio::test]
    async fn create_then_get_returns_input_with_assigned_id() {
        let (_, svc) = service();
        let input = dentist("Perez", "MP1234");

        let created = svc.create(input.clone()).await.unwrap();
        assert!(created.id > 0);

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Dentist { id: created.id, ..input });
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() {
        let (_, svc) = service();
        let created = svc.create(dentist("Perez", "MP1234")).await.unwrap();

        svc.delete(created.id).await.unwrap();
        assert!(matches!(svc.get_by_id(created.id).await, Err(StoreError::NotFound)));
        assert!(matches!(svc.delete(created.id).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let (_, svc) = service();
        let res = svc.update(dentist("Perez", "MP1"), 42).await;
        assert!(matches!(res, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn patch_merges_only_supplied_fields() {
        let (store, svc) = service();
        let created = svc.create(dentist("Perez", "MP1234")).await.unwrap();

        let patched = svc
            .patch(
                DentistPatch {
                    license: Some("MP9999".into()),
                    ..Default::default()
                },
                created.id,
            )
            .await
            .unwrap();

        assert_eq!(patched.surname, "Perez");
        assert_eq!(patched.license, "MP9999");
        assert_eq!(store.snapshot(), vec![patched]);
    }

    #[tokio::test]
    async fn patch_on_missing_row_does_not_write() {
        let (store, svc) = service();
        let res = svc.patch(DentistPatch::default(), 5).await;

        assert!(matches!(res, Err(StoreError::NotFound)));
        assert_eq!(store.calls(), 1);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn get_all_lists_in_id_order() {
        let (_, svc) = service();
        svc.create(dentist("Perez", "MP1")).await.unwrap();
        svc.create(dentist("Lopez", "MP2")).await.unwrap();

        let all = svc.get_all().await.unwrap();
        let surnames: Vec<_> = all.iter().map(|d| d.surname.as_str()).collect();
        assert_eq!(surnames, ["Perez", "Lopez"]);
    }
}
