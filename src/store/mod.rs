// src/store/mod.rs

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{
    FromRow, PgPool, Postgres,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
};

use crate::models::{Appointment, AppointmentDetail, Entity};

mod appointment;
mod dentist;
mod patient;

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("error preparing statement: {0}")]
    PrepareFailure(#[source] sqlx::Error),
    #[error("error executing statement: {0}")]
    ExecFailure(#[source] sqlx::Error),
    #[error("error scanning row: {0}")]
    ScanFailure(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => StoreError::ScanFailure(e),
            sqlx::Error::Database(_) => StoreError::ExecFailure(e),
            _ => StoreError::PrepareFailure(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for one clinic table.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Inserts `record` and returns it with the store-assigned id.
    async fn create(&self, record: T) -> StoreResult<T>;

    async fn get_all(&self) -> StoreResult<Vec<T>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<T>;

    /// Replaces every mutable column of row `id`.
    async fn update(&self, record: T, id: i64) -> StoreResult<T>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Writes an already merged record.
    async fn patch(&self, record: T, id: i64) -> StoreResult<T> {
        self.update(record, id).await
    }
}

/// Natural-key lookups needed by appointment scheduling.
#[async_trait]
pub trait AppointmentRepository: Repository<Appointment> {
    async fn detail_by_national_id(&self, national_id: &str) -> StoreResult<AppointmentDetail>;

    async fn patient_id_by_national_id(&self, national_id: &str) -> StoreResult<i64>;

    async fn dentist_id_by_license(&self, license: &str) -> StoreResult<i64>;
}

pub type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

/// SQL text and column binding for an entity stored in Postgres.
///
/// `INSERT` and `UPDATE` take the mutable columns in `bind_fields` order;
/// `UPDATE` takes the id as its last parameter. Every statement except
/// `DELETE` must return the full row.
pub trait Table: Entity + for<'r> FromRow<'r, PgRow> {
    const INSERT: &'static str;
    const SELECT_ALL: &'static str;
    const SELECT_BY_ID: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    fn bind_fields<'q, O>(&self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O>;
}

pub struct PgStore<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Table> Repository<T> for PgStore<T> {
    async fn create(&self, record: T) -> StoreResult<T> {
        let row = record
            .bind_fields(sqlx::query_as::<_, T>(T::INSERT))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_all(&self) -> StoreResult<Vec<T>> {
        let rows = sqlx::query_as::<_, T>(T::SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<T> {
        sqlx::query_as::<_, T>(T::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, record: T, id: i64) -> StoreResult<T> {
        record
            .bind_fields(sqlx::query_as::<_, T>(T::UPDATE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let res = sqlx::query(T::DELETE)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlx_errors_map_to_store_kinds() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::ColumnNotFound("license".into())),
            StoreError::ScanFailure(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::PrepareFailure(_)
        ));
    }
}
