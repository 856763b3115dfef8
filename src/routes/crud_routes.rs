// src/routes/crud_routes.rs
//
// Handlers shared by every entity. Each route file only decides which of them
// to mount and where.

use axum::{
    Json, Router,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    routing::{MethodRouter, get, post},
};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, DeletedData, Entity},
    service::CrudService,
};

/// Parses a path id; rejects anything that is not a positive integer.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::invalid_id)
}

/// `POST base`, `GET base` and the `base/{id}` item routes.
pub fn router<T>(base: &str) -> Router<AppState>
where
    T: Entity,
    CrudService<T>: FromRef<AppState>,
{
    Router::new()
        .route(base, post(create::<T>).get(get_all::<T>))
        .route(&format!("{base}/{{id}}"), item_routes::<T>())
}

/// `GET` (public), `PUT`, `PATCH` and `DELETE` on a single record.
pub fn item_routes<T>() -> MethodRouter<AppState>
where
    T: Entity,
    CrudService<T>: FromRef<AppState>,
{
    get(get_by_id::<T>)
        .put(update::<T>)
        .patch(patch::<T>)
        .delete(delete::<T>)
}

pub async fn create<T: Entity>(
    State(svc): State<CrudService<T>>,
    _auth: AuthContext,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<ApiOk<T>>, ApiError> {
    let Json(mut record) = payload?;
    record.normalize();
    record.validate().map_err(ApiError::validation)?;

    let created = svc.create(record).await?;
    Ok(Json(ApiOk { data: created }))
}

pub async fn get_all<T: Entity>(
    State(svc): State<CrudService<T>>,
    _auth: AuthContext,
) -> Result<Json<ApiOk<Vec<T>>>, ApiError> {
    let rows = svc.get_all().await?;
    Ok(Json(ApiOk { data: rows }))
}

pub async fn get_by_id<T: Entity>(
    State(svc): State<CrudService<T>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiOk<T>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let row = svc.get_by_id(id).await?;
    Ok(Json(ApiOk { data: row }))
}

pub async fn update<T: Entity>(
    State(svc): State<CrudService<T>>,
    _auth: AuthContext,
    Path(raw_id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<ApiOk<T>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(mut record) = payload?;
    record.normalize();
    record.validate().map_err(ApiError::validation)?;

    let updated = svc.update(record, id).await?;
    Ok(Json(ApiOk { data: updated }))
}

pub async fn patch<T: Entity>(
    State(svc): State<CrudService<T>>,
    _auth: AuthContext,
    Path(raw_id): Path<String>,
    payload: Result<Json<T::Patch>, JsonRejection>,
) -> Result<Json<ApiOk<T>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload?;
    T::validate_patch(&patch).map_err(ApiError::validation)?;

    let patched = svc.patch(patch, id).await?;
    Ok(Json(ApiOk { data: patched }))
}

pub async fn delete<T: Entity>(
    State(svc): State<CrudService<T>>,
    _auth: AuthContext,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiOk<DeletedData>>, ApiError> {
    let id = parse_id(&raw_id)?;
    svc.delete(id).await?;

    Ok(Json(ApiOk {
        data: DeletedData {
            mensaje: format!("{} eliminado", T::NAME),
        },
    }))
}
