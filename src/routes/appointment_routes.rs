// src/routes/appointment_routes.rs

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use super::crud_routes;
use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{ApiOk, AppState, Appointment, AppointmentDetail, AppointmentDraft, CreatedAppointment},
    service::AppointmentService,
};

/*
Appointments are only created through the natural keys (patient DNI and
dentist license), so the generic POST is not mounted here.
*/

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/turno",
            get(crud_routes::get_all::<Appointment>).post(create_by_national_id_and_license),
        )
        .route("/turno/getByDni", get(get_detail_by_national_id))
        .route("/turno/{id}", crud_routes::item_routes::<Appointment>())
}

/* ============================================================
   Query params
   ============================================================ */

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(rename = "dniPaciente")]
    pub national_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    #[serde(rename = "dniPaciente")]
    pub national_id: Option<String>,
    #[serde(rename = "matriculaDentista")]
    pub license: Option<String>,
}

fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ApiError::BadRequest(
            "BAD_REQUEST",
            format!("query parameter {name} is required"),
        )),
    }
}

/* ============================================================
   GET /turno/getByDni?dniPaciente=
   ============================================================ */

pub async fn get_detail_by_national_id(
    State(svc): State<AppointmentService>,
    _auth: AuthContext,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> Result<Json<ApiOk<AppointmentDetail>>, ApiError> {
    let Query(q) = query?;
    let national_id = required_param(q.national_id, "dniPaciente")?;

    let detail = svc.detail_by_national_id(&national_id).await?;
    Ok(Json(ApiOk { data: detail }))
}

/* ============================================================
   POST /turno?dniPaciente=&matriculaDentista=
   ============================================================ */

pub async fn create_by_national_id_and_license(
    State(svc): State<AppointmentService>,
    _auth: AuthContext,
    query: Result<Query<CreateQuery>, QueryRejection>,
    payload: Result<Json<AppointmentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiOk<CreatedAppointment>>), ApiError> {
    let Json(draft) = payload?;
    let Query(q) = query?;
    let national_id = required_param(q.national_id, "dniPaciente")?;
    let license = required_param(q.license, "matriculaDentista")?;

    let appointment_id = svc
        .create_by_national_id_and_license(draft, &national_id, &license)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiOk {
            data: CreatedAppointment { appointment_id },
        }),
    ))
}
