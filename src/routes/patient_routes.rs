// src/routes/patient_routes.rs

use axum::Router;

use super::crud_routes;
use crate::models::{AppState, Patient};

pub fn router() -> Router<AppState> {
    crud_routes::router::<Patient>("/paciente")
}
