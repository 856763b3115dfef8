use crate::models::AppState;
use axum::Router;

pub mod appointment_routes;
pub mod crud_routes;
pub mod dentist_routes;
pub mod patient_routes;
pub mod ping_routes;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(dentist_routes::router())
        .merge(patient_routes::router())
        .merge(appointment_routes::router())
        .merge(ping_routes::router());

    Router::new().nest("/api/v1", api).with_state(state)
}
