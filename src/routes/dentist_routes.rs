// src/routes/dentist_routes.rs

use axum::Router;

use super::crud_routes;
use crate::models::{AppState, Dentist};

pub fn router() -> Router<AppState> {
    crud_routes::router::<Dentist>("/dentista")
}
