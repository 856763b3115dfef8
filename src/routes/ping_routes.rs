use axum::{Router, routing::get};

use crate::models::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

pub async fn ping() -> &'static str {
    "pong"
}
