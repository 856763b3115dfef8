mod auth;
mod config;
mod middleware;

mod db;
mod error;
mod models;
mod routes;
mod service;
mod store;

use std::sync::Arc;

use crate::{
    config::Config,
    models::{AppState, Appointment, Dentist, Patient},
    store::PgStore,
};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let pool = db::connect_pg(&cfg.database_url, cfg.db_max_connections).await?;
    db::migrate(&pool).await?;

    let state = AppState::new(
        Arc::new(PgStore::<Dentist>::new(pool.clone())),
        Arc::new(PgStore::<Patient>::new(pool.clone())),
        Arc::new(PgStore::<Appointment>::new(pool)),
        &cfg.api_token,
    );

    // Browser clients send the bearer token, so preflight must allow it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
