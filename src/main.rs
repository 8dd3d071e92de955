use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pestcare::config::AppConfig;
use pestcare::db;
use pestcare::handlers;
use pestcare::services::auth::SessionStore;
use pestcare::services::availability::MockAvailabilityProvider;
use pestcare::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        availability: Box::new(MockAvailabilityProvider),
        sessions: SessionStore::new(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/chat",
            post(handlers::bookings::create_chat_booking),
        )
        .route(
            "/api/bookings/search",
            get(handlers::bookings::search_booking),
        )
        .route(
            "/api/availability/month/:month",
            get(handlers::availability::month_availability),
        )
        .route(
            "/api/availability/day/:date",
            get(handlers::availability::day_slots),
        )
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/api/admin/extend", post(handlers::admin::extend_session))
        .route("/api/admin/bookings", get(handlers::admin::list_bookings))
        .route(
            "/api/admin/bookings/:id",
            get(handlers::admin::get_booking),
        )
        .route(
            "/api/admin/bookings/:id/status",
            post(handlers::admin::update_status),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
