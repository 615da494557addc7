//! # Server Module
//!
//! HTTP server setup and route configuration for the diet server.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::config::CONFIG;
use crate::database::{
    DatabaseConfig, DatabaseConnection, MealStore, MemoryStore, migrations,
};
use crate::routes::health::ping;
use crate::routes::{meals, users};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MealStore>,
}

/// Assemble the full application router over the given state.
///
/// Kept separate from [`start`] so the test suites can drive the router
/// directly against an in-memory store.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            CONFIG
                .server
                .cors_origin
                .parse::<HeaderValue>()
                .expect("invalid CORS_ORIGIN"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::ORIGIN,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true); // session cookie must survive CORS

    Router::new()
        .route("/ping", get(ping)) // Health check endpoint
        .merge(users::create_user_routes())
        .merge(meals::create_meal_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Pick the record store from configuration.
///
/// With DATABASE_URL set this connects to PostgreSQL and runs migrations;
/// without it the server falls back to the in-memory store, which is handy
/// for local development but loses everything on restart.
async fn init_store() -> Arc<dyn MealStore> {
    match &CONFIG.database_url {
        Some(url) => {
            let config = DatabaseConfig::from_url(url).expect("Failed to parse DATABASE_URL");
            let db = DatabaseConnection::new(config)
                .await
                .expect("Failed to connect to DB");
            migrations::run_migrations(db.pool())
                .await
                .expect("Failed to run database migrations");
            Arc::new(db)
        }
        None => {
            tracing::warn!("⚠️  DATABASE_URL not set - using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Starts the diet HTTP server.
///
/// Binds to the configured address and serves the application using the Axum
/// web framework with the Tokio runtime.
pub async fn start() {
    // Load .env before the lazy CONFIG is first touched
    dotenv::dotenv().ok();

    let store = init_store().await;
    let app = build_router(AppState { store });

    let addr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port);
    let listener = TcpListener::bind(&addr).await.expect(
        "Failed to bind to address - port may already be in use",
    );

    tracing::info!("🚀 Diet Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/ping", addr);
    tracing::info!("🍽️  Meal endpoints available at http://{}/meals", addr);

    // Start serving the application
    axum::serve(listener, app).await.unwrap();
}
