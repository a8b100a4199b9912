//! RoomLedger Server - hotel reservation backoffice
//!
//! REST API server for hotels, room inventory and reservations.

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomledger_server::{
    api,
    config::{AppConfig, CorsConfig},
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("roomledger_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting RoomLedger Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool);

    if config.seed.enabled {
        let seeded = repository
            .seed_if_empty(config.seed.inventory_days)
            .await
            .context("Failed to seed demo data")?;
        if !seeded {
            tracing::info!("Database already populated, skipping seed");
        }
    }

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        services: Arc::new(Services::new(repository.clone())),
        repository,
        config: Arc::new(config),
    };

    // Build router
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS restricted to the dashboard origins; an empty list allows any origin
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Hotels
        .route("/hotels", get(api::hotels::list_hotels).post(api::hotels::create_hotel))
        .route("/hotels/paged", get(api::hotels::page_hotels))
        .route("/hotels/active", get(api::hotels::list_active_hotels))
        .route(
            "/hotels/:id",
            get(api::hotels::get_hotel)
                .put(api::hotels::update_hotel)
                .delete(api::hotels::delete_hotel),
        )
        // Room types
        .route(
            "/roomtypes",
            get(api::room_types::list_room_types).post(api::room_types::create_room_type),
        )
        .route("/roomtypes/assign-to-hotel", post(api::room_types::assign_room_types))
        .route("/roomtypes/hotel/:hotel_id", get(api::room_types::list_hotel_room_types))
        .route(
            "/roomtypes/:id",
            get(api::room_types::get_room_type)
                .put(api::room_types::update_room_type)
                .delete(api::room_types::delete_room_type),
        )
        // Inventory
        .route(
            "/inventory",
            get(api::inventory::list_inventory).post(api::inventory::create_inventory),
        )
        .route("/inventory/bulk", post(api::inventory::bulk_create_inventory))
        .route("/inventory/check-availability", post(api::inventory::check_availability))
        .route(
            "/inventory/hotel/:hotel_id/roomtype/:room_type_id",
            get(api::inventory::list_inventory_range),
        )
        .route(
            "/inventory/:id",
            get(api::inventory::get_inventory).put(api::inventory::update_inventory),
        )
        // Reservations
        .route(
            "/reservations",
            get(api::reservations::list_reservations).post(api::reservations::create_reservation),
        )
        .route("/reservations/hotel/:hotel_id", get(api::reservations::list_hotel_reservations))
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route("/reservations/:id/status", patch(api::reservations::update_reservation_status))
        .route("/reservations/:id/cancel", post(api::reservations::cancel_reservation))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
