//! Alexandria - Library Catalog Server
//!
//! A server-rendered web application for managing a small library catalog.

use axum::{
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alexandria_server::{
    config::AppConfig,
    repository::Repository,
    services::Services,
    views::PlainRenderer,
    web,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("alexandria_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Alexandria v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        renderer: Arc::new(PlainRenderer),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        // Home page
        .route("/", get(web::books::index))
        // Books
        .route("/books", get(web::books::list))
        .route(
            "/book/create",
            get(web::books::create_get).post(web::books::create_post),
        )
        .route("/book/:id", get(web::books::detail))
        .route(
            "/book/:id/update",
            get(web::books::update_get).post(web::books::update_post),
        )
        .route(
            "/book/:id/delete",
            get(web::books::delete_get).post(web::books::delete_post),
        )
        // Authors
        .route("/authors", get(web::authors::list))
        .route(
            "/author/create",
            get(web::authors::create_get).post(web::authors::create_post),
        )
        .route("/author/:id", get(web::authors::detail))
        .route(
            "/author/:id/update",
            get(web::authors::update_get).post(web::authors::update_post),
        )
        .route(
            "/author/:id/delete",
            get(web::authors::delete_get).post(web::authors::delete_post),
        )
        // Genres
        .route("/genres", get(web::genres::list))
        .route(
            "/genre/create",
            get(web::genres::create_get).post(web::genres::create_post),
        )
        .route("/genre/:id", get(web::genres::detail))
        .route(
            "/genre/:id/update",
            get(web::genres::update_get).post(web::genres::update_post),
        )
        .route(
            "/genre/:id/delete",
            get(web::genres::delete_get).post(web::genres::delete_post),
        )
        // Book copies
        .route("/bookinstances", get(web::book_instances::list))
        .route(
            "/bookinstance/create",
            get(web::book_instances::create_get).post(web::book_instances::create_post),
        )
        .route("/bookinstance/:id", get(web::book_instances::detail))
        .route(
            "/bookinstance/:id/update",
            get(web::book_instances::update_get).post(web::book_instances::update_post),
        )
        .route(
            "/bookinstance/:id/delete",
            get(web::book_instances::delete_get).post(web::book_instances::delete_post),
        );

    Router::new()
        .route("/", get(web::root_redirect))
        .route("/health", get(web::health::health_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
