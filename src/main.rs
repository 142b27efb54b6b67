//!
//! HTTP backend for the AquaShine mobile detailing site.
//! Reads configuration from TOML file (~/.config/aquashine/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use aquashine_detailing::application::{
    BookingService, CleanupQueue, GalleryService, SubscriptionService, UploadCleanupWorker,
};
use aquashine_detailing::auth::{AdminCredentials, JwtConfig};
use aquashine_detailing::config::AppConfig;
use aquashine_detailing::domain::{default_home_content, default_plans, Storage};
use aquashine_detailing::infrastructure::database::migrator::Migrator;
use aquashine_detailing::infrastructure::{FsObjectStore, ObjectStore, ShutdownCoordinator};
use aquashine_detailing::{
    create_api_router, create_event_bus, default_config_path, init_database, DatabaseConfig,
    DatabaseStorage,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("AQUASHINE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting AquaShine Detailing backend...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_minutes: app_cfg.security.jwt_expiration_minutes,
        issuer: "aquashine-detailing".to_string(),
    };
    info!(
        "JWT configured with {}min token expiration",
        jwt_config.expiration_minutes
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let storage: Arc<dyn Storage> = Arc::new(DatabaseStorage::new(db.clone()));

    // Seed stock plans and starter home content on first start
    seed_initial_data(storage.as_ref()).await;

    // ── Admin credentials ──────────────────────────────────────
    if app_cfg.security.admin_password == "change-me" {
        warn!("⚠️  Admin password is the default! Set [security] admin_password in the config.");
    }
    let credentials = Arc::new(AdminCredentials::from_plain(
        &app_cfg.security.admin_password,
    )?);

    // ── Object store for gallery uploads ───────────────────────
    let object_store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new(
        &app_cfg.object_store.root_dir,
        &app_cfg.object_store.public_base_url,
    ));
    info!(
        "Gallery uploads stored in {} (served at {})",
        app_cfg.object_store.root_dir, app_cfg.object_store.public_base_url
    );

    // Initialize event bus for real-time notifications
    let event_bus = create_event_bus();
    info!("🔔 Event bus initialized for real-time notifications");

    // ── Application services ───────────────────────────────────
    let cleanup_queue = CleanupQueue::new();
    let booking_service = Arc::new(BookingService::new(storage.clone(), event_bus.clone()));
    let gallery_service = Arc::new(GalleryService::new(
        storage.clone(),
        object_store.clone(),
        cleanup_queue.clone(),
        event_bus.clone(),
    ));
    let subscription_service = Arc::new(SubscriptionService::new(
        storage.clone(),
        event_bus.clone(),
    ));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Start the orphaned-upload cleanup worker
    let cleanup_worker = UploadCleanupWorker::new(cleanup_queue, object_store)
        .with_config(app_cfg.cleanup.clone());
    cleanup_worker.start(shutdown_signal.clone());

    // Create REST API router
    let api_router = create_api_router(
        storage,
        booking_service,
        gallery_service,
        subscription_service,
        credentials,
        jwt_config,
        event_bus,
        prometheus_handle,
        &app_cfg.rate_limit,
        &app_cfg.object_store,
    );

    // Start the HTTP server with graceful shutdown
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);
    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let api_shutdown = shutdown_signal.clone();
    axum::serve(
        listener,
        api_router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 HTTP server received shutdown signal");
    })
    .await?;

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 AquaShine Detailing backend shutdown complete");
    Ok(())
}

/// Seed the stock wash-club plans and starter home content when the
/// database is empty. Errors are logged, not fatal; the admin can always
/// create plans and content by hand.
async fn seed_initial_data(storage: &dyn Storage) {
    match storage.list_plans(false).await {
        Ok(plans) if plans.is_empty() => {
            info!("Seeding stock subscription plans...");
            for plan in default_plans() {
                if let Err(e) = storage.save_plan(plan).await {
                    error!("Failed to seed plan: {}", e);
                }
            }
        }
        Ok(_) => {}
        Err(e) => error!("Failed to check existing plans: {}", e),
    }

    match storage.list_content().await {
        Ok(sections) if sections.is_empty() => {
            info!("Seeding starter home page content...");
            for section in default_home_content() {
                if let Err(e) = storage.upsert_content(section).await {
                    error!("Failed to seed content section: {}", e);
                }
            }
        }
        Ok(_) => {}
        Err(e) => error!("Failed to check existing content: {}", e),
    }
}
