use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use mango_api::{build_router, AppState, RouterOptions};
use mango_core::services::MenuItemService;
use mango_infrastructure::{create_pool, run_migrations, FsAssetStore, PgMenuItemRepository};
use mango_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes the file log on exit
    let _log_guard = mango_shared::telemetry::init_telemetry(&config.logging)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
        config.database.acquire_timeout_seconds,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e
    })?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied.");
    }

    // Stores and service
    let repository = Arc::new(PgMenuItemRepository::new(pool));
    let assets = Arc::new(FsAssetStore::new(
        config.storage.content_root.clone(),
        config.storage.image_dir.clone(),
    ));
    info!("Storing images under {}", assets.image_root().display());

    let static_images = config
        .storage
        .serve_static
        .then(|| (assets.image_dir().to_string(), assets.image_root()));

    let service = Arc::new(MenuItemService::new(repository, assets));

    // Build router
    let app = build_router(
        AppState::new(service),
        RouterOptions {
            max_upload_bytes: usize::try_from(config.storage.max_upload_bytes)?,
            static_images,
        },
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
