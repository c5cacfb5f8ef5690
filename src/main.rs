use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use profile_service::{
    db::postgres::{create_pool, run_migrations, ConnectRetry},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    repositories::{memory::MemoryProfileRepo, profile::ProfileRepository, sqlx_repo::SqlxProfileRepo},
    routes::configure_routes,
    settings::{AppConfig, StorageBackend},
    AppState,
};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_profile_repo(config: &AppConfig) -> anyhow::Result<Arc<dyn ProfileRepository>> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(config, ConnectRetry::default())
                .await
                .context("Failed to create database connection pool")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            Ok(Arc::new(SqlxProfileRepo::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory profile storage; data is lost on restart");
            Ok(Arc::new(MemoryProfileRepo::new()))
        }
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let profile_repo = build_profile_repo(&config).await?;

    let app_state = web::Data::new(
        AppState::new(&config, profile_repo).context("Failed to build application state")?
    );

    let server_addr = format!("{}:{}", config.host, config.port);
    let cors_origins = config.cors_origins();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    tokio::select! {
        res = server => res.context("Server error")?,
        _ = shutdown_signal() => {},
    }

    Ok(())
}
