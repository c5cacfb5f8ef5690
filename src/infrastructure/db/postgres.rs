use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use std::time::Duration;

use crate::settings::AppConfig;

/// How often and how patiently to retry the first connection. Postgres often
/// comes up after the service in container setups.
#[derive(Debug, Clone, Copy)]
pub struct ConnectRetry {
    pub attempts: u32,
    pub first_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        ConnectRetry {
            attempts: 5,
            first_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl ConnectRetry {
    /// Delay before retry number `attempt` (1-based), doubling up to `max_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.first_delay.saturating_mul(factor).min(self.max_delay)
    }
}

pub async fn create_pool(config: &AppConfig, retry: ConnectRetry) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5));

    let mut attempt = 0;
    loop {
        match options.clone().connect(&config.database_url).await {
            Ok(pool) => {
                info!(max_connections = config.database_max_connections, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < retry.attempts => {
                attempt += 1;
                let wait = retry.delay(attempt);
                warn!(
                    attempt,
                    max_attempts = retry.attempts,
                    wait_ms = wait.as_millis() as u64,
                    "Failed to connect to database: {}",
                    e
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
