use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::config::Config;

fn connect_options(config: &Config) -> Result<PgConnectOptions, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?;
    // Managed databases in production present certificates we don't pin;
    // encrypt the link but skip verification there.
    if config.environment.is_production() {
        Ok(options.ssl_mode(PgSslMode::Require))
    } else {
        Ok(options)
    }
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Connects eagerly so a bad `DATABASE_URL` fails at startup.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    pool_options(config)
        .connect_with(connect_options(config)?)
        .await
}

/// Builds the pool without opening a connection. Queries fail individually
/// while the database is unreachable.
pub fn connect_lazy(config: &Config) -> Result<PgPool, sqlx::Error> {
    Ok(pool_options(config).connect_lazy_with(connect_options(config)?))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
