use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::Config;
use crate::error::CustomError;

pub struct Database;

impl Database {
    pub async fn new_pool(config: &Config) -> Result<PgPool, CustomError> {
        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password)
            .database(&config.db_name);

        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .min_connections(1)
            .idle_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(CustomError::DBError)
    }

    pub async fn ensure_schema(pool: &PgPool) -> Result<(), CustomError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_wallet (
                id SERIAL PRIMARY KEY,
                user_id INTEGER NOT NULL,
                user_name TEXT NOT NULL,
                wallet_name TEXT NOT NULL,
                wallet_type TEXT NOT NULL,
                balance DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(CustomError::DBError)?;
        Ok(())
    }
}
