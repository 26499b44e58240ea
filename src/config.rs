use std::env;

use dotenvy::dotenv;

use crate::error::CustomError;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:1323";

#[derive(Clone, Debug)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        dotenv().ok(); // Load environment variables

        Ok(Config {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string()),
            db_port: parsed_or("DB_PORT", DEFAULT_DB_PORT)?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            server_addr: env::var("SERVER_ADDR")
                .unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string()),
        })
    }
}

fn required(key: &str) -> Result<String, CustomError> {
    env::var(key).map_err(|e| CustomError::EnvError(key.to_string(), e))
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, CustomError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| CustomError::InvalidEnv(key.to_string(), value)),
        Err(_) => Ok(default),
    }
}
