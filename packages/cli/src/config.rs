use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("MAX_IMPORT_ROWS must be greater than zero")]
    InvalidImportBudget,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: PathBuf,
    pub max_import_rows: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "4001".to_string());

        let port = port_str.parse::<u16>()?;

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/cropstat.db".to_string())
            .into();

        let max_import_rows = env::var("MAX_IMPORT_ROWS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<usize>()?;

        if max_import_rows == 0 {
            return Err(ConfigError::InvalidImportBudget);
        }

        Ok(Config {
            port,
            cors_origin,
            database_path,
            max_import_rows,
        })
    }
}
