//! Server configuration

use std::path::PathBuf;

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the document store file and logs
    pub work_dir: String,
    pub http_port: u16,
    pub environment: String,
    /// When set, logs additionally roll daily into this directory
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Path of the redb database file inside the work directory
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("comanda.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
