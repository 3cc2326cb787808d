use service_core::config::{self as core_config, get_env, Environment};
use service_core::error::AppError;
use std::env;

pub const SERVICE_NAME: &str = "blog-service";

#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl BlogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let environment = Environment::from_env();

        Ok(BlogConfig {
            common: common_config,
            environment,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), environment)?,
                database: get_env("MONGODB_DATABASE", Some("blog_db"), environment)?,
            },
            store: StoreConfig {
                backend: get_env("STORE_BACKEND", Some("mongodb"), environment)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
            log_level: get_env("LOG_LEVEL", Some("info"), environment)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
