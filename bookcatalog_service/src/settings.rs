use anyhow::Context;
use config::{Config, Environment};
use serde::Deserialize;

use crate::books_repository::MongoBooksRepositoryConfig;
use crate::server::ServerConfig;

const ENV_PREFIX: &str = "BOOKCATALOG";

/// Process settings, defaults overridden by `BOOKCATALOG_`-prefixed environment variables,
/// e.g. `BOOKCATALOG_PORT` sets `port`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub mongodb_url: String,
    pub database_name: String,
    pub use_in_memory_db: bool,
    pub enable_cors: bool,
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("_")
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(environment())
    }

    fn load_from(environment: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000_i64)?
            .set_default("mongodb_url", "mongodb://127.0.0.1:27017/bookstore")?
            .set_default("database_name", "bookstore")?
            .set_default("use_in_memory_db", false)?
            .set_default("enable_cors", true)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to deserialize settings")
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            enable_cors: self.enable_cors,
        }
    }

    pub fn mongo_config(&self) -> MongoBooksRepositoryConfig {
        MongoBooksRepositoryConfig {
            url: self.mongodb_url.clone(),
            database_name: self.database_name.clone(),
        }
    }
}
