use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Where repositories keep their records
#[derive(Clone, Debug)]
pub enum Storage {
    /// `TESTING` is set: process-local maps, nothing survives a restart
    InMemory,
    Mongo(MongoConfig),
}

/// Application configuration, built once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub storage: Storage,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let storage = if env_flag("TESTING") {
            Storage::InMemory
        } else {
            Storage::Mongo(MongoConfig::from_env()?)
        };

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage,
        })
    }
}
