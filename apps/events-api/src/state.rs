//! Shared application state.

use axum_helpers::JwtAuth;
use database::mongodb::connect_from_config;
use domain_events::MongoEventRepository;
use domain_users::MongoUserRepository;
use mongodb::{Client, Database};
use tracing::info;

use crate::config::{Config, Storage};

/// Storage handles opened at startup
#[derive(Clone)]
pub enum Backend {
    InMemory,
    Mongo { client: Client, db: Database },
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jwt: JwtAuth,
    pub backend: Backend,
}

impl AppState {
    /// Open storage and, for MongoDB, make sure the indexes exist.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let backend = match &config.storage {
            Storage::InMemory => {
                info!("TESTING is set, using in-memory repositories");
                Backend::InMemory
            }
            Storage::Mongo(mongo) => {
                let client = connect_from_config(mongo).await?;
                let db = client.database(mongo.database());

                MongoEventRepository::new(&db).create_indexes().await?;
                MongoUserRepository::new(&db).create_indexes().await?;

                info!(database = mongo.database(), "MongoDB ready");
                Backend::Mongo { client, db }
            }
        };

        Ok(Self {
            jwt: JwtAuth::new(&config.jwt),
            config,
            backend,
        })
    }

    pub fn mongo_client(&self) -> Option<&Client> {
        match &self.backend {
            Backend::Mongo { client, .. } => Some(client),
            Backend::InMemory => None,
        }
    }
}
