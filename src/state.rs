use std::sync::Arc;

use crate::config::{AppConfig, JwtConfig};
use crate::store::{JsonFileStore, MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(JsonFileStore::new(&config.data_file)) as Arc<dyn Store>;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State over an in-memory store, for tests.
    pub fn in_memory() -> Self {
        let config = Arc::new(AppConfig {
            data_file: "unused".into(),
            environment: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_days: 7,
            },
        });
        Self {
            store: Arc::new(MemoryStore::new()),
            config,
        }
    }
}
