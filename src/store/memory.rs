use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, Mutation, Store, StoreError};

/// In-memory store backing the router in tests. Same single-writer
/// contract as the file store, without the file.
#[derive(Default)]
pub struct MemoryStore {
    doc: RwLock<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<Document, StoreError> {
        Ok(self.doc.read().await.clone())
    }

    async fn update(&self, mutate: Mutation) -> Result<Document, StoreError> {
        let mut doc = self.doc.write().await;
        mutate(&mut doc);
        Ok(doc.clone())
    }
}
