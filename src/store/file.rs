use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{Document, Mutation, Store, StoreError};

/// Flat-file store: the whole document is read and rewritten on every
/// mutation. A missing file is an explicit cold start and yields the
/// default document; an unparseable file is surfaced as corruption
/// rather than silently replaced.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> Result<Document, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "data file absent, starting from empty store");
                return Ok(Document::default());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let doc = serde_json::from_slice(&bytes)?;
        Ok(doc)
    }

    async fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "data file rewritten");
        Ok(())
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> Result<Document, StoreError> {
        self.read_document().await
    }

    async fn update(&self, mutate: Mutation) -> Result<Document, StoreError> {
        // Lock held across read, mutate and write: last write wins
        // between requests, but no two writes interleave in-process.
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        mutate(&mut doc);
        self.write_document(&doc).await?;
        Ok(doc)
    }
}
