use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo_types::User;
use crate::moods::repo_types::Mood;
use crate::quotes::repo_types::Quote;
use crate::tasks::repo_types::Task;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Everything the backend persists, as a single JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub moods: Vec<Mood>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("data file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Mutation = Box<dyn FnOnce(&mut Document) + Send>;

/// Document-level persistence. Typed CRUD lives in the per-resource
/// `repo` modules; this trait is only the read/rewrite seam, so the
/// same router code can run against the flat file or an in-memory map.
#[async_trait]
pub trait Store: Send + Sync {
    /// Full-document snapshot.
    async fn load(&self) -> Result<Document, StoreError>;

    /// Serialized read-modify-write. Implementations must hold their
    /// write lock across the whole cycle so mutations within this
    /// process never interleave. Cross-process writers are not
    /// coordinated; that would need a real database.
    async fn update(&self, mutate: Mutation) -> Result<Document, StoreError>;
}

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Millisecond timestamp plus a random base36 suffix. Practically
/// unique at single-file-store scale, not cryptographically unique.
pub fn generate_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{millis}{suffix}")
}
