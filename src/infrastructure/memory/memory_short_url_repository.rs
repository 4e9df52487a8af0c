//! In-memory short URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Short URL store kept in process memory.
///
/// Used with `STORAGE_BACKEND=memory` and by HTTP tests. Contents are lost
/// on restart.
#[derive(Default)]
pub struct MemoryShortUrlRepository {
    entries: RwLock<HashMap<String, ShortUrl>>,
}

impl MemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored short URLs.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn create(&self, short_url: &ShortUrl) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;

        match entries.entry(short_url.identifier.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Identifier already exists",
                json!({ "identifier": short_url.identifier }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(short_url.clone());
                Ok(())
            }
        }
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.entries.read().await.get(identifier).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
