use crate::utils::AppError;
use async_trait::async_trait;
use std::path::PathBuf;

// Shipped asset documents read once at startup.
pub const DICTIONARY_ASSET: &str = "dictionary.json";
pub const BLOGS_ASSET: &str = "blogs.json";
pub const USERS_ASSET: &str = "users.json";
pub const SAVED_ITEMS_ASSET: &str = "saved-items.json";

/// Source of the static JSON documents the store is seeded from.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<String, AppError>;
}

/// Reads assets from a local data directory.
pub struct FileAssetSource {
    dir: PathBuf,
}

impl FileAssetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AssetSource for FileAssetSource {
    async fn load(&self, name: &str) -> Result<String, AppError> {
        tokio::fs::read_to_string(self.dir.join(name))
            .await
            .map_err(|e| AppError::AssetLoad(format!("{}: {}", name, e)))
    }
}
