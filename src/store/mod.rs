use crate::models::{
    BlogArchive, BlogPost, Dictionary, MeatType, SavedItemsDocument, SessionUser, UsersDocument,
};
use crate::storage::{
    AssetSource, KeyValueStorage, BLOGS_ASSET, CURRENT_USER_KEY, DICTIONARY_ASSET,
    SAVED_ITEMS_ASSET, SAVED_ITEMS_DATA_KEY, USERS_ASSET, USERS_DATA_KEY,
};
use crate::utils::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Single source of truth for all persisted documents and the session user.
///
/// Documents are loaded once from the asset source, overlaid with any
/// persisted snapshots, and mutated in memory; every mutation writes the
/// affected document back in full before returning.
pub struct AppStore {
    assets: Box<dyn AssetSource>,
    storage: Box<dyn KeyValueStorage>,

    pub(crate) dictionary: Dictionary,
    pub(crate) blogs: BlogArchive,
    pub(crate) users: UsersDocument,
    pub(crate) saved_items: SavedItemsDocument,
    pub(crate) current_user: Option<SessionUser>,

    initialized: bool,
}

impl AppStore {
    pub fn new(assets: Box<dyn AssetSource>, storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            assets,
            storage,
            dictionary: Dictionary::default(),
            blogs: BlogArchive::default(),
            users: UsersDocument::default(),
            saved_items: SavedItemsDocument::default(),
            current_user: None,
            initialized: false,
        }
    }

    /// Loads the four documents concurrently, then overlays persisted
    /// snapshots and the session user. Individual failures are logged and
    /// replaced with well-shaped defaults; this never aborts. Calling it
    /// again once initialized is a no-op.
    pub async fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        let (dictionary, blogs, users, saved_items) = futures::join!(
            self.load_asset::<Dictionary>(DICTIONARY_ASSET),
            self.load_asset::<BlogArchive>(BLOGS_ASSET),
            self.load_asset::<UsersDocument>(USERS_ASSET),
            self.load_asset::<SavedItemsDocument>(SAVED_ITEMS_ASSET),
        );
        self.dictionary = dictionary;
        self.blogs = blogs;
        self.users = users;
        self.saved_items = saved_items;

        // Persisted snapshots win over shipped assets
        let users_snapshot = self.restore_snapshot::<UsersDocument>(USERS_DATA_KEY).await;
        if let Some(users) = users_snapshot {
            self.users = users;
        }
        let saved_snapshot = self
            .restore_snapshot::<SavedItemsDocument>(SAVED_ITEMS_DATA_KEY)
            .await;
        if let Some(saved) = saved_snapshot {
            self.saved_items = saved;
        }

        self.current_user = self.restore_snapshot::<SessionUser>(CURRENT_USER_KEY).await;

        self.initialized = true;
        log::info!(
            "Store initialized: {} meat types, {} posts, {} users",
            self.dictionary.len(),
            self.blogs.posts.len(),
            self.users.users.len()
        );
    }

    async fn load_asset<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let parsed = match self.assets.load(name).await {
            Ok(raw) => serde_json::from_str::<T>(&raw)
                .map_err(|e| AppError::MalformedState(format!("{}: {}", name, e))),
            Err(e) => Err(e),
        };
        match parsed {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("Failed to load {}: {}", name, e);
                T::default()
            }
        }
    }

    async fn restore_snapshot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.storage.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    // Discard the snapshot and continue with defaults
                    log::error!("Failed to parse {} snapshot: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read {} snapshot: {}", key, e);
                None
            }
        }
    }

    // ==================== READ ACCESSORS ====================

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn meat_types(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn meat_type(&self, key: &str) -> Option<&MeatType> {
        self.dictionary.get(key)
    }

    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.blogs.posts
    }

    pub fn blog_post(&self, id: &str) -> Option<&BlogPost> {
        self.blogs.posts.iter().find(|post| post.id == id)
    }

    pub fn blog_categories(&self) -> &[String] {
        &self.blogs.categories
    }

    pub fn popular_tags(&self) -> &[String] {
        &self.blogs.popular_tags
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Blog-page filter: substring match over title/excerpt/content/tags plus
    /// an optional exact category ("Tất cả" selects all categories).
    pub fn search_blogs(&self, query: &str, category: &str) -> Vec<&BlogPost> {
        let lower_query = query.to_lowercase();

        self.blogs
            .posts
            .iter()
            .filter(|post| {
                let matches_query = query.is_empty()
                    || post.title.to_lowercase().contains(&lower_query)
                    || post.excerpt.to_lowercase().contains(&lower_query)
                    || post.content.to_lowercase().contains(&lower_query)
                    || post
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&lower_query));

                let matches_category =
                    category.is_empty() || category == "Tất cả" || post.category == category;

                matches_query && matches_category
            })
            .collect()
    }

    // ==================== PERSISTENCE ====================

    pub(crate) async fn persist_users(&self) -> Result<(), AppError> {
        self.persist_document(USERS_DATA_KEY, &self.users).await
    }

    pub(crate) async fn persist_saved_items(&self) -> Result<(), AppError> {
        self.persist_document(SAVED_ITEMS_DATA_KEY, &self.saved_items)
            .await
    }

    pub(crate) async fn persist_session(&self) -> Result<(), AppError> {
        match &self.current_user {
            Some(user) => self.persist_document(CURRENT_USER_KEY, user).await,
            None => self.storage.remove(CURRENT_USER_KEY).await,
        }
    }

    async fn persist_document<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(doc)
            .map_err(|e| AppError::Persistence(format!("serialize {}: {}", key, e)))?;
        self.storage.set(key, &raw).await
    }
}
