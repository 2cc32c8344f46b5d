use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A meat-freshness check result bookmarked by a user.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedMeatResult {
    pub id: String, // "saved-meat-NNN"

    /// Owner of this record.
    pub user_id: String,

    pub meat_type: String,

    pub freshness_level: String,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub notes: String,

    pub saved_at: DateTime<Utc>,
}

/// A user's bookmark of a blog post. At most one per (user_id, blog_id).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedBlogRef {
    pub id: String, // "saved-blog-NNN"
    pub user_id: String,
    pub blog_id: String,
    pub saved_at: DateTime<Utc>,
}

/// Top-level saved-items document (`saved-items.json` / `savedItemsData` key).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedItemsDocument {
    pub saved_meats: Vec<SavedMeatResult>,
    pub saved_blogs: Vec<SavedBlogRef>,
    pub next_meat_id: u64,
    pub next_blog_save_id: u64,
}

impl Default for SavedItemsDocument {
    fn default() -> Self {
        Self {
            saved_meats: Vec::new(),
            saved_blogs: Vec::new(),
            next_meat_id: 1,
            next_blog_save_id: 1,
        }
    }
}

/// Request to save a freshness result for the current user.
#[derive(Debug, Deserialize)]
pub struct SaveMeatRequest {
    pub meat_type: String,
    pub freshness_level: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub notes: String,
}
