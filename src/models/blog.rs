use serde::{Deserialize, Serialize};

/// Blog post from the shipped archive. Read-only to this crate.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,

    pub title: String,

    pub excerpt: String,

    pub content: String,

    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// ISO date string ("2025-01-15"); older posts may not carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

/// Top-level blog archive document (`blogs.json`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogArchive {
    #[serde(default)]
    pub posts: Vec<BlogPost>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub popular_tags: Vec<String>,
}
