use crate::store::AppStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period between keystrokes before a search actually runs.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    All,
    Blog,
    Dictionary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Blog,
    Dictionary,
}

/// One ranked hit, carrying enough fields to render a summary card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub relevance: u8,
}

/// What the caller should render: untouched page, an empty-results notice,
/// or the ranked list. An empty query never counts as "no results".
#[derive(Debug, Clone)]
pub enum SearchState {
    Initial,
    NoResults,
    Results(Vec<SearchResult>),
}

fn contains(haystack: &str, lower_query: &str) -> bool {
    haystack.to_lowercase().contains(lower_query)
}

/// Scans blogs and dictionary entries for the query and returns hits sorted
/// by relevance, highest first. Matching is case-insensitive substring
/// containment; ties keep encounter order (stable sort).
pub fn search(store: &AppStore, query: &str, filter: SearchFilter) -> Vec<SearchResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let lower_query = trimmed.to_lowercase();

    let mut results = Vec::new();

    if filter == SearchFilter::All || filter == SearchFilter::Blog {
        for post in store.blog_posts() {
            let title_match = contains(&post.title, &lower_query);
            let excerpt_match = contains(&post.excerpt, &lower_query);
            let content_match = contains(&post.content, &lower_query);
            let tags_match = post.tags.iter().any(|tag| contains(tag, &lower_query));

            if !(title_match || excerpt_match || content_match || tags_match) {
                continue;
            }

            let relevance = if title_match {
                10
            } else if excerpt_match {
                8
            } else if tags_match {
                6
            } else {
                3
            };

            results.push(SearchResult {
                kind: ResultKind::Blog,
                id: post.id.clone(),
                title: post.title.clone(),
                excerpt: post.excerpt.clone(),
                content: post.content.clone(),
                category: Some(post.category.clone()),
                meat_type: None,
                level: None,
                date: post.publish_date.clone(),
                relevance,
            });
        }
    }

    if filter == SearchFilter::All || filter == SearchFilter::Dictionary {
        for (meat_key, meat) in store.dictionary() {
            if contains(&meat.name, &lower_query) {
                results.push(SearchResult {
                    kind: ResultKind::Dictionary,
                    id: meat_key.clone(),
                    title: meat.name.clone(),
                    excerpt: meat.description.clone(),
                    content: meat.description.clone(),
                    category: None,
                    meat_type: Some(meat_key.clone()),
                    level: None,
                    date: None,
                    relevance: 9,
                });
            }

            // Each freshness level matches independently
            for (level_key, level) in &meat.levels {
                let name_match = contains(&level.name, &lower_query);
                let properties_match = contains(&level.properties, &lower_query);
                let signs_match = contains(&level.signs, &lower_query);
                let storage_match = contains(&level.storage, &lower_query);

                if !(name_match || properties_match || signs_match || storage_match) {
                    continue;
                }

                let relevance = if name_match {
                    8
                } else if properties_match {
                    6
                } else {
                    4
                };

                results.push(SearchResult {
                    kind: ResultKind::Dictionary,
                    id: format!("{}-{}", meat_key, level_key),
                    title: format!("{} - {}", meat.name, level.name),
                    excerpt: level.properties.clone(),
                    content: format!("{} {}", level.signs, level.storage),
                    category: None,
                    meat_type: Some(meat_key.clone()),
                    level: Some(level_key.clone()),
                    date: None,
                    relevance,
                });
            }
        }
    }

    results.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    results
}

/// Search plus the caller-facing state distinction between "not searched yet"
/// (empty query) and "searched, nothing found".
pub fn run_search(store: &AppStore, query: &str, filter: SearchFilter) -> SearchState {
    if query.trim().is_empty() {
        return SearchState::Initial;
    }
    let results = search(store, query, filter);
    if results.is_empty() {
        SearchState::NoResults
    } else {
        SearchState::Results(results)
    }
}

fn publish_date(result: &SearchResult) -> NaiveDate {
    result
        .date
        .as_deref()
        .and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
        })
        .unwrap_or(NaiveDate::MIN)
}

/// Re-sorts a result list in place. Entries without a parseable date count
/// as the oldest possible date.
pub fn sort_results(results: &mut [SearchResult], order: SortOrder) {
    match order {
        SortOrder::Relevance => results.sort_by(|a, b| b.relevance.cmp(&a.relevance)),
        SortOrder::Newest => results.sort_by(|a, b| publish_date(b).cmp(&publish_date(a))),
        SortOrder::Oldest => results.sort_by(|a, b| publish_date(a).cmp(&publish_date(b))),
    }
}

/// Collapses rapid successive searches into one: scheduling cancels whatever
/// was pending, so only the most recent task runs after the quiet period.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, FreshnessLevel, MeatType};
    use crate::storage::{AssetSource, MemoryStorage};
    use crate::utils::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NoAssets;

    #[async_trait]
    impl AssetSource for NoAssets {
        async fn load(&self, name: &str) -> Result<String, AppError> {
            Err(AppError::AssetLoad(format!("{}: unavailable", name)))
        }
    }

    fn post(id: &str, title: &str, excerpt: &str, content: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: content.to_string(),
            category: "Mẹo hay".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            publish_date: None,
        }
    }

    fn fixture_store() -> AppStore {
        let mut store = AppStore::new(Box::new(NoAssets), Box::new(MemoryStorage::new()));

        store.blogs.posts = vec![
            post(
                "blog-001",
                "Thịt tươi ngon",
                "Cách nhận biết",
                "Nội dung",
                &["mẹo"],
            ),
            post(
                "blog-002",
                "Bảo quản đúng cách",
                "Thịt tươi để được bao lâu",
                "Nội dung",
                &[],
            ),
            post("blog-003", "Công thức kho tàu", "Món ngon", "Chọn thịt tươi", &[]),
            post("blog-004", "Đi chợ sớm", "Mẹo hay", "Nội dung", &["thịt tươi"]),
        ];

        let mut levels = std::collections::BTreeMap::new();
        levels.insert(
            "fresh".to_string(),
            FreshnessLevel {
                name: "Còn tươi".to_string(),
                properties: "Màu hồng nhạt, đàn hồi".to_string(),
                signs: "Không có mùi lạ".to_string(),
                storage: "Ngăn mát 0-4°C".to_string(),
            },
        );
        store.dictionary.insert(
            "pork".to_string(),
            MeatType {
                name: "Thịt tươi".to_string(),
                description: "Thịt heo mới mổ".to_string(),
                levels,
            },
        );

        store
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let store = fixture_store();
        assert!(search(&store, "", SearchFilter::All).is_empty());
        assert!(search(&store, "   ", SearchFilter::Blog).is_empty());
        assert!(search(&store, "", SearchFilter::Dictionary).is_empty());
        assert!(matches!(
            run_search(&store, "  ", SearchFilter::All),
            SearchState::Initial
        ));
    }

    #[test]
    fn test_no_matches_is_distinct_from_initial() {
        let store = fixture_store();
        assert!(matches!(
            run_search(&store, "zzzz", SearchFilter::All),
            SearchState::NoResults
        ));
        assert!(matches!(
            run_search(&store, "tươi", SearchFilter::All),
            SearchState::Results(_)
        ));
    }

    #[test]
    fn test_blog_title_outranks_dictionary_name() {
        let store = fixture_store();
        let results = search(&store, "tươi", SearchFilter::All);

        // title (10) first, then the dictionary name match (9)
        assert_eq!(results[0].id, "blog-001");
        assert_eq!(results[0].relevance, 10);
        assert_eq!(results[1].id, "pork");
        assert_eq!(results[1].kind, ResultKind::Dictionary);
        assert_eq!(results[1].relevance, 9);
    }

    #[test]
    fn test_blog_relevance_tiers() {
        let store = fixture_store();
        let results = search(&store, "tươi", SearchFilter::Blog);

        let by_id = |id: &str| results.iter().find(|r| r.id == id).unwrap().relevance;
        assert_eq!(by_id("blog-001"), 10); // title
        assert_eq!(by_id("blog-002"), 8); // excerpt
        assert_eq!(by_id("blog-004"), 6); // tag
        assert_eq!(by_id("blog-003"), 3); // content only
        assert!(results.iter().all(|r| r.kind == ResultKind::Blog));
    }

    #[test]
    fn test_dictionary_level_relevance_tiers() {
        let store = fixture_store();

        let results = search(&store, "còn tươi", SearchFilter::Dictionary);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "pork-fresh");
        assert_eq!(results[0].title, "Thịt tươi - Còn tươi");
        assert_eq!(results[0].relevance, 8); // level name

        let results = search(&store, "đàn hồi", SearchFilter::Dictionary);
        assert_eq!(results[0].relevance, 6); // properties

        let results = search(&store, "ngăn mát", SearchFilter::Dictionary);
        assert_eq!(results[0].relevance, 4); // storage

        let results = search(&store, "mùi lạ", SearchFilter::Dictionary);
        assert_eq!(results[0].relevance, 4); // signs
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let mut store = fixture_store();
        store.blogs.posts = vec![
            post("blog-a", "Thịt bò tươi", "", "", &[]),
            post("blog-b", "Thịt gà tươi", "", "", &[]),
        ];

        let results = search(&store, "tươi", SearchFilter::Blog);
        assert_eq!(results[0].id, "blog-a");
        assert_eq!(results[1].id, "blog-b");
    }

    #[test]
    fn test_sort_newest_puts_dateless_last() {
        let mut results = vec![
            SearchResult {
                kind: ResultKind::Dictionary,
                id: "pork".to_string(),
                title: String::new(),
                excerpt: String::new(),
                content: String::new(),
                category: None,
                meat_type: None,
                level: None,
                date: None,
                relevance: 9,
            },
            SearchResult {
                kind: ResultKind::Blog,
                id: "old".to_string(),
                title: String::new(),
                excerpt: String::new(),
                content: String::new(),
                category: None,
                meat_type: None,
                level: None,
                date: Some("2024-03-01".to_string()),
                relevance: 3,
            },
            SearchResult {
                kind: ResultKind::Blog,
                id: "new".to_string(),
                title: String::new(),
                excerpt: String::new(),
                content: String::new(),
                category: None,
                meat_type: None,
                level: None,
                date: Some("2025-01-15".to_string()),
                relevance: 3,
            },
        ];

        sort_results(&mut results, SortOrder::Newest);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "pork"]);

        sort_results(&mut results, SortOrder::Oldest);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["pork", "old", "new"]);

        sort_results(&mut results, SortOrder::Relevance);
        assert_eq!(results[0].id, "pork");
    }

    #[tokio::test]
    async fn test_debouncer_drops_superseded_searches() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::with_delay(Duration::from_millis(20));

        for _ in 0..3 {
            let counter = counter.clone();
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_debouncer_cancel() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::with_delay(Duration::from_millis(20));

        let inner = counter.clone();
        debouncer.schedule(async move {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
