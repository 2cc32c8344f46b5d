use crate::models::{BlogPost, SaveMeatRequest, SavedBlogRef, SavedMeatResult};
use crate::store::AppStore;
use crate::utils::AppError;
use chrono::Utc;

fn require_user_id(store: &AppStore) -> Result<String, AppError> {
    store
        .current_user()
        .map(|user| user.id.clone())
        .ok_or(AppError::Unauthenticated)
}

/// Bookmarks a freshness-check result for the current user.
pub async fn save_meat_result(
    store: &mut AppStore,
    request: &SaveMeatRequest,
) -> Result<SavedMeatResult, AppError> {
    let user_id = require_user_id(store)?;

    let record = SavedMeatResult {
        id: format!("saved-meat-{:03}", store.saved_items.next_meat_id),
        user_id,
        meat_type: request.meat_type.clone(),
        freshness_level: request.freshness_level.clone(),
        image_url: request.image_url.clone(),
        confidence: request.confidence,
        notes: request.notes.clone(),
        saved_at: Utc::now(),
    };

    store.saved_items.saved_meats.push(record.clone());
    store.saved_items.next_meat_id += 1;
    store.persist_saved_items().await?;

    log::info!("Saved meat result {} for {}", record.id, record.user_id);

    Ok(record)
}

/// Bookmarks a blog post for the current user. Each post can be saved once.
pub async fn save_blog(store: &mut AppStore, blog_id: &str) -> Result<SavedBlogRef, AppError> {
    let user_id = require_user_id(store)?;

    let already_saved = store
        .saved_items
        .saved_blogs
        .iter()
        .any(|item| item.user_id == user_id && item.blog_id == blog_id);
    if already_saved {
        return Err(AppError::AlreadySaved);
    }

    let record = SavedBlogRef {
        id: format!("saved-blog-{:03}", store.saved_items.next_blog_save_id),
        user_id,
        blog_id: blog_id.to_string(),
        saved_at: Utc::now(),
    };

    store.saved_items.saved_blogs.push(record.clone());
    store.saved_items.next_blog_save_id += 1;
    store.persist_saved_items().await?;

    Ok(record)
}

/// Removes the current user's bookmark of a post. Missing bookmark is a no-op.
pub async fn unsave_blog(store: &mut AppStore, blog_id: &str) -> Result<(), AppError> {
    let user_id = require_user_id(store)?;

    let position = store
        .saved_items
        .saved_blogs
        .iter()
        .position(|item| item.user_id == user_id && item.blog_id == blog_id);

    if let Some(index) = position {
        store.saved_items.saved_blogs.remove(index);
        store.persist_saved_items().await?;
    }

    Ok(())
}

/// Deletes a saved result, but only when it belongs to the current user.
/// Not-found (including someone else's record) is a silent no-op.
pub async fn delete_saved_meat(store: &mut AppStore, meat_id: &str) -> Result<(), AppError> {
    let user_id = require_user_id(store)?;

    let position = store
        .saved_items
        .saved_meats
        .iter()
        .position(|item| item.id == meat_id && item.user_id == user_id);

    if let Some(index) = position {
        store.saved_items.saved_meats.remove(index);
        store.persist_saved_items().await?;
    }

    Ok(())
}

pub fn is_blog_saved(store: &AppStore, blog_id: &str) -> bool {
    match store.current_user() {
        Some(user) => store
            .saved_items
            .saved_blogs
            .iter()
            .any(|item| item.user_id == user.id && item.blog_id == blog_id),
        None => false,
    }
}

/// Saved results for the given user, or the session user when not specified.
/// Empty when neither is available.
pub fn saved_meats<'a>(store: &'a AppStore, user_id: Option<&str>) -> Vec<&'a SavedMeatResult> {
    let target = match user_id.or_else(|| store.current_user().map(|user| user.id.as_str())) {
        Some(id) => id.to_string(),
        None => return Vec::new(),
    };

    store
        .saved_items
        .saved_meats
        .iter()
        .filter(|item| item.user_id == target)
        .collect()
}

/// Saved posts resolved against the blog archive; refs to posts that no
/// longer exist are skipped.
pub fn saved_blogs<'a>(store: &'a AppStore, user_id: Option<&str>) -> Vec<&'a BlogPost> {
    let target = match user_id.or_else(|| store.current_user().map(|user| user.id.as_str())) {
        Some(id) => id.to_string(),
        None => return Vec::new(),
    };

    let saved_ids: Vec<&str> = store
        .saved_items
        .saved_blogs
        .iter()
        .filter(|item| item.user_id == target)
        .map(|item| item.blog_id.as_str())
        .collect();

    store
        .blog_posts()
        .iter()
        .filter(|post| saved_ids.contains(&post.id.as_str()))
        .collect()
}
