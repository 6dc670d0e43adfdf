use mongodb::bson::oid::ObjectId;

use crate::models::{BookmarkRecord, CreateBookmarkRequest, CurrentUser};
use crate::store::BookmarkStore;
use crate::utils::AppError;

#[derive(Debug, Clone)]
pub enum BookmarkOutcome {
    Created(BookmarkRecord),
    /// The interview was already saved; nothing was written.
    Existing(BookmarkRecord),
}

impl BookmarkOutcome {
    pub fn bookmark(self) -> BookmarkRecord {
        match self {
            BookmarkOutcome::Created(b) | BookmarkOutcome::Existing(b) => b,
        }
    }

    pub fn created(&self) -> bool {
        matches!(self, BookmarkOutcome::Created(_))
    }
}

pub fn is_bookmarked(bookmarks: &[BookmarkRecord], interview_id: &str) -> bool {
    bookmarks.iter().any(|b| b.interview_id == interview_id)
}

/// The caller's bookmarks, most recently saved first.
pub async fn list_bookmarks(
    store: &dyn BookmarkStore,
    user: &CurrentUser,
) -> Result<Vec<BookmarkRecord>, AppError> {
    let mut bookmarks = store.find_bookmarks(&user.user_id).await?;
    bookmarks.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    Ok(bookmarks)
}

pub async fn add_bookmark(
    store: &dyn BookmarkStore,
    user: &CurrentUser,
    request: CreateBookmarkRequest,
    now: i64,
) -> Result<BookmarkOutcome, AppError> {
    if request.interview_id.trim().is_empty() {
        return Err(AppError::InvalidRequest("interviewId is required".into()));
    }

    let existing = store.find_bookmarks(&user.user_id).await?;
    if let Some(found) = existing.into_iter().find(|b| b.interview_id == request.interview_id) {
        log::info!("ℹ️ {} already bookmarked {}", user.user_id, request.interview_id);
        return Ok(BookmarkOutcome::Existing(found));
    }

    let mut bookmark = BookmarkRecord {
        id: None,
        interview_id: request.interview_id,
        company: request.company,
        role: request.role,
        title: request.title,
        description: request.description,
        tags: request.tags,
        user_id: user.user_id.clone(),
        saved_at: now,
    };
    let id = store.insert_bookmark(&bookmark).await?;
    bookmark.id = Some(id);
    log::info!("🔖 {} bookmarked {}", user.user_id, bookmark.interview_id);
    Ok(BookmarkOutcome::Created(bookmark))
}

/// Removes every bookmark the caller holds for `interview_id`. Returns false
/// when there was nothing to remove.
pub async fn remove_bookmark(
    store: &dyn BookmarkStore,
    user: &CurrentUser,
    interview_id: &str,
) -> Result<bool, AppError> {
    let ids: Vec<ObjectId> = store
        .find_bookmarks(&user.user_id)
        .await?
        .into_iter()
        .filter(|b| b.interview_id == interview_id)
        .filter_map(|b| b.id)
        .collect();

    let mut removed = false;
    for id in &ids {
        removed |= store.delete_bookmark(id).await?;
    }
    if removed {
        log::info!("🗑️ {} removed bookmark for {}", user.user_id, interview_id);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn user(uid: &str) -> CurrentUser {
        CurrentUser { user_id: uid.to_string(), email: None }
    }

    fn request(interview_id: &str) -> CreateBookmarkRequest {
        CreateBookmarkRequest {
            interview_id: interview_id.to_string(),
            company: "Google".into(),
            role: "SWE Intern".into(),
            title: "3-Round Interview Process".into(),
            description: String::new(),
            tags: vec!["Technical".into()],
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = MemoryStore::default();
        let first = add_bookmark(&store, &user("u1"), request("i1"), 10).await.unwrap();
        assert!(first.created());
        let second = add_bookmark(&store, &user("u1"), request("i1"), 20).await.unwrap();
        assert!(!second.created());
        assert_eq!(second.bookmark().saved_at, 10);
        assert_eq!(store.bookmark_count(), 1);

        // same interview, different user
        add_bookmark(&store, &user("u2"), request("i1"), 30).await.unwrap();
        assert_eq!(store.bookmark_count(), 2);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_remove() {
        let store = MemoryStore::default();
        add_bookmark(&store, &user("u1"), request("old"), 10).await.unwrap();
        add_bookmark(&store, &user("u1"), request("new"), 20).await.unwrap();

        let list = list_bookmarks(&store, &user("u1")).await.unwrap();
        assert_eq!(list[0].interview_id, "new");
        assert!(is_bookmarked(&list, "old"));

        assert!(remove_bookmark(&store, &user("u1"), "old").await.unwrap());
        assert!(!remove_bookmark(&store, &user("u1"), "old").await.unwrap());
        let list = list_bookmarks(&store, &user("u1")).await.unwrap();
        assert!(!is_bookmarked(&list, "old"));
    }

    #[tokio::test]
    async fn test_blank_interview_id_rejected() {
        let store = MemoryStore::default();
        let err = add_bookmark(&store, &user("u1"), request(" "), 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
