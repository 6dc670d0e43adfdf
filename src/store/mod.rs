//! Document store collaborators. `database::MongoDB` implements both traits
//! against the `interviews` and `bookmarks` collections.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{BookmarkRecord, InterviewRecord};
use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

pub const INTERVIEWS: &str = "interviews";
pub const BOOKMARKS: &str = "bookmarks";

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn insert_interview(&self, record: &InterviewRecord) -> Result<ObjectId, AppError>;
    async fn find_all(&self) -> Result<Vec<InterviewRecord>, AppError>;
    async fn find_by_creator(&self, user_id: &str) -> Result<Vec<InterviewRecord>, AppError>;
    /// Newest first by `createdAt`, at most `limit` documents when given.
    async fn find_recent(&self, limit: Option<i64>) -> Result<Vec<InterviewRecord>, AppError>;
    async fn find_interview(&self, id: &ObjectId) -> Result<Option<InterviewRecord>, AppError>;
    /// Deletes only when `createdBy` matches. Returns whether anything was removed.
    async fn delete_owned(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError>;

    async fn ping(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn insert_bookmark(&self, bookmark: &BookmarkRecord) -> Result<ObjectId, AppError>;
    async fn delete_bookmark(&self, id: &ObjectId) -> Result<bool, AppError>;
    async fn find_bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkRecord>, AppError>;
}

/// Both collaborators behind one handle, as handed to the HTTP layer.
pub trait Store: InterviewStore + BookmarkStore {
    fn interviews(&self) -> &dyn InterviewStore;
    fn bookmarks(&self) -> &dyn BookmarkStore;
}

impl<T: InterviewStore + BookmarkStore> Store for T {
    fn interviews(&self) -> &dyn InterviewStore {
        self
    }

    fn bookmarks(&self) -> &dyn BookmarkStore {
        self
    }
}
