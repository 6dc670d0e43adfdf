use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A saved interview (stored in the `bookmarks` collection). At most one per
/// (userId, interviewId); the service checks before inserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub interview_id: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: String,
    /// Unix seconds
    #[serde(default)]
    pub saved_at: i64,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkRequest {
    pub interview_id: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: String,
    pub interview_id: String,
    pub company: String,
    pub role: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub saved_at: i64,
}

impl From<BookmarkRecord> for BookmarkResponse {
    fn from(b: BookmarkRecord) -> Self {
        BookmarkResponse {
            id: b.id.map(|id| id.to_hex()).unwrap_or_default(),
            interview_id: b.interview_id,
            company: b.company,
            role: b.role,
            title: b.title,
            description: b.description,
            tags: b.tags,
            saved_at: b.saved_at,
        }
    }
}
