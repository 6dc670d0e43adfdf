use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection, Cursor, Database, IndexModel};
use serde::de::DeserializeOwned;

use crate::models::{BookmarkRecord, InterviewRecord};
use crate::store::{BookmarkStore, InterviewStore, BOOKMARKS, INTERVIEWS};
use crate::utils::AppError;

const DEFAULT_DB_NAME: &str = "prep_well";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Database name comes from the URI path, e.g. mongodb://host:27017/prep_well
        let db_name = uri
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':') && !s.contains('@') && !s.contains('.'))
            .unwrap_or(DEFAULT_DB_NAME);

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Query-support indexes. (userId, interviewId) is deliberately not
    /// unique; one-bookmark-per-interview is checked by the service.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes: [(&str, Document, &str); 4] = [
            (INTERVIEWS, doc! { "createdBy": 1 }, "interviews(createdBy)"),
            (INTERVIEWS, doc! { "createdAt": -1 }, "interviews(createdAt desc)"),
            (BOOKMARKS, doc! { "userId": 1 }, "bookmarks(userId)"),
            (BOOKMARKS, doc! { "userId": 1, "interviewId": 1 }, "bookmarks(userId, interviewId)"),
        ];

        for (collection, keys, label) in indexes {
            let index = IndexModel::builder().keys(keys).build();
            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn health_check(&self) -> bool {
        self.db.list_collection_names().await.is_ok()
    }
}

/// Drains a cursor, skipping documents that fail to deserialize.
async fn drain<T>(mut cursor: Cursor<T>, collection: &str) -> Vec<T>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let mut items = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("⚠️ Skipping malformed document in {}: {}", collection, e),
        }
    }
    items
}

fn inserted_id(result: mongodb::results::InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("insert did not return an ObjectId".into()))
}

#[async_trait]
impl InterviewStore for MongoDB {
    async fn ping(&self) -> bool {
        self.health_check().await
    }

    async fn insert_interview(&self, record: &InterviewRecord) -> Result<ObjectId, AppError> {
        let result = self
            .collection::<InterviewRecord>(INTERVIEWS)
            .insert_one(record)
            .await?;
        inserted_id(result)
    }

    async fn find_all(&self) -> Result<Vec<InterviewRecord>, AppError> {
        let cursor = self
            .collection::<InterviewRecord>(INTERVIEWS)
            .find(doc! {})
            .await?;
        Ok(drain(cursor, INTERVIEWS).await)
    }

    async fn find_by_creator(&self, user_id: &str) -> Result<Vec<InterviewRecord>, AppError> {
        let cursor = self
            .collection::<InterviewRecord>(INTERVIEWS)
            .find(doc! { "createdBy": user_id })
            .await?;
        Ok(drain(cursor, INTERVIEWS).await)
    }

    async fn find_recent(&self, limit: Option<i64>) -> Result<Vec<InterviewRecord>, AppError> {
        let collection = self.collection::<InterviewRecord>(INTERVIEWS);
        let find = collection.find(doc! {}).sort(doc! { "createdAt": -1 });
        let cursor = match limit {
            Some(limit) => find.limit(limit).await?,
            None => find.await?,
        };
        Ok(drain(cursor, INTERVIEWS).await)
    }

    async fn find_interview(&self, id: &ObjectId) -> Result<Option<InterviewRecord>, AppError> {
        Ok(self
            .collection::<InterviewRecord>(INTERVIEWS)
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn delete_owned(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError> {
        let result = self
            .collection::<InterviewRecord>(INTERVIEWS)
            .delete_one(doc! { "_id": *id, "createdBy": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl BookmarkStore for MongoDB {
    async fn insert_bookmark(&self, bookmark: &BookmarkRecord) -> Result<ObjectId, AppError> {
        let result = self
            .collection::<BookmarkRecord>(BOOKMARKS)
            .insert_one(bookmark)
            .await?;
        inserted_id(result)
    }

    async fn delete_bookmark(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<BookmarkRecord>(BOOKMARKS)
            .delete_one(doc! { "_id": *id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkRecord>, AppError> {
        let cursor = self
            .collection::<BookmarkRecord>(BOOKMARKS)
            .find(doc! { "userId": user_id })
            .await?;
        Ok(drain(cursor, BOOKMARKS).await)
    }
}
