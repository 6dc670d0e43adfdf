//! In-memory store for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{BookmarkStore, InterviewStore};
use crate::models::{BookmarkRecord, InterviewRecord};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    interviews: Mutex<Vec<InterviewRecord>>,
    bookmarks: Mutex<Vec<BookmarkRecord>>,
    pub fail_reads: bool,
}

impl MemoryStore {
    pub fn with_interviews(records: Vec<InterviewRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut r| {
                r.id.get_or_insert_with(ObjectId::new);
                r
            })
            .collect();
        Self {
            interviews: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self { fail_reads: true, ..Default::default() }
    }

    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail_reads {
            return Err(AppError::DatabaseError("store unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn insert_interview(&self, record: &InterviewRecord) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = record.clone();
        stored.id = Some(id);
        self.interviews.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<InterviewRecord>, AppError> {
        self.check()?;
        Ok(self.interviews.lock().unwrap().clone())
    }

    async fn find_by_creator(&self, user_id: &str) -> Result<Vec<InterviewRecord>, AppError> {
        self.check()?;
        Ok(self
            .interviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.created_by.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn find_recent(&self, limit: Option<i64>) -> Result<Vec<InterviewRecord>, AppError> {
        self.check()?;
        let mut all = self.interviews.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            all.truncate(limit.max(0) as usize);
        }
        Ok(all)
    }

    async fn find_interview(&self, id: &ObjectId) -> Result<Option<InterviewRecord>, AppError> {
        self.check()?;
        Ok(self
            .interviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_ref() == Some(id))
            .cloned())
    }

    async fn delete_owned(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError> {
        let mut all = self.interviews.lock().unwrap();
        let before = all.len();
        all.retain(|r| !(r.id.as_ref() == Some(id) && r.created_by.as_deref() == Some(user_id)));
        Ok(all.len() < before)
    }

    async fn ping(&self) -> bool {
        !self.fail_reads
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn insert_bookmark(&self, bookmark: &BookmarkRecord) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = bookmark.clone();
        stored.id = Some(id);
        self.bookmarks.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn delete_bookmark(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut all = self.bookmarks.lock().unwrap();
        let before = all.len();
        all.retain(|b| b.id.as_ref() != Some(id));
        Ok(all.len() < before)
    }

    async fn find_bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkRecord>, AppError> {
        self.check()?;
        Ok(self
            .bookmarks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}
