use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Catalog;

/// A user's named, ordered collection of catalog books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub book_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReadingList {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub book_ids: Vec<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub book_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadingListError {
    #[error("Name is required")]
    BlankName,

    #[error("User id is required")]
    BlankUserId,

    #[error("Unknown book id: {0}")]
    UnknownBook(String),
}

impl ReadingList {
    pub fn create(
        new: NewReadingList,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Self, ReadingListError> {
        if new.user_id.trim().is_empty() {
            return Err(ReadingListError::BlankUserId);
        }
        let name = validate_name(&new.name)?;
        let book_ids = validate_book_ids(new.book_ids, catalog)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            name,
            description: new.description,
            book_ids,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `update` in place. Nothing changes when validation fails.
    pub fn apply(
        &mut self,
        update: ReadingListUpdate,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<(), ReadingListError> {
        let name = update.name.as_deref().map(validate_name).transpose()?;
        let book_ids = update
            .book_ids
            .map(|ids| validate_book_ids(ids, catalog))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(book_ids) = book_ids {
            self.book_ids = book_ids;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, ReadingListError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ReadingListError::BlankName);
    }
    Ok(name.to_string())
}

/// Unknown ids are rejected; repeats keep their first position.
fn validate_book_ids(
    book_ids: Vec<String>,
    catalog: &Catalog,
) -> Result<Vec<String>, ReadingListError> {
    let mut unique: Vec<String> = Vec::with_capacity(book_ids.len());
    for id in book_ids {
        if !catalog.contains(&id) {
            return Err(ReadingListError::UnknownBook(id));
        }
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

/// Trait for storing and retrieving reading lists
#[async_trait]
pub trait ReadingListStorage: Send + Sync {
    /// Lists ordered by creation time, optionally for one user only
    async fn list(&self, user_id: Option<&str>) -> Vec<ReadingList>;
    async fn get(&self, id: &str) -> Option<ReadingList>;
    async fn save(&self, list: ReadingList);
    /// Apply `update` to the stored list in one step. `None` when no list
    /// has `id`, so a concurrent delete is never undone.
    async fn update(
        &self,
        id: &str,
        update: ReadingListUpdate,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Option<Result<ReadingList, ReadingListError>>;
    /// Returns whether a list was removed
    async fn delete(&self, id: &str) -> bool;
}

/// In-memory implementation of ReadingListStorage
#[derive(Default)]
pub struct InMemoryReadingListStorage {
    lists: Arc<DashMap<String, ReadingList>>,
}

impl InMemoryReadingListStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with the demo lists the client ships with
    pub fn seeded() -> Self {
        let storage = Self::new();
        for list in seed_lists() {
            storage.lists.insert(list.id.clone(), list);
        }
        storage
    }
}

#[async_trait]
impl ReadingListStorage for InMemoryReadingListStorage {
    async fn list(&self, user_id: Option<&str>) -> Vec<ReadingList> {
        let mut lists: Vec<ReadingList> = self
            .lists
            .iter()
            .filter(|entry| user_id.is_none_or(|user| entry.user_id == user))
            .map(|entry| entry.value().clone())
            .collect();
        lists.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        lists
    }

    async fn get(&self, id: &str) -> Option<ReadingList> {
        self.lists.get(id).map(|entry| entry.clone())
    }

    async fn save(&self, list: ReadingList) {
        self.lists.insert(list.id.clone(), list);
    }

    async fn update(
        &self,
        id: &str,
        update: ReadingListUpdate,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Option<Result<ReadingList, ReadingListError>> {
        let mut entry = self.lists.get_mut(id)?;
        let applied = entry.apply(update, catalog, now);
        Some(applied.map(|()| entry.value().clone()))
    }

    async fn delete(&self, id: &str) -> bool {
        self.lists.remove(id).is_some()
    }
}

fn fixture_time(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap_or_default()
}

fn seed_lists() -> Vec<ReadingList> {
    vec![
        ReadingList {
            id: "1".to_string(),
            user_id: "1".to_string(),
            name: "Summer Reading 2024".to_string(),
            description: "Books to read during summer vacation".to_string(),
            book_ids: vec!["1".to_string(), "2".to_string(), "4".to_string()],
            created_at: fixture_time("2024-06-01T10:00:00Z"),
            updated_at: fixture_time("2024-06-15T14:30:00Z"),
        },
        ReadingList {
            id: "2".to_string(),
            user_id: "1".to_string(),
            name: "Sci-Fi Favorites".to_string(),
            description: "My favorite science fiction novels".to_string(),
            book_ids: vec!["2".to_string(), "7".to_string()],
            created_at: fixture_time("2024-05-10T10:00:00Z"),
            updated_at: fixture_time("2024-05-10T10:00:00Z"),
        },
    ]
}
