//! In-process place store
//!
//! Backs the `memory` engine and the HTTP tests. Records live in an ordered
//! map so pages come back in id order, matching the SQL store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{PlaceRepository, RepositoryResult};
use crate::models::{Place, PlaceFields};

/// Place store held entirely in memory
#[derive(Debug)]
pub struct InMemoryPlaceRepository {
    places: RwLock<BTreeMap<i64, Place>>,
    next_id: AtomicI64,
}

impl Default for InMemoryPlaceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlaceRepository {
    /// Create an empty store; the first insert receives id 1
    pub fn new() -> Self {
        Self {
            places: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl PlaceRepository for InMemoryPlaceRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Place>> {
        Ok(self.places.read().await.values().cloned().collect())
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<Place>> {
        let skip = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit).unwrap_or(usize::MAX);

        Ok(self
            .places
            .read()
            .await
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Place> {
        self.places
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::FindById, id))
    }

    async fn insert(&self, fields: PlaceFields) -> RepositoryResult<Place> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let place = Place::new(id, fields, Utc::now());

        self.places.write().await.insert(id, place.clone());
        Ok(place)
    }

    async fn update_by_id(&self, id: i64, fields: PlaceFields) -> RepositoryResult<Place> {
        let mut places = self.places.write().await;
        let place = places
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Update, id))?;

        place.fields = fields;
        place.updated_at = Utc::now();
        Ok(place.clone())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.places
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Delete, id))
    }
}
