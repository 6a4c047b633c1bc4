//! Place operations
//!
//! [`PlaceHandler`] turns decoded requests into exactly one store call each
//! and converts store failures into [`ApiError`]s. It knows nothing about
//! HTTP framing; the axum endpoints in [`super::endpoints`] wrap it.

use std::sync::Arc;

use super::error::{ApiError, ApiOperation};
use crate::models::{Place, PlaceFields};
use crate::pagination::PageWindow;
use crate::repository::PlaceRepository;

/// The six place operations over a shared store
pub struct PlaceHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for PlaceHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: PlaceRepository> PlaceHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// The underlying store
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Every place
    pub async fn list_all(&self) -> Result<Vec<Place>, ApiError> {
        let places = self
            .repository
            .find_all()
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::ListAll))?;

        tracing::debug!(count = places.len(), "Listed all places");
        Ok(places)
    }

    /// One page of places
    pub async fn list_page(&self, window: PageWindow) -> Result<Vec<Place>, ApiError> {
        let places = self
            .repository
            .find_page(window.into())
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::ListPage))?;

        tracing::debug!(
            page = window.page,
            page_size = window.page_size,
            count = places.len(),
            "Listed page of places"
        );
        Ok(places)
    }

    pub async fn get(&self, id: i64) -> Result<Place, ApiError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Get))
    }

    /// Store a new place; the id is assigned by the store
    pub async fn create(&self, fields: PlaceFields) -> Result<Place, ApiError> {
        let place = self
            .repository
            .insert(fields)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?;

        tracing::info!(place_id = place.id, name = %place.fields.name, "Place created");
        Ok(place)
    }

    /// Overwrite the place named by `id`
    ///
    /// `id` comes from the request path and always selects the record; any id
    /// in the body has already been discarded during decoding.
    pub async fn update(&self, id: i64, fields: PlaceFields) -> Result<Place, ApiError> {
        let place = self
            .repository
            .update_by_id(id, fields)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;

        tracing::info!(place_id = id, "Place updated");
        Ok(place)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?;

        tracing::info!(place_id = id, "Place deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use crate::repository::InMemoryPlaceRepository;

    fn handler() -> PlaceHandler<InMemoryPlaceRepository> {
        PlaceHandler::new(Arc::new(InMemoryPlaceRepository::new()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let handler = handler();
        let fields = PlaceFields::named("Cafe X").with_coordinates(12.1, -1.2);

        let created = handler.create(fields.clone()).await.unwrap();
        assert!(created.id > 0);

        let fetched = handler.get(created.id).await.unwrap();
        assert_eq!(fetched.fields, fields);
    }

    #[tokio::test]
    async fn test_list_page_uses_window() {
        let handler = handler();
        for i in 0..12 {
            handler.create(PlaceFields::named(format!("p{i}"))).await.unwrap();
        }

        let page = handler
            .list_page(PageWindow { page: 2, page_size: 5 })
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].fields.name, "p5");

        assert_eq!(handler.list_all().await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_update_targets_path_id() {
        let handler = handler();
        let first = handler.create(PlaceFields::named("first")).await.unwrap();
        let second = handler.create(PlaceFields::named("second")).await.unwrap();

        let updated = handler
            .update(second.id, PlaceFields::named("renamed"))
            .await
            .unwrap();
        assert_eq!(updated.id, second.id);
        assert_eq!(handler.get(first.id).await.unwrap().fields.name, "first");
    }

    #[tokio::test]
    async fn test_missing_place_is_internal_error() {
        let handler = handler();

        let err = handler.get(9).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InternalError);
        assert_eq!(err.operation, ApiOperation::Get);

        let err = handler.delete(9).await.unwrap_err();
        assert_eq!(err.operation, ApiOperation::Delete);
    }
}
