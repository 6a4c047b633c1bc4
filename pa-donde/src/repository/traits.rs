//! Repository trait definitions
//!
//! Async methods use RPITIT (Return Position Impl Trait In Traits), so the
//! trait is used through generics rather than `dyn`.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::Pagination;
use crate::models::{Place, PlaceFields};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence capability for places
///
/// Implementations must be safe to share between concurrent requests; the
/// HTTP layer holds one instance behind an `Arc` and never serializes access.
///
/// Ids are assigned by the store. Operations addressing a single id return
/// a [`RepositoryErrorKind::NotFound`](super::RepositoryErrorKind::NotFound)
/// error when no live record carries that id.
pub trait PlaceRepository: Send + Sync + 'static {
    /// Every live place, ordered by id
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Place>>> + Send;

    /// One window of live places, ordered by id
    ///
    /// An offset past the end yields an empty list.
    fn find_page(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Place>>> + Send;

    /// A single place by id
    fn find_by_id(&self, id: i64) -> impl Future<Output = RepositoryResult<Place>> + Send;

    /// Store a new place and return it with its assigned id
    fn insert(&self, fields: PlaceFields) -> impl Future<Output = RepositoryResult<Place>> + Send;

    /// Overwrite every mutable field of the place with the given id
    fn update_by_id(
        &self,
        id: i64,
        fields: PlaceFields,
    ) -> impl Future<Output = RepositoryResult<Place>> + Send;

    /// Remove the place with the given id
    fn delete_by_id(&self, id: i64) -> impl Future<Output = RepositoryResult<()>> + Send;
}
