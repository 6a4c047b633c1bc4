//! Place persistence
//!
//! [`PlaceRepository`] is the capability the HTTP layer depends on. Two
//! engines implement it: [`SqlitePlaceRepository`] (feature `sqlite`) for
//! durable storage and [`InMemoryPlaceRepository`] for tests and throwaway
//! deployments.

mod error;
mod memory;
mod pagination;
#[cfg(feature = "sqlite")]
mod sqlite;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryPlaceRepository;
pub use pagination::Pagination;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePlaceRepository;
pub use traits::{PlaceRepository, RepositoryResult};
