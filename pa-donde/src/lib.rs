//! # pa-donde
//!
//! REST service for browsing and curating places of interest.
//!
//! ## Features
//!
//! - **Places CRUD**: list all, list a page, get, create, update, delete
//! - **Permissive pagination**: malformed `page` / `page_size` fall back to
//!   configured defaults and page sizes are clamped, never rejected
//! - **Pluggable stores**: SQLite via sqlx (feature `sqlite`, default) or an
//!   in-memory map
//! - **Middleware stack**: request ids, tracing, CORS, compression, body
//!   limits, timeouts, panic recovery
//! - **Graceful shutdown**: SIGTERM and SIGINT drain in-flight requests
//!
//! ## Example
//!
//! ```rust,no_run
//! use pa_donde::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryPlaceRepository::new());
//!
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
#[cfg(feature = "sqlite")]
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, DatabaseEngine};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind, ApiOperation, PlaceHandler};
    pub use crate::middleware::Paged;
    pub use crate::models::{ContactInfo, Coordinates, Place, PlaceFields, PriceRange};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{resolve, PageWindow, PaginationConfig};
    pub use crate::repository::{
        InMemoryPlaceRepository, Pagination, PlaceRepository, RepositoryError,
    };
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;

    #[cfg(feature = "sqlite")]
    pub use crate::database::connect_sqlite;
    #[cfg(feature = "sqlite")]
    pub use crate::repository::SqlitePlaceRepository;
}
