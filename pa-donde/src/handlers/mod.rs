//! Place handlers
//!
//! - [`PlaceHandler`]: the six place operations over a [`PlaceRepository`](crate::repository::PlaceRepository)
//! - [`endpoints`]: axum handler functions wired up in [`crate::routes`]
//! - [`PlaceId`] / [`PlaceBody`]: extractors rejecting bad input with a 400
//! - [`ApiError`]: failures rendered as bare 400 / 500 responses

pub mod endpoints;
mod error;
mod extract;
mod places;

pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use extract::{PlaceBody, PlaceId};
pub use places::PlaceHandler;
