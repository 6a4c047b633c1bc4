//! HTTP middleware
//!
//! - [`pagination`]: resolves the page window for list routes and hands it to
//!   handlers through the [`Paged`] extractor
//! - [`request_tracking`]: request ids and sensitive header masking

pub mod pagination;
pub mod request_tracking;

pub use pagination::{paginate, Paged};
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, REQUEST_ID_HEADER,
    SENSITIVE_HEADERS,
};
