//! Page window resolution for list routes
//!
//! [`paginate`] runs in front of the paginated handlers. It reads the raw
//! `page` / `page_size` inputs, resolves them against the configured
//! [`PaginationConfig`] and stores the resulting [`PageWindow`] in the request
//! extensions. Handlers receive it through the [`Paged`] extractor.
//!
//! Inputs come from the last path segment when it has the
//! `{page}-{page_size}` shape (`/places/2-10`), otherwise from the query
//! string (`/places?page=2&page_size=10`).
//!
//! ```rust,ignore
//! let places = get(list_page::<R>)
//!     .route_layer(middleware::from_fn_with_state(config.pagination, paginate));
//! ```

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::{request::Parts, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::handlers::{ApiError, ApiOperation};
use crate::pagination::{resolve, PageWindow, PaginationConfig};

#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    page: Option<String>,
    page_size: Option<String>,
}

/// Split a `{page}-{page_size}` path segment at its first `-`
///
/// Returns `None` for segments without a `-`, which address a single place.
pub fn split_page_window(segment: &str) -> Option<(&str, &str)> {
    segment.split_once('-')
}

/// Raw pagination inputs carried by a request URI
fn raw_inputs(uri: &Uri) -> (Option<String>, Option<String>) {
    let last_segment = uri.path().rsplit('/').next().unwrap_or_default();
    if let Some((page, page_size)) = split_page_window(last_segment) {
        return (Some(page.to_string()), Some(page_size.to_string()));
    }

    // A malformed query string is treated like an absent one
    let query = Query::<RawPageQuery>::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default();
    (query.page, query.page_size)
}

/// Resolve the page window a request asks for
pub fn resolve_window(uri: &Uri, config: &PaginationConfig) -> PageWindow {
    let (page, page_size) = raw_inputs(uri);
    resolve(page.as_deref(), page_size.as_deref(), config)
}

/// Middleware attaching the resolved [`PageWindow`] to the request
pub async fn paginate(
    State(config): State<PaginationConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let window = resolve_window(request.uri(), &config);

    tracing::debug!(
        page = window.page,
        page_size = window.page_size,
        offset = window.offset(),
        "Resolved page window"
    );

    request.extensions_mut().insert(window);
    next.run(request).await
}

/// Extractor for the page window resolved by [`paginate`]
///
/// Rejects with an internal error when the middleware did not run, so a
/// paginated handler never queries without bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paged(pub PageWindow);

impl<S> FromRequestParts<S> for Paged
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PageWindow>()
            .copied()
            .map(Paged)
            .ok_or_else(|| {
                ApiError::internal(
                    ApiOperation::ListPage,
                    "Page window missing from request; pagination middleware not applied",
                )
            })
    }
}
