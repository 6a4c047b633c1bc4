//! Route table

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::endpoints::{create, delete, get_by_key, list_all, list_page, update},
    health::health,
    middleware::paginate,
    repository::PlaceRepository,
    state::AppState,
};

/// Build the service router
///
/// | Method | Path | |
/// |---|---|---|
/// | GET | `/health` | liveness |
/// | GET | `/places/all` | every place |
/// | GET | `/places` | page from `page` / `page_size` query parameters |
/// | GET | `/places/{page}-{page_size}` | page from the path |
/// | GET | `/places/{id}` | one place |
/// | POST | `/places/`, `/places` | create |
/// | PUT | `/places/{id}` | update |
/// | DELETE | `/places/{id}` | delete |
///
/// The pagination middleware only wraps the GET handlers that list pages.
pub fn router<R: PlaceRepository>(state: AppState<R>) -> Router {
    let paginated = from_fn_with_state(state.config().pagination, paginate);

    Router::new()
        .route("/health", get(health::<R>))
        .route("/places/all", get(list_all::<R>))
        .route(
            "/places",
            get(list_page::<R>)
                .route_layer(paginated.clone())
                .post(create::<R>),
        )
        .route("/places/", post(create::<R>))
        .route(
            "/places/{key}",
            get(get_by_key::<R>)
                .route_layer(paginated)
                .put(update::<R>)
                .delete(delete::<R>),
        )
        .with_state(state)
}
