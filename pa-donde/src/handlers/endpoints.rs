//! axum endpoints for the place routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::error::{ApiError, ApiOperation};
use super::extract::{PlaceBody, PlaceId};
use crate::middleware::pagination::{split_page_window, Paged};
use crate::models::Place;
use crate::repository::PlaceRepository;
use crate::state::AppState;

/// `GET /places/all`
pub async fn list_all<R: PlaceRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Place>>, ApiError> {
    state.places().list_all().await.map(Json)
}

/// `GET /places?page=..&page_size=..`
pub async fn list_page<R: PlaceRepository>(
    State(state): State<AppState<R>>,
    Paged(window): Paged,
) -> Result<Json<Vec<Place>>, ApiError> {
    state.places().list_page(window).await.map(Json)
}

/// `GET /places/{key}`
///
/// A key shaped `{page}-{page_size}` lists a page; any other key is a place id.
pub async fn get_by_key<R: PlaceRepository>(
    State(state): State<AppState<R>>,
    Path(key): Path<String>,
    paged: Result<Paged, ApiError>,
) -> Result<Response, ApiError> {
    if split_page_window(&key).is_some() {
        let Paged(window) = paged?;
        let places = state.places().list_page(window).await?;
        return Ok(Json(places).into_response());
    }

    let PlaceId(id) = PlaceId::parse(&key, ApiOperation::Get)?;
    let place = state.places().get(id).await?;
    Ok(Json(place).into_response())
}

/// `POST /places/`
pub async fn create<R: PlaceRepository>(
    State(state): State<AppState<R>>,
    PlaceBody(fields): PlaceBody,
) -> Result<(StatusCode, Json<Place>), ApiError> {
    let place = state.places().create(fields).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// `PUT /places/{id}`
pub async fn update<R: PlaceRepository>(
    State(state): State<AppState<R>>,
    PlaceId(id): PlaceId,
    PlaceBody(fields): PlaceBody,
) -> Result<Json<Place>, ApiError> {
    state.places().update(id, fields).await.map(Json)
}

/// `DELETE /places/{id}`
pub async fn delete<R: PlaceRepository>(
    State(state): State<AppState<R>>,
    PlaceId(id): PlaceId,
) -> Result<StatusCode, ApiError> {
    state.places().delete(id).await?;
    Ok(StatusCode::OK)
}
