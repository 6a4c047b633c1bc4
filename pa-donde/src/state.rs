//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, handlers::PlaceHandler, repository::PlaceRepository};

/// Application state shared across handlers
///
/// Cloning is cheap: the configuration and the store sit behind `Arc`s.
pub struct AppState<R> {
    config: Arc<Config>,
    places: PlaceHandler<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            places: self.places.clone(),
        }
    }
}

impl<R: PlaceRepository> AppState<R> {
    /// Create state over an already opened store
    pub fn new(config: Config, repository: R) -> Self {
        Self::from_shared(Arc::new(config), Arc::new(repository))
    }

    /// Create state from shared handles
    pub fn from_shared(config: Arc<Config>, repository: Arc<R>) -> Self {
        Self {
            config,
            places: PlaceHandler::new(repository),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Place operations
    pub fn places(&self) -> &PlaceHandler<R> {
        &self.places
    }
}
