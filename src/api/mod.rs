//! HTTP/JSON API for saving and loading worksheets
//!
//! | Method | Path                   | Handler                     |
//! |--------|------------------------|-----------------------------|
//! | POST   | `/api/save-fmea`       | [`handlers::save_fmea`]     |
//! | GET    | `/api/fmea-list`       | [`handlers::list_fmea`]     |
//! | GET    | `/api/fmea/{id}`       | [`handlers::get_fmea`]      |
//! | GET    | `/api/get-latest-fmea` | [`handlers::get_latest_fmea`] |

pub mod cors;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::core::WorksheetStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorksheetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn WorksheetStore>) -> Self {
        Self { store }
    }
}

/// Build the API router without any cross-origin policy
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/save-fmea", post(handlers::save_fmea))
        .route("/api/fmea-list", get(handlers::list_fmea))
        .route("/api/fmea/{id}", get(handlers::get_fmea))
        .route("/api/get-latest-fmea", get(handlers::get_latest_fmea))
        .with_state(state)
}

/// Build the API router restricted to the given origins
pub fn router_with_cors(state: AppState, allowed_origins: &[String]) -> Router {
    router(state).layer(cors::cors_layer(allowed_origins))
}
