//! Request handlers for the worksheet endpoints

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::AppState;
use crate::core::{StoreError, WorksheetStore};
use crate::entities::worksheet::{WorksheetHeader, WorksheetRow, WorksheetSummary};

/// Confirmation returned by a successful save
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: String,
    pub id: i64,
}

/// `POST /api/save-fmea`
pub async fn save_fmea(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let Json(mut body) = payload.map_err(|rejection| {
        log::warn!("Rejected save request: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let (Some(header), Some(rows)) = (
        take_required(&mut body, "headerData"),
        take_required(&mut body, "rows"),
    ) else {
        log::warn!("Rejected save request without headerData or rows");
        return Err(ApiError::BadRequest(
            "Request must include headerData and rows".to_string(),
        ));
    };

    let (header, rows) = decode_worksheet(header, rows).map_err(|e| {
        log::error!("Failed to decode worksheet: {}", e);
        ApiError::Internal(e)
    })?;

    let row_count = rows.len();
    let id = blocking(&state, move |store| store.create(&header, &rows))
        .await?
        .map_err(|e| {
            log::error!("Failed to save worksheet: {}", e);
            ApiError::from(e)
        })?;

    log::info!("Saved worksheet {} with {} row(s)", id, row_count);
    Ok((
        StatusCode::CREATED,
        Json(SaveResponse {
            message: "FMEA data saved successfully.".to_string(),
            id,
        }),
    ))
}

/// `GET /api/fmea-list`
pub async fn list_fmea(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorksheetSummary>>, ApiError> {
    let summaries = blocking(&state, |store| store.list()).await?.map_err(|e| {
        log::error!("Failed to list worksheets: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(summaries))
}

/// `GET /api/fmea/{id}`
pub async fn get_fmea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let worksheet = blocking(&state, move |store| store.get_by_id(id))
        .await?
        .map_err(lookup_failed)?;
    Ok(Json(worksheet.document()).into_response())
}

/// `GET /api/get-latest-fmea`
pub async fn get_latest_fmea(State(state): State<AppState>) -> Result<Response, ApiError> {
    let worksheet = blocking(&state, |store| store.get_latest())
        .await?
        .map_err(lookup_failed)?;
    Ok(Json(worksheet.document()).into_response())
}

/// Run a store call on tokio's blocking pool
///
/// Store calls hold a mutex across SQLite I/O and must not run on the
/// async worker threads.
async fn blocking<T, F>(state: &AppState, op: F) -> Result<Result<T, StoreError>, ApiError>
where
    F: FnOnce(&dyn WorksheetStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| {
            log::error!("Store task failed: {}", e);
            ApiError::Internal("store task failed".to_string())
        })
}

fn lookup_failed(err: StoreError) -> ApiError {
    if err.is_not_found() {
        log::warn!("{}", err);
    } else {
        log::error!("Failed to load worksheet: {}", err);
    }
    ApiError::from(err)
}

/// Remove a top-level field, treating null and empty values as absent
fn take_required(body: &mut Value, key: &str) -> Option<Value> {
    let value = body.get_mut(key)?.take();
    (!is_blank(&value)).then_some(value)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Decode the two payload parts; both must be JSON objects (rows: an array of them)
fn decode_worksheet(
    header: Value,
    rows: Value,
) -> Result<(WorksheetHeader, Vec<WorksheetRow>), String> {
    // serde also decodes structs from positional arrays, which would shift
    // values into the wrong columns
    if !header.is_object() {
        return Err("headerData must be an object".to_string());
    }
    if let Some(index) = rows
        .as_array()
        .and_then(|items| items.iter().position(|item| !item.is_object()))
    {
        return Err(format!("rows[{}] must be an object", index));
    }

    let header = serde_json::from_value(header).map_err(|e| e.to_string())?;
    let rows = serde_json::from_value(rows).map_err(|e| e.to_string())?;
    Ok((header, rows))
}
