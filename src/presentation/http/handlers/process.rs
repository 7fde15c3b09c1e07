use crate::{
    domain::{attachment::entity::ATTACHMENT_RECORDS, upload::errors::RelayError},
    presentation::http::{errors::AppError, middleware::session::Gc2Session, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
};
use bytes::Bytes;
use serde_json::{Value, json};

/// Reads a passthrough body. An empty body is forwarded as `{}`.
fn json_body(body: &Bytes) -> Result<Value, AppError> {
    if body.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|e| {
        AppError::Relay(RelayError::invalid_payload(format!("Body is not valid JSON: {}", e)))
    })
}

pub async fn list_processed(
    State(state): State<AppState>,
    Gc2Session(session): Gc2Session,
    Path((type_code, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .process
        .list(&type_code, &id, session)
        .await
        .map_err(AppError::Relay)?;
    Ok(Json(result))
}

pub async fn create_attachment(
    State(state): State<AppState>,
    Gc2Session(session): Gc2Session,
    Path(type_code): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = json_body(&body)?;
    let result = state
        .process
        .create(&type_code, body, session)
        .await
        .map_err(AppError::Relay)?;
    Ok(Json(result))
}

pub async fn update_attachment(
    State(state): State<AppState>,
    Gc2Session(session): Gc2Session,
    Path(type_code): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = json_body(&body)?;
    let result = state
        .process
        .update(&type_code, body, session)
        .await
        .map_err(AppError::Relay)?;
    Ok(Json(result))
}

/// Shares its path with [`list_processed`]; only link records (`7900`) can be deleted.
pub async fn delete_attachment(
    State(state): State<AppState>,
    Gc2Session(session): Gc2Session,
    Path((type_code, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    if type_code != ATTACHMENT_RECORDS {
        return Err(AppError::MethodNotAllowed(format!(
            "DELETE is only supported for type {}",
            ATTACHMENT_RECORDS
        )));
    }
    let result = state
        .process
        .delete(&id, session)
        .await
        .map_err(AppError::Relay)?;
    Ok(Json(result))
}
