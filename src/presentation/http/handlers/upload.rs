use crate::{
    application::upload_photo::dto::{UploadPayload, UploadPhotoRequest},
    domain::upload::errors::RelayError,
    presentation::http::{errors::AppError, middleware::session::Gc2Session, state::AppState},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

pub async fn upload_photo(
    State(state): State<AppState>,
    Gc2Session(session): Gc2Session,
    payload: Result<Json<UploadPayload>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload
        .map_err(|rejection| AppError::Upload(RelayError::invalid_payload(rejection.body_text())))?;

    let result = state
        .upload
        .execute(UploadPhotoRequest { payload, session })
        .await
        .map_err(AppError::Upload)?;

    Ok(Json(result))
}
