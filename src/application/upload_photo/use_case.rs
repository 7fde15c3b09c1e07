use super::dto::UploadPhotoRequest;
use crate::{
    domain::upload::{
        data_url::DataUrl, envelope::parse_upstream_body, errors::RelayError,
        file_name::PhotoFileName,
    },
    infrastructure::upstream::traits::{ProcessRequest, UpstreamService, VectorUpload},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Relays a data-URL photo to GC2 and registers it with the process API.
///
/// The workflow is fail-fast: a malformed payload is rejected before any
/// upstream call, a failed upload skips registration, and the registration
/// answer is what the caller receives.
pub struct UploadPhotoUseCase {
    upstream: Arc<dyn UpstreamService>,
}

impl UploadPhotoUseCase {
    pub fn new(upstream: Arc<dyn UpstreamService>) -> Self {
        Self { upstream }
    }

    #[instrument(skip(self, request), fields(session = request.session.is_some()))]
    pub async fn execute(&self, request: UploadPhotoRequest) -> Result<Value, RelayError> {
        let raw = request
            .payload
            .file
            .as_deref()
            .ok_or_else(|| RelayError::invalid_payload("No file provided in payload"))?;
        let data_url = DataUrl::parse(raw)?;

        let file_name = PhotoFileName::generate(data_url.extension()).to_string();
        let content_type = data_url.content_type().to_string();
        debug!(file = %file_name, content_type = %content_type, size = data_url.data().len(), "decoded upload payload");

        let uploaded = self
            .upstream
            .upload_vector(
                VectorUpload {
                    file_name: file_name.clone(),
                    content_type,
                    data: data_url.into_data(),
                },
                request.session.clone(),
            )
            .await?
            .error_for_status()?;
        debug!(response = %parse_upstream_body(&uploaded.body), "upload accepted");

        let processed = self
            .upstream
            .process(
                ProcessRequest::post(&[], json!({ "fileName": file_name, "delete": false })),
                request.session,
            )
            .await?
            .error_for_status()?;

        info!(file = %file_name, "photo uploaded and registered");
        Ok(parse_upstream_body(&processed.body))
    }
}
