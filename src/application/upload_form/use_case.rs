use crate::{
    application::{attachment_panel::use_case::PanelHandle, upload_photo::dto::UploadPayload},
    domain::{
        attachment::errors::PanelError,
        upload::{data_url::DataUrl, file_name::photo_key},
    },
    infrastructure::relay_client::traits::{ClientError, RelayApi},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Single-field photo form posting to the relay's upload endpoint.
///
/// With `direct_attach` set and a panel bound, a successful upload is
/// attached to the panel's current facility right away.
pub struct UploadForm {
    api: Arc<dyn RelayApi>,
    panel: Option<PanelHandle>,
    direct_attach: bool,
    file: Option<String>,
}

impl UploadForm {
    pub fn new(api: Arc<dyn RelayApi>, panel: Option<PanelHandle>, direct_attach: bool) -> Self {
        Self {
            api,
            panel,
            direct_attach,
            file: None,
        }
    }

    /// Captures raw image bytes as a data URL, the way a browser file reader would.
    pub fn capture(&mut self, content_type: &str, data: &[u8]) {
        self.file = Some(DataUrl::encode(content_type, data));
    }

    pub fn set_file(&mut self, data_url: impl Into<String>) {
        self.file = Some(data_url.into());
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    /// Posts the captured photo. The form is cleared only when every step,
    /// including the optional attach, succeeded.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<Value, PanelError> {
        let file = self.file.clone().ok_or(PanelError::MissingFile)?;
        let response = self
            .api
            .upload(&UploadPayload { file: Some(file) })
            .await
            .map_err(|e| match e {
                ClientError::Network(msg) => PanelError::NetworkFailure(msg),
                other => PanelError::UploadFailed(other.to_string()),
            })
            .inspect_err(|e| warn!(error = %e, "upload failed"))?;

        if self.direct_attach {
            if let Some(panel) = &self.panel {
                let image = response
                    .get("image")
                    .and_then(Value::as_str)
                    .ok_or_else(|| PanelError::UploadFailed("upload response carried no image".into()))?;
                panel.attach(photo_key(image)).await?;
                let _ = panel.refresh().await;
            }
        }

        info!("photo uploaded");
        self.clear();
        Ok(response)
    }
}
