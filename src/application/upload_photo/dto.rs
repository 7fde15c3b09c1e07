use crate::infrastructure::upstream::traits::SessionId;
use serde::{Deserialize, Serialize};

/// Body accepted by the upload endpoint: a single data-URL encoded image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadPhotoRequest {
    pub payload: UploadPayload,
    pub session: Option<SessionId>,
}
