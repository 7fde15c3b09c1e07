use crate::application::upload_photo::dto::UploadPayload;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failures of a call from the browser side to the relay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Network failure: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// The relay's HTTP surface as seen by the panel and the upload form.
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn upload(&self, payload: &UploadPayload) -> Result<Value, ClientError>;
    async fn list(&self, type_code: &str, id: &str) -> Result<Value, ClientError>;
    async fn create(&self, type_code: &str, body: Value) -> Result<Value, ClientError>;
    async fn update(&self, type_code: &str, body: Value) -> Result<Value, ClientError>;
    async fn delete(&self, link_id: &str) -> Result<Value, ClientError>;
}
