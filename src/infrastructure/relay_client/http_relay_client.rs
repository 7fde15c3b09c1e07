use super::traits::{ClientError, RelayApi};
use crate::{
    application::upload_photo::dto::UploadPayload, domain::attachment::entity::ATTACHMENT_RECORDS,
};
use async_trait::async_trait;
use reqwest::{Client, Method, Url, header::ACCEPT};
use serde_json::Value;
use tracing::debug;

const UPLOAD_SEGMENTS: [&str; 3] = ["api", "extension", "fkgupload"];
const PROCESS_SEGMENTS: [&str; 5] = ["api", "extensions", "fkgupload", "api", "process"];

/// [`RelayApi`] over HTTP against a running relay.
#[derive(Clone)]
pub struct HttpRelayClient {
    client: Client,
    base_url: Url,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self::with_client(Client::builder().build()?, Url::parse(base_url)?))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("Relay URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn process_url(&self, rest: &[&str]) -> Result<Url, ClientError> {
        let segments: Vec<&str> = PROCESS_SEGMENTS.iter().chain(rest).copied().collect();
        self.url(&segments)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        fallback: impl FnOnce(u16) -> String,
    ) -> Result<Value, ClientError> {
        debug!(method = %method, url = %url, "calling relay");
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| fallback(status.as_u16()));
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn request_failed(status: u16) -> String {
    format!("Request failed with status: {}", status)
}

#[async_trait]
impl RelayApi for HttpRelayClient {
    async fn upload(&self, payload: &UploadPayload) -> Result<Value, ClientError> {
        let body = serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.send(Method::POST, self.url(&UPLOAD_SEGMENTS)?, Some(&body), |status| {
            format!("Upload failed with status: {}", status)
        })
        .await
    }

    async fn list(&self, type_code: &str, id: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, self.process_url(&[type_code, id])?, None, request_failed)
            .await
    }

    async fn create(&self, type_code: &str, body: Value) -> Result<Value, ClientError> {
        self.send(Method::POST, self.process_url(&[type_code])?, Some(&body), request_failed)
            .await
    }

    async fn update(&self, type_code: &str, body: Value) -> Result<Value, ClientError> {
        self.send(Method::PUT, self.process_url(&[type_code])?, Some(&body), request_failed)
            .await
    }

    async fn delete(&self, link_id: &str) -> Result<Value, ClientError> {
        self.send(
            Method::DELETE,
            self.process_url(&[ATTACHMENT_RECORDS, link_id])?,
            None,
            request_failed,
        )
        .await
    }
}
