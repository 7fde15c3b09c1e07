use super::traits::{
    ProcessMethod, ProcessRequest, SessionId, UpstreamResponse, UpstreamService, VectorUpload,
};
use crate::domain::upload::errors::RelayError;
use async_trait::async_trait;
use reqwest::{
    Client, Method, Url,
    header::{CONTENT_TYPE, COOKIE},
    multipart::{Form, Part},
};
use tracing::debug;

const UPLOAD_PATH: &str = "/controllers/upload/vector";
const PROCESS_PATH: &str = "/extensions/fkgupload/api/process";
const FALLBACK_PART_MIME: &str = "application/octet-stream";

/// MIME type for the multipart file part. `mime` needs `type/subtype`, so a
/// bare `image` falls back to a generic binary type.
fn part_mime(content_type: &str) -> &str {
    match content_type.split_once('/') {
        Some((top, sub)) if !top.is_empty() && !sub.is_empty() => content_type,
        _ => FALLBACK_PART_MIME,
    }
}

/// [`UpstreamService`] talking to a GC2 host over HTTP.
pub struct Gc2UpstreamService {
    client: Client,
    host: String,
}

impl Gc2UpstreamService {
    pub fn new(host: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fkg-upload/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, host))
    }

    pub fn with_client(client: Client, host: impl Into<String>) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self { client, host }
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.host, UPLOAD_PATH)
    }

    pub fn process_url(&self, segments: &[String]) -> Result<Url, RelayError> {
        let mut url = Url::parse(&format!("{}{}", self.host, PROCESS_PATH))
            .map_err(|e| RelayError::NetworkFailure(format!("Invalid upstream URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| RelayError::NetworkFailure("Upstream URL cannot carry a path".into()))?
            .extend(segments.iter().map(String::as_str));
        Ok(url)
    }

    async fn finish(response: reqwest::Response) -> Result<UpstreamResponse, RelayError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body = %body, "upstream response");
        Ok(UpstreamResponse { status, body })
    }
}

#[async_trait]
impl UpstreamService for Gc2UpstreamService {
    async fn upload_vector(
        &self,
        upload: VectorUpload,
        session: Option<SessionId>,
    ) -> Result<UpstreamResponse, RelayError> {
        let url = self.upload_url();
        debug!(
            url = %url,
            file = %upload.file_name,
            size = upload.data.len(),
            content_type = %upload.content_type,
            session = if session.is_some() { "present" } else { "missing" },
            "uploading photo to GC2"
        );

        let file_part = Part::bytes(upload.data.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(part_mime(&upload.content_type))
            .map_err(|e| RelayError::invalid_payload(format!("Unusable content type: {}", e)))?;

        // Field order matters to the PHP controller.
        let form = Form::new()
            .text("name", upload.file_name.clone())
            .text("type", upload.content_type.clone())
            .text("relativePath", "null")
            .part("file", file_part);

        let mut request = self.client.post(&url).multipart(form);
        if let Some(session) = &session {
            request = request.header(COOKIE, session.cookie_header());
        }

        Self::finish(request.send().await?).await
    }

    async fn process(
        &self,
        request: ProcessRequest,
        session: Option<SessionId>,
    ) -> Result<UpstreamResponse, RelayError> {
        let url = self.process_url(&request.segments)?;
        let method = match request.method {
            ProcessMethod::Get => Method::GET,
            ProcessMethod::Post => Method::POST,
            ProcessMethod::Put => Method::PUT,
            ProcessMethod::Delete => Method::DELETE,
        };
        debug!(method = %method, url = %url, "relaying process call");

        let mut builder = self.client.request(method, url);
        if let Some(session) = &session {
            builder = builder.header(COOKIE, session.cookie_header());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        Self::finish(builder.send().await?).await
    }
}
