use crate::domain::upload::errors::RelayError;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::fmt;

/// GC2 session identifier forwarded upstream as the `PHPSESSID` cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn cookie_header(&self) -> String {
        format!("PHPSESSID={}", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(..)")
    }
}

/// A decoded photo ready to be sent to the vector upload controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A call against `<gc2>/extensions/fkgupload/api/process/<segments..>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub method: ProcessMethod,
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl ProcessRequest {
    pub fn get(segments: &[&str]) -> Self {
        Self::new(ProcessMethod::Get, segments, None)
    }

    pub fn post(segments: &[&str], body: Value) -> Self {
        Self::new(ProcessMethod::Post, segments, Some(body))
    }

    pub fn put(segments: &[&str], body: Value) -> Self {
        Self::new(ProcessMethod::Put, segments, Some(body))
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(ProcessMethod::Delete, segments, None)
    }

    fn new(method: ProcessMethod, segments: &[&str], body: Option<Value>) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body,
        }
    }
}

/// Raw status and body of an upstream answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-success answer into [`RelayError::Upstream`].
    pub fn error_for_status(self) -> Result<Self, RelayError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RelayError::Upstream {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamService: Send + Sync {
    /// POST a multipart upload to the vector upload controller.
    async fn upload_vector(
        &self,
        upload: VectorUpload,
        session: Option<SessionId>,
    ) -> Result<UpstreamResponse, RelayError>;

    /// Call the fkgupload process API.
    async fn process(
        &self,
        request: ProcessRequest,
        session: Option<SessionId>,
    ) -> Result<UpstreamResponse, RelayError>;
}
