use crate::{
    domain::{
        attachment::entity::ATTACHMENT_RECORDS,
        upload::{envelope::parse_upstream_body, errors::RelayError},
    },
    infrastructure::upstream::traits::{ProcessRequest, SessionId, UpstreamService},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Verbatim passthrough of the attachment CRUD calls to the GC2 process API.
pub struct ProcessProxyUseCase {
    upstream: Arc<dyn UpstreamService>,
}

impl ProcessProxyUseCase {
    pub fn new(upstream: Arc<dyn UpstreamService>) -> Self {
        Self { upstream }
    }

    #[instrument(skip(self, session))]
    pub async fn list(
        &self,
        type_code: &str,
        id: &str,
        session: Option<SessionId>,
    ) -> Result<Value, RelayError> {
        self.relay(ProcessRequest::get(&[type_code, id]), session).await
    }

    #[instrument(skip(self, body, session))]
    pub async fn create(
        &self,
        type_code: &str,
        body: Value,
        session: Option<SessionId>,
    ) -> Result<Value, RelayError> {
        self.relay(ProcessRequest::post(&[type_code], body), session).await
    }

    #[instrument(skip(self, body, session))]
    pub async fn update(
        &self,
        type_code: &str,
        body: Value,
        session: Option<SessionId>,
    ) -> Result<Value, RelayError> {
        self.relay(ProcessRequest::put(&[type_code], body), session).await
    }

    /// Deletes an attachment link. Only link records can be deleted.
    #[instrument(skip(self, session))]
    pub async fn delete(&self, link_id: &str, session: Option<SessionId>) -> Result<Value, RelayError> {
        self.relay(ProcessRequest::delete(&[ATTACHMENT_RECORDS, link_id]), session)
            .await
    }

    async fn relay(
        &self,
        request: ProcessRequest,
        session: Option<SessionId>,
    ) -> Result<Value, RelayError> {
        let response = self
            .upstream
            .process(request, session)
            .await?
            .error_for_status()?;
        Ok(parse_upstream_body(&response.body))
    }
}
