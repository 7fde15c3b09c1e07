//! Client-side state machine behind the photo attachment panel.
//!
//! The panel owns its context, the attached and detached lists, and the
//! loading/error flags. The operations the host needs (`set_context`,
//! `refresh`, `attach`, `detach`, `set_primary`) are reachable only through a
//! [`PanelHandle`] obtained from the mounted panel; once the panel is
//! unmounted every handle call fails with [`PanelError::Unmounted`].
//!
//! Each refresh takes a ticket from a monotonically increasing counter. A
//! refresh that completes after a newer one was issued is discarded, so a slow
//! answer for a previous facility can never overwrite the current one.

use super::{
    state::{PanelState, PanelStatus},
    view::PanelView,
};
use crate::{
    domain::attachment::{
        entity::{
            ATTACHMENT_RECORDS, AttachmentContext, CANDIDATE_POOL, ContextUpdate, CreateAttachment,
            SetPrimary, attached_from_response, detached_from_response,
        },
        errors::PanelError,
    },
    infrastructure::relay_client::traits::{ClientError, RelayApi},
};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Base URL of the 360px photo renditions.
pub const DEFAULT_PHOTO_BASE_URL: &str = "https://mapcentia-www.s3-eu-west-1.amazonaws.com/fkg/360";

#[derive(Debug, Clone)]
pub struct PanelOptions {
    pub photo_base_url: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            photo_base_url: DEFAULT_PHOTO_BASE_URL.to_string(),
        }
    }
}

struct PanelInner {
    api: Arc<dyn RelayApi>,
    options: PanelOptions,
    state: Mutex<PanelState>,
    issued: AtomicU64,
    mounted: AtomicBool,
}

/// A mounted attachment panel. Dropping it unmounts it.
pub struct AttachmentPanel {
    inner: Arc<PanelInner>,
}

impl AttachmentPanel {
    pub fn mount(api: Arc<dyn RelayApi>, options: PanelOptions) -> Self {
        debug!("mounting attachment panel");
        Self {
            inner: Arc::new(PanelInner {
                api,
                options,
                state: Mutex::new(PanelState::default()),
                issued: AtomicU64::new(0),
                mounted: AtomicBool::new(true),
            }),
        }
    }

    /// Capability object to hand to the host's event subscriptions.
    pub fn handle(&self) -> PanelHandle {
        PanelHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    pub async fn snapshot(&self) -> PanelState {
        self.inner.snapshot().await
    }

    pub async fn view(&self) -> PanelView {
        self.inner.view().await
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for AttachmentPanel {
    fn drop(&mut self) {
        if self.inner.mounted.swap(false, Ordering::SeqCst) {
            debug!("attachment panel unmounted");
        }
    }
}

/// Cloneable handle exposing the panel's commands.
#[derive(Clone)]
pub struct PanelHandle {
    inner: Arc<PanelInner>,
}

impl PanelHandle {
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Last known state; still readable after unmount.
    pub async fn snapshot(&self) -> PanelState {
        self.inner.snapshot().await
    }

    pub async fn view(&self) -> PanelView {
        self.inner.view().await
    }

    /// Updates whichever context fields are provided, then refreshes.
    ///
    /// Any refresh still in flight for the previous context is invalidated,
    /// including when the new context has no facility and nothing is fetched.
    pub async fn set_context(&self, update: ContextUpdate) -> Result<(), PanelError> {
        self.ensure_mounted()?;
        {
            let mut state = self.inner.state.lock().await;
            update.apply_to(&mut state.context);
            self.inner.issued.fetch_add(1, Ordering::SeqCst);
            if !state.context.has_facility() && state.loading {
                state.loading = false;
                state.status = PanelStatus::Idle;
            }
        }
        self.inner.refresh().await
    }

    pub async fn refresh(&self) -> Result<(), PanelError> {
        self.ensure_mounted()?;
        self.inner.refresh().await
    }

    #[instrument(skip(self))]
    pub async fn attach(&self, photo_key: &str) -> Result<(), PanelError> {
        self.ensure_mounted()?;
        let context = self.inner.context().await;
        if !context.has_facility() {
            return Err(PanelError::AttachFailed("no facility selected".into()));
        }
        let body = to_body(&CreateAttachment {
            theme: context.theme,
            facility_id: context.facility_id,
            photo_key: photo_key.to_string(),
        })?;
        let result = self.inner.api.create(ATTACHMENT_RECORDS, body).await;
        self.inner.settle(result, PanelError::AttachFailed).await
    }

    #[instrument(skip(self))]
    pub async fn detach(&self, link_id: &str) -> Result<(), PanelError> {
        self.ensure_mounted()?;
        let result = self.inner.api.delete(link_id).await;
        self.inner.settle(result, PanelError::DetachFailed).await
    }

    #[instrument(skip(self))]
    pub async fn set_primary(&self, link_id: &str) -> Result<(), PanelError> {
        self.ensure_mounted()?;
        let context = self.inner.context().await;
        if !context.has_facility() {
            return Err(PanelError::SetPrimaryFailed("no facility selected".into()));
        }
        let body = to_body(&SetPrimary {
            facility_id: context.facility_id,
            link_id: link_id.to_string(),
        })?;
        let result = self.inner.api.update(ATTACHMENT_RECORDS, body).await;
        self.inner.settle(result, PanelError::SetPrimaryFailed).await
    }

    fn ensure_mounted(&self) -> Result<(), PanelError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(PanelError::Unmounted)
        }
    }
}

impl PanelInner {
    async fn snapshot(&self) -> PanelState {
        self.state.lock().await.clone()
    }

    async fn view(&self) -> PanelView {
        let state = self.state.lock().await;
        PanelView::render(&state, &self.options.photo_base_url)
    }

    async fn context(&self) -> AttachmentContext {
        self.state.lock().await.context.clone()
    }

    async fn refresh(&self) -> Result<(), PanelError> {
        let (context, ticket) = {
            let mut state = self.state.lock().await;
            if !state.context.has_facility() {
                return Ok(());
            }
            let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
            state.status = PanelStatus::Loading;
            (state.context.clone(), ticket)
        };

        let facility_id = context.facility_id.as_str();
        let (attached, detached) = tokio::join!(
            self.api.list(ATTACHMENT_RECORDS, facility_id),
            self.api.list(CANDIDATE_POOL, facility_id),
        );

        let mut state = self.state.lock().await;
        if self.issued.load(Ordering::SeqCst) != ticket {
            debug!(ticket, facility_id, "discarding superseded refresh");
            return Ok(());
        }
        state.loading = false;

        match (attached, detached) {
            (Ok(attached), Ok(detached)) => {
                state.attached = attached_from_response(&attached);
                state.detached = detached_from_response(&detached);
                state.status = PanelStatus::Loaded;
                debug!(
                    attached = state.attached.len(),
                    detached = state.detached.len(),
                    "panel refreshed"
                );
                Ok(())
            }
            (attached, detached) => {
                let err = attached
                    .err()
                    .map(|e| fetch_error("attached", e))
                    .or_else(|| detached.err().map(|e| fetch_error("detached", e)))
                    .unwrap_or_else(|| PanelError::FetchFailed("Unknown error".into()));
                warn!(error = %err, "panel refresh failed");
                state.error = Some(err.to_string());
                state.status = PanelStatus::Errored;
                Err(err)
            }
        }
    }

    /// Resolves a mutation result; success triggers a refresh whose outcome
    /// lands in the panel state.
    async fn settle(
        &self,
        result: Result<Value, ClientError>,
        failed: fn(String) -> PanelError,
    ) -> Result<(), PanelError> {
        let err = match result {
            // The relay's answer to a mutation carries nothing the panel reads.
            Ok(_) | Err(ClientError::Decode(_)) => {
                let _ = self.refresh().await;
                return Ok(());
            }
            Err(ClientError::Status { message, .. }) => failed(message),
            Err(ClientError::Network(msg)) => PanelError::NetworkFailure(msg),
        };
        warn!(error = %err, "panel mutation failed");
        self.state.lock().await.error = Some(err.to_string());
        Err(err)
    }
}

fn fetch_error(list: &str, err: ClientError) -> PanelError {
    match err {
        ClientError::Status { status, .. } => {
            PanelError::FetchFailed(format!("Failed to fetch {} ({})", list, status))
        }
        ClientError::Network(msg) => PanelError::NetworkFailure(msg),
        ClientError::Decode(msg) => PanelError::FetchFailed(format!("Failed to read {}: {}", list, msg)),
    }
}

fn to_body<T: serde::Serialize>(body: &T) -> Result<Value, PanelError> {
    serde_json::to_value(body).map_err(|e| PanelError::FetchFailed(e.to_string()))
}
