use crate::domain::attachment::entity::{AttachmentContext, AttachmentRecord, DetachedPhoto};
use serde::Serialize;

/// Lifecycle of the panel's data.
///
/// `Loading` is re-entered on every context change and after every mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Everything the panel holds in memory for its current context.
///
/// A failed refresh keeps the previously loaded lists next to the error
/// message rather than clearing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub context: AttachmentContext,
    pub attached: Vec<AttachmentRecord>,
    pub detached: Vec<DetachedPhoto>,
    pub loading: bool,
    pub error: Option<String>,
    pub status: PanelStatus,
}

impl PanelState {
    pub fn primary(&self) -> Option<&AttachmentRecord> {
        self.attached.iter().find(|record| record.is_primary)
    }

    pub fn is_attached(&self, photo_key: &str) -> bool {
        self.attached.iter().any(|record| record.photo_key == photo_key)
    }

    pub fn is_detached(&self, photo_key: &str) -> bool {
        self.detached.iter().any(|photo| photo.photo_key == photo_key)
    }
}
