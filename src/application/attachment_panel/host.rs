use super::use_case::{AttachmentPanel, PanelOptions};
use crate::{
    domain::attachment::{entity::ContextUpdate, errors::PanelError},
    infrastructure::relay_client::traits::RelayApi,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Reads the facility id and theme from a selected GeoJSON feature.
///
/// Accepts both the bare feature and the host's `{feature: ...}` event
/// wrapper. `objekt_id` may be a string or a number.
pub fn context_from_feature(event: &Value) -> Option<ContextUpdate> {
    let feature = event.get("feature").unwrap_or(event);
    let properties = feature.get("properties")?;

    let facility_id = match properties.get("objekt_id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let theme = properties
        .get("temanavn")
        .and_then(Value::as_str)
        .map(str::to_string);

    if facility_id.is_none() && theme.is_none() {
        return None;
    }
    Some(ContextUpdate { facility_id, theme })
}

/// Wires a panel into the host platform's session and selection events.
pub struct PanelHost {
    api: Arc<dyn RelayApi>,
    options: PanelOptions,
    panel: Option<AttachmentPanel>,
}

impl PanelHost {
    pub fn new(api: Arc<dyn RelayApi>, options: PanelOptions) -> Self {
        Self {
            api,
            options,
            panel: None,
        }
    }

    /// Mounts a fresh panel on sign-in and tears it down on sign-out.
    pub fn on_auth_change(&mut self, signed_in: bool) {
        // The previous panel, if any, unmounts when dropped here.
        self.panel = signed_in
            .then(|| AttachmentPanel::mount(Arc::clone(&self.api), self.options.clone()));
    }

    pub fn panel(&self) -> Option<&AttachmentPanel> {
        self.panel.as_ref()
    }

    /// Points the panel at the selected feature. Events arriving with no
    /// mounted panel, or without the expected properties, are ignored.
    pub async fn on_feature_selected(&self, event: &Value) -> Result<(), PanelError> {
        let Some(panel) = &self.panel else {
            debug!("feature selected with no mounted panel");
            return Ok(());
        };
        let Some(update) = context_from_feature(event) else {
            debug!("selected feature carries no facility properties");
            return Ok(());
        };
        panel.handle().set_context(update).await
    }
}
