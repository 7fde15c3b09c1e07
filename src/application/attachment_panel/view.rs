use super::state::PanelState;
use serde::Serialize;

pub const ATTACHED_TAB_LABEL: &str = "Tilknyttede";
pub const DETACHED_TAB_LABEL: &str = "Ikke tilknyttede";
pub const LOADING_PLACEHOLDER: &str = "Indlæser...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView<C> {
    pub id: &'static str,
    pub label: &'static str,
    /// Shown instead of cards while the first load for a context is in flight.
    pub placeholder: Option<&'static str>,
    pub cards: Vec<C>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedCard {
    pub photo_key: String,
    pub image_url: String,
    pub link_id: String,
    pub is_primary: bool,
    pub star_icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetachedCard {
    pub photo_key: String,
    pub image_url: String,
}

/// Render-ready projection of the panel: two tabs plus an error banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub attached: TabView<AttachedCard>,
    pub detached: TabView<DetachedCard>,
    pub error_banner: Option<String>,
}

impl PanelView {
    pub fn render(state: &PanelState, photo_base_url: &str) -> Self {
        let base = photo_base_url.trim_end_matches('/');
        let image_url = |key: &str| format!("{}/{}.jpg", base, key);
        let placeholder = |empty: bool| (state.loading && empty).then_some(LOADING_PLACEHOLDER);

        Self {
            attached: TabView {
                id: "attached",
                label: ATTACHED_TAB_LABEL,
                placeholder: placeholder(state.attached.is_empty()),
                cards: state
                    .attached
                    .iter()
                    .map(|record| AttachedCard {
                        photo_key: record.photo_key.clone(),
                        image_url: image_url(&record.photo_key),
                        link_id: record.link_id.clone(),
                        is_primary: record.is_primary,
                        star_icon: if record.is_primary { "bi-star-fill" } else { "bi-star" },
                    })
                    .collect(),
            },
            detached: TabView {
                id: "detached",
                label: DETACHED_TAB_LABEL,
                placeholder: placeholder(state.detached.is_empty()),
                cards: state
                    .detached
                    .iter()
                    .map(|photo| DetachedCard {
                        photo_key: photo.photo_key.clone(),
                        image_url: image_url(&photo.photo_key),
                    })
                    .collect(),
            },
            error_banner: state.error.clone(),
        }
    }
}
