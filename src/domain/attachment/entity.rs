use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type code of the photo/facility link records.
pub const ATTACHMENT_RECORDS: &str = "7900";

/// Type code of the candidate pool: photos not yet linked to the facility.
pub const CANDIDATE_POOL: &str = "7901";

/// Facility and theme the panel is currently showing.
///
/// Both fields are empty until the host selects a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentContext {
    pub facility_id: String,
    pub theme: String,
}

impl AttachmentContext {
    pub fn new(facility_id: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            facility_id: facility_id.into(),
            theme: theme.into(),
        }
    }

    pub fn has_facility(&self) -> bool {
        !self.facility_id.is_empty()
    }
}

/// Partial update of an [`AttachmentContext`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    pub facility_id: Option<String>,
    pub theme: Option<String>,
}

impl ContextUpdate {
    pub fn facility(facility_id: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            facility_id: Some(facility_id.into()),
            theme: Some(theme.into()),
        }
    }

    pub fn apply_to(self, context: &mut AttachmentContext) {
        if let Some(facility_id) = self.facility_id {
            context.facility_id = facility_id;
        }
        if let Some(theme) = self.theme {
            context.theme = theme;
        }
    }
}

/// A photo linked to the current facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub photo_key: String,
    pub is_primary: bool,
    /// Identifier of the link row; detach and set-primary address it, not the photo.
    pub link_id: String,
}

impl AttachmentRecord {
    /// Reads an upstream row shaped `[photoKey, isPrimary, linkId]`.
    pub fn from_row(row: &Value) -> Option<Self> {
        let cells = row.as_array()?;
        let photo_key = scalar_to_string(cells.first()?)?;
        let is_primary = match cells.get(1) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => s == "1" || s == "t" || s == "true",
            _ => false,
        };
        let link_id = scalar_to_string(cells.get(2)?)?;
        Some(Self {
            photo_key,
            is_primary,
            link_id,
        })
    }
}

/// A candidate photo not yet linked to the current facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedPhoto {
    pub photo_key: String,
}

impl DetachedPhoto {
    pub fn from_row(row: &Value) -> Option<Self> {
        scalar_to_string(row).map(|photo_key| Self { photo_key })
    }
}

/// Extracts the attached rows of a list response. Anything but an array under
/// `data` is an empty list.
pub fn attached_from_response(response: &Value) -> Vec<AttachmentRecord> {
    rows(response)
        .iter()
        .filter_map(|row| {
            let record = AttachmentRecord::from_row(row);
            if record.is_none() {
                tracing::warn!(row = %row, "skipping malformed attachment row");
            }
            record
        })
        .collect()
}

pub fn detached_from_response(response: &Value) -> Vec<DetachedPhoto> {
    rows(response)
        .iter()
        .filter_map(|row| {
            let photo = DetachedPhoto::from_row(row);
            if photo.is_none() {
                tracing::warn!(row = %row, "skipping malformed candidate row");
            }
            photo
        })
        .collect()
}

fn rows(response: &Value) -> &[Value] {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Body of the create-attachment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAttachment {
    #[serde(rename = "tema")]
    pub theme: String,
    #[serde(rename = "foto_objek")]
    pub facility_id: String,
    #[serde(rename = "foto_lokat")]
    pub photo_key: String,
}

/// Body of the set-primary call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPrimary {
    #[serde(rename = "objekt_id")]
    pub facility_id: String,
    #[serde(rename = "objekt_id_7900")]
    pub link_id: String,
}
