//! Strict parsing of `data:` URLs carrying base64 images.
//!
//! Only the form `data:<type>[/<subtype>];base64,<payload>` is accepted. The
//! content-type segment and the payload segment must each appear exactly once;
//! anything else is rejected with [`RelayError::InvalidPayload`] before a single
//! byte is decoded.

use super::errors::RelayError;
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use bytes::Bytes;
use lazy_static::lazy_static;

lazy_static! {
    static ref DATA_URL_REGEX: regex::Regex = regex::Regex::new(
        r"^data:([A-Za-z0-9!#$&^_.+-]+)(?:/([A-Za-z0-9!#$&^_.+-]*))?;base64,([A-Za-z0-9+/=\s]*)$"
    )
    .unwrap();
}

/// Accepts base64 with or without trailing padding.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Extension used when the MIME type carries no subtype.
pub const DEFAULT_EXTENSION: &str = "png";

/// A validated and decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    content_type: String,
    subtype: Option<String>,
    data: Bytes,
}

impl DataUrl {
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let caps = DATA_URL_REGEX.captures(raw.trim()).ok_or_else(|| {
            RelayError::invalid_payload("file must be a data URL of the form data:<type>;base64,<payload>")
        })?;

        let main_type = &caps[1];
        let subtype = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty());
        let content_type = match &subtype {
            Some(sub) => format!("{}/{}", main_type, sub),
            None => main_type.to_string(),
        };

        let payload: String = caps[3].chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(RelayError::invalid_payload("data URL carries no payload"));
        }

        let data = LENIENT_STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| RelayError::invalid_payload(format!("payload is not valid base64: {}", e)))?;

        Ok(Self {
            content_type,
            subtype,
            data: Bytes::from(data),
        })
    }

    /// Builds the data URL a browser file reader would produce for `data`.
    pub fn encode(content_type: &str, data: &[u8]) -> String {
        format!(
            "data:{};base64,{}",
            content_type,
            base64::engine::general_purpose::STANDARD.encode(data)
        )
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File extension derived from the MIME subtype.
    pub fn extension(&self) -> &str {
        self.subtype.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}
