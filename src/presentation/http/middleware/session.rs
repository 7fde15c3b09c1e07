use crate::{infrastructure::upstream::traits::SessionId, presentation::http::state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use std::convert::Infallible;

/// The caller's GC2 session, read from the configured cookie when present.
#[derive(Debug, Clone)]
pub struct Gc2Session(pub Option<SessionId>);

pub fn extract_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(SessionId::new)
}

impl FromRequestParts<AppState> for Gc2Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_session_cookie(
            &parts.headers,
            &state.config.session_cookie_name,
        )))
    }
}
