use thiserror::Error;

/// Failures surfaced by the attachment panel and the upload form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Attach failed: {0}")]
    AttachFailed(String),
    #[error("Detach failed: {0}")]
    DetachFailed(String),
    #[error("Set primary failed: {0}")]
    SetPrimaryFailed(String),
    /// One of the two list fetches of a refresh failed.
    #[error("{0}")]
    FetchFailed(String),
    #[error("{0}")]
    UploadFailed(String),
    #[error("Required")]
    MissingFile,
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Panel is not mounted")]
    Unmounted,
}
