use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing returned HTTP {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered, but not with `204 No Content`.
    #[error("webhook returned HTTP {0}")]
    Status(StatusCode),

    #[error("no webhook configured")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization: {0}")]
    Json(#[from] serde_json::Error),
}
