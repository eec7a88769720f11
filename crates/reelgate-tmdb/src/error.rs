use reqwest::StatusCode;
use thiserror::Error;

/// Outcome classification for one provider call.
///
/// `NotFound` is only produced by id-keyed lookups; every other non-success
/// outcome is fatal for the request and is never retried here.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("movie not found for the given ID and this request")]
    NotFound,

    #[error("provider returned unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}
