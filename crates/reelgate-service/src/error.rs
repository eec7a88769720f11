use serde::Serialize;
use thiserror::Error;

use reelgate_store::StoreError;
use reelgate_tmdb::CatalogError;

/// The unified client-facing error set.
///
/// NotFound and AlreadyExists are the only domain outcomes recovered into
/// typed errors; anything else is an opaque internal fault that aborts the
/// request. Cancellation is its own outcome and is never classified as
/// internal.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("movie not found for the given ID and this request")]
    MovieNotFound,

    #[error("user movie review not found for the given user and movie")]
    ReviewNotFound,

    #[error("user movie review already exists for the given user and movie")]
    ReviewAlreadyExists,

    #[error("no authenticated identity on the request context")]
    Unauthenticated,

    #[error("request cancelled before completion")]
    Cancelled,

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

/// RPC-level code, the only part of an internal fault a client ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    AlreadyExists,
    Unauthenticated,
    Cancelled,
    Internal,
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::MovieNotFound | ServiceError::ReviewNotFound => ErrorCode::NotFound,
            ServiceError::ReviewAlreadyExists => ErrorCode::AlreadyExists,
            ServiceError::Unauthenticated => ErrorCode::Unauthenticated,
            ServiceError::Cancelled => ErrorCode::Cancelled,
            ServiceError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<CatalogError> for ServiceError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ServiceError::MovieNotFound,
            other => ServiceError::Internal(other.into()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => ServiceError::ReviewAlreadyExists,
            StoreError::NotFound => ServiceError::ReviewNotFound,
            other => ServiceError::Internal(other.into()),
        }
    }
}
