use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user movie review already exists for the given user and movie")]
    AlreadyExists,

    #[error("user movie review not found for the given user and movie")]
    NotFound,

    /// The store claimed the review was found but a required out-parameter
    /// came back NULL. This is a broken store contract, not a client error.
    #[error("review row is missing required column {0}")]
    MissingColumn(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
