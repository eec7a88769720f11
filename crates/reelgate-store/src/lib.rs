//! Review persistence.
//!
//! All conflict and existence detection is delegated to the store itself:
//! the unique constraint on (user, movie) is the only duplicate detector and
//! the procedures' found out-parameters are the only existence signal. This
//! layer never reads before writing and never locks.

mod error;
mod pg;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::StoreError;
pub use pg::{connect, PgReviewStore};

/// A persisted review, returned only when the store reports it found.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReview {
    pub rating: i32,
    pub review: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Four operations, each exactly one relational round trip.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Create a review. A duplicate (user, movie) pair is
    /// [`StoreError::AlreadyExists`], reported by the store's unique
    /// constraint.
    async fn add(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i32,
        review: &str,
    ) -> Result<(), StoreError>;

    /// Update an existing review; [`StoreError::NotFound`] if absent.
    async fn update(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i32,
        review: &str,
    ) -> Result<(), StoreError>;

    /// Delete an existing review; [`StoreError::NotFound`] if absent.
    async fn delete(&self, user_id: i64, movie_id: i64) -> Result<(), StoreError>;

    /// Fetch a review; found/not-found is the `Result` discriminant.
    async fn get(&self, user_id: i64, movie_id: i64) -> Result<StoredReview, StoreError>;
}
