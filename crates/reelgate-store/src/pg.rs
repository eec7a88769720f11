use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use reelgate_config::DatabaseSettings;

use crate::error::StoreError;
use crate::{ReviewStore, StoredReview};

/// Stored procedure call texts. The procedures own all existence and
/// uniqueness checks; see `sql/schema.sql`.
const CREATE_USER_REVIEW: &str = "CALL create_user_review($1, $2, $3, $4)";
const UPDATE_USER_REVIEW: &str = "CALL update_user_review($1, $2, $3, $4, $5)";
const DELETE_USER_REVIEW: &str = "CALL delete_user_review($1, $2, $3)";
const GET_USER_REVIEW: &str = "CALL get_user_review($1, $2, $3, $4, $5, $6, $7)";

/// Constraint guaranteeing at most one review per (user, movie) pair.
const UNIQUE_USER_MOVIE_REVIEW: &str = "user_reviews_unique_user_movie_review";

/// Open the connection pool with the configured bounds. Lifetimes match the
/// hour-scale recycling the service has always run with.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .max_lifetime(Duration::from_secs(3600))
        .idle_timeout(Duration::from_secs(3600))
        .connect(&settings.url)
        .await
}

fn is_duplicate_review(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
                && db.constraint() == Some(UNIQUE_USER_MOVIE_REVIEW)
        }
        _ => false,
    }
}

#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn add(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i32,
        review: &str,
    ) -> Result<(), StoreError> {
        debug!("creating review for user {} movie {}", user_id, movie_id);
        sqlx::query(CREATE_USER_REVIEW)
            .bind(user_id)
            .bind(movie_id)
            .bind(rating)
            .bind(review)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_duplicate_review(&err) {
                    StoreError::AlreadyExists
                } else {
                    StoreError::Database(err)
                }
            })?;
        Ok(())
    }

    async fn update(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i32,
        review: &str,
    ) -> Result<(), StoreError> {
        debug!("updating review for user {} movie {}", user_id, movie_id);
        let row = sqlx::query(UPDATE_USER_REVIEW)
            .bind(user_id)
            .bind(movie_id)
            .bind(rating)
            .bind(review)
            .bind(None::<bool>)
            .fetch_one(&self.pool)
            .await?;

        let found: Option<bool> = row.try_get(0)?;
        if !found.unwrap_or(false) {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, user_id: i64, movie_id: i64) -> Result<(), StoreError> {
        debug!("deleting review for user {} movie {}", user_id, movie_id);
        let row = sqlx::query(DELETE_USER_REVIEW)
            .bind(user_id)
            .bind(movie_id)
            .bind(None::<bool>)
            .fetch_one(&self.pool)
            .await?;

        let found: Option<bool> = row.try_get(0)?;
        if !found.unwrap_or(false) {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, user_id: i64, movie_id: i64) -> Result<StoredReview, StoreError> {
        let row = sqlx::query(GET_USER_REVIEW)
            .bind(user_id)
            .bind(movie_id)
            .bind(None::<i32>)
            .bind(None::<String>)
            .bind(None::<DateTime<Utc>>)
            .bind(None::<DateTime<Utc>>)
            .bind(None::<bool>)
            .fetch_one(&self.pool)
            .await?;

        let found: Option<bool> = row.try_get(4)?;
        if !found.unwrap_or(false) {
            return Err(StoreError::NotFound);
        }

        let rating: Option<i32> = row.try_get(0)?;
        let review: Option<String> = row.try_get(1)?;
        Ok(StoredReview {
            rating: rating.ok_or(StoreError::MissingColumn("rating"))?,
            review: review.ok_or(StoreError::MissingColumn("review"))?,
            created_at: row.try_get(2)?,
            updated_at: row.try_get(3)?,
        })
    }
}
