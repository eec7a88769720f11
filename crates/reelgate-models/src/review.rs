use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author block attached to a critic review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticAuthor {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A review published on the provider by a critic, as opposed to a
/// [`UserReview`] authored through this service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticReview {
    pub id: String,
    pub author: String,
    pub author_details: CriticAuthor,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticReviewPage {
    pub critic_reviews: Vec<CriticReview>,
    pub page: i64,
    pub total_pages: i64,
    pub total_results: i64,
}

/// The one persisted entity: a review a user wrote for a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReview {
    pub rating: i32,
    pub review: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReviewResponse {
    pub user_review: UserReview,
}
