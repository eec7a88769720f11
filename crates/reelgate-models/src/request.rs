use serde::{Deserialize, Serialize};

/// Filters shared by the plain movie listings (top rated, popular,
/// now playing, upcoming).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMoviesRequest {
    pub language: Option<String>,
    pub page: Option<u32>,
    pub region: Option<String>,
}

/// An id-keyed lookup (details, credits).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRequest {
    pub id: i64,
    #[serde(default)]
    pub language: Option<String>,
}

/// An id-keyed, paged lookup (similar movies, critic reviews).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedMovieRequest {
    pub id: i64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMoviesRequest {
    pub query: String,
    #[serde(default)]
    pub include_adult: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub primary_release_year: Option<i32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieGenresRequest {
    pub language: Option<String>,
}

/// Create a review for the movie `id`. The owning user comes from the
/// authenticated call context, never from the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddUserMovieReviewRequest {
    pub id: i64,
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserMovieReviewRequest {
    pub id: i64,
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserMovieReviewRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUserMovieReviewRequest {
    pub id: i64,
}
