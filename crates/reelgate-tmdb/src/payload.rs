//! Provider-shaped response documents.
//!
//! Every struct deserializes leniently: missing fields fall back to their
//! defaults so a partially populated provider document never fails decoding.
//! Interpretation (URL building, date parsing, enum cross-walks) happens in
//! [`crate::normalize`], not here.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieSummaryPayload {
    pub adult: bool,
    pub genre_ids: Vec<i64>,
    pub id: i64,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieListPayload {
    pub page: i64,
    pub results: Vec<MovieSummaryPayload>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DateRangePayload {
    pub minimum: Option<String>,
    pub maximum: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatedMovieListPayload {
    pub dates: Option<DateRangePayload>,
    pub page: i64,
    pub results: Vec<MovieSummaryPayload>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenrePayload {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenreListPayload {
    pub genres: Vec<GenrePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionCompanyPayload {
    pub id: i64,
    pub logo_path: Option<String>,
    pub name: String,
    pub origin_country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionCountryPayload {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieDetailsPayload {
    pub adult: bool,
    pub budget: i64,
    pub genres: Vec<GenrePayload>,
    pub homepage: String,
    pub id: i64,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub production_companies: Vec<ProductionCompanyPayload>,
    pub production_countries: Vec<ProductionCountryPayload>,
    pub release_date: Option<String>,
    pub revenue: i64,
    pub runtime: i64,
    pub status: String,
    pub tagline: String,
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CastPayload {
    pub adult: bool,
    pub gender: Option<i64>,
    pub id: i64,
    pub known_for_department: String,
    pub name: String,
    pub original_name: String,
    pub popularity: Option<f64>,
    pub profile_path: Option<String>,
    pub cast_id: i64,
    pub character: String,
    pub credit_id: String,
    pub order: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrewPayload {
    pub adult: bool,
    pub gender: Option<i64>,
    pub id: i64,
    pub known_for_department: String,
    pub name: String,
    pub original_name: String,
    pub popularity: Option<f64>,
    pub profile_path: Option<String>,
    pub credit_id: String,
    pub department: String,
    pub job: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreditsPayload {
    pub cast: Vec<CastPayload>,
    pub crew: Vec<CrewPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorDetailsPayload {
    pub name: String,
    pub username: String,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    pub id: String,
    pub author: String,
    pub author_details: Option<AuthorDetailsPayload>,
    pub content: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewListPayload {
    pub page: i64,
    pub results: Vec<ReviewPayload>,
    pub total_pages: i64,
    pub total_results: i64,
}
