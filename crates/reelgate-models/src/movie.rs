use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::company::{ProductionCompany, ProductionCountry};
use crate::genre::Genre;

/// One movie entry on a listing (top rated, popular, search, discover, ...).
///
/// `rating_average_critics` / `rating_count_critics` are the provider's vote
/// aggregates under their wire names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub adult: bool,
    pub genre_ids: Vec<i64>,
    pub id: i64,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_average_critics: Option<f64>,
    pub rating_count_critics: i64,
}

/// The full detail record for a single movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub adult: bool,
    pub budget: i64,
    pub genres: Vec<Genre>,
    pub homepage: String,
    pub id: i64,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub revenue: i64,
    pub runtime: i64,
    pub status: String,
    pub tagline: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_average_critics: Option<f64>,
    pub rating_count_critics: i64,
}

/// A page of movie summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: i64,
    pub results: Vec<MovieSummary>,
    pub total_pages: i64,
    pub total_results: i64,
}

/// Release window carried by the now-playing and upcoming listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<NaiveDate>,
}

/// A page of movie summaries plus the release window it covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedMoviePage {
    pub dates: DateWindow,
    pub page: i64,
    pub results: Vec<MovieSummary>,
    pub total_pages: i64,
    pub total_results: i64,
}
