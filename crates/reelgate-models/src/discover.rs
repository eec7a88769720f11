use serde::{Deserialize, Serialize};

/// Sort order accepted by the discover operation. Unknown wire values
/// deserialize to `Unspecified` and are omitted from the provider query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PopularityAsc,
    PopularityDesc,
    RevenueAsc,
    RevenueDesc,
    PrimaryReleaseDateAsc,
    PrimaryReleaseDateDesc,
    OriginalTitleAsc,
    OriginalTitleDesc,
    VoteAverageAsc,
    VoteAverageDesc,
    VoteCountAsc,
    VoteCountDesc,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl SortKey {
    /// Cross-walk to the provider's `sort_by` query value.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            SortKey::Unspecified => None,
            SortKey::PopularityAsc => Some("popularity.asc"),
            SortKey::PopularityDesc => Some("popularity.desc"),
            SortKey::RevenueAsc => Some("revenue.asc"),
            SortKey::RevenueDesc => Some("revenue.desc"),
            SortKey::PrimaryReleaseDateAsc => Some("primary_release_date.asc"),
            SortKey::PrimaryReleaseDateDesc => Some("primary_release_date.desc"),
            SortKey::OriginalTitleAsc => Some("original_title.asc"),
            SortKey::OriginalTitleDesc => Some("original_title.desc"),
            SortKey::VoteAverageAsc => Some("vote_average.asc"),
            SortKey::VoteAverageDesc => Some("vote_average.desc"),
            SortKey::VoteCountAsc => Some("vote_count.asc"),
            SortKey::VoteCountDesc => Some("vote_count.desc"),
        }
    }
}

/// How a watch provider monetizes a title. Unknown wire values deserialize
/// to `Unspecified` and are dropped from the provider query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonetizationType {
    Flatrate,
    Free,
    Ads,
    Rent,
    Buy,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl MonetizationType {
    /// Cross-walk to the provider's `with_watch_monetization_types` value.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            MonetizationType::Unspecified => None,
            MonetizationType::Flatrate => Some("flatrate"),
            MonetizationType::Free => Some("free"),
            MonetizationType::Ads => Some("ads"),
            MonetizationType::Rent => Some("rent"),
            MonetizationType::Buy => Some("buy"),
        }
    }
}

/// The discover filter set, forwarded verbatim to the provider. Date bounds
/// are `YYYY-MM-DD` strings and the `with_`/`without_` list filters use the
/// provider's comma/pipe separated syntax; this service does not interpret
/// either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverMoviesRequest {
    pub certification: Option<String>,
    pub certification_country: Option<String>,
    pub certification_gte: Option<String>,
    pub certification_lte: Option<String>,
    pub include_adult: bool,
    pub include_video: bool,
    pub language: Option<String>,
    pub page: Option<u32>,
    pub primary_release_year: Option<i32>,
    pub primary_release_date_gte: Option<String>,
    pub primary_release_date_lte: Option<String>,
    pub region: Option<String>,
    pub release_date_gte: Option<String>,
    pub release_date_lte: Option<String>,
    pub sort_by: SortKey,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub vote_count_gte: Option<i64>,
    pub vote_count_lte: Option<i64>,
    pub watch_region: Option<String>,
    pub with_cast: Option<String>,
    pub with_companies: Option<String>,
    pub with_crew: Option<String>,
    pub with_genres: Option<String>,
    pub with_keywords: Option<String>,
    pub with_origin_country: Option<String>,
    pub with_original_language: Option<String>,
    pub with_people: Option<String>,
    pub with_runtime_gte: Option<i64>,
    pub with_runtime_lte: Option<i64>,
    pub with_watch_monetization_types: Vec<MonetizationType>,
    pub with_watch_providers: Option<String>,
    pub without_companies: Option<String>,
    pub without_genres: Option<String>,
    pub without_keywords: Option<String>,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_query_values() {
        assert_eq!(SortKey::PopularityDesc.as_query(), Some("popularity.desc"));
        assert_eq!(SortKey::VoteCountAsc.as_query(), Some("vote_count.asc"));
        assert_eq!(SortKey::Unspecified.as_query(), None);
    }

    #[test]
    fn test_unknown_sort_key_deserializes_to_unspecified() {
        let key: SortKey = serde_json::from_str("\"release_velocity.desc\"").unwrap();
        assert_eq!(key, SortKey::Unspecified);
    }

    #[test]
    fn test_unknown_monetization_type_deserializes_to_unspecified() {
        let t: MonetizationType = serde_json::from_str("\"barter\"").unwrap();
        assert_eq!(t, MonetizationType::Unspecified);
        assert_eq!(t.as_query(), None);
    }

    #[test]
    fn test_discover_request_accepts_partial_body() {
        let req: DiscoverMoviesRequest =
            serde_json::from_str(r#"{"with_genres": "28,12", "sort_by": "popularity.desc"}"#)
                .unwrap();
        assert_eq!(req.with_genres.as_deref(), Some("28,12"));
        assert_eq!(req.sort_by, SortKey::PopularityDesc);
        assert_eq!(req.page, None);
        assert!(!req.include_adult);
    }
}
