use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use reelgate_config::TmdbSettings;
use reelgate_models::{
    CriticReviewPage, DatedMoviePage, DiscoverMoviesRequest, GenreList, ListMoviesRequest,
    MovieCredits, MovieDetails, MovieGenresRequest, MoviePage, MovieRequest, PagedMovieRequest,
    SearchMoviesRequest,
};

use crate::catalog::MovieCatalog;
use crate::error::CatalogError;
use crate::normalize::Normalizer;
use crate::payload::{
    CreditsPayload, DatedMovieListPayload, GenreListPayload, MovieDetailsPayload,
    MovieListPayload, ReviewListPayload,
};

type Query = Vec<(&'static str, String)>;

fn push_opt<T: ToString>(query: &mut Query, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

fn list_query(request: &ListMoviesRequest) -> Query {
    let mut query = Query::new();
    push_opt(&mut query, "language", request.language.as_ref());
    push_opt(&mut query, "page", request.page);
    push_opt(&mut query, "region", request.region.as_ref());
    query
}

/// HTTP client for the movie metadata provider.
///
/// Each operation is a single round trip; filters forward verbatim as query
/// parameters and successful payloads are normalized before they leave this
/// type.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    normalizer: Normalizer,
}

impl TmdbClient {
    pub fn new(settings: &TmdbSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            normalizer: Normalizer::new(&settings.image_base_url, settings.images.clone()),
        }
    }

    /// One provider round trip. `id_keyed` lookups classify HTTP 404 as
    /// [`CatalogError::NotFound`]; every other non-success status is fatal.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        id_keyed: bool,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("requesting provider path {}", path);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if id_keyed && status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus(status));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn top_rated(&self, request: &ListMoviesRequest) -> Result<MoviePage, CatalogError> {
        let payload: MovieListPayload = self
            .fetch("/movie/top_rated", &list_query(request), false)
            .await?;
        Ok(self.normalizer.movie_page(Some(&payload)))
    }

    async fn popular(&self, request: &ListMoviesRequest) -> Result<MoviePage, CatalogError> {
        let payload: MovieListPayload = self
            .fetch("/movie/popular", &list_query(request), false)
            .await?;
        Ok(self.normalizer.movie_page(Some(&payload)))
    }

    async fn now_playing(
        &self,
        request: &ListMoviesRequest,
    ) -> Result<DatedMoviePage, CatalogError> {
        let payload: DatedMovieListPayload = self
            .fetch("/movie/now_playing", &list_query(request), false)
            .await?;
        Ok(self.normalizer.dated_movie_page(Some(&payload)))
    }

    async fn upcoming(&self, request: &ListMoviesRequest) -> Result<DatedMoviePage, CatalogError> {
        let payload: DatedMovieListPayload = self
            .fetch("/movie/upcoming", &list_query(request), false)
            .await?;
        Ok(self.normalizer.dated_movie_page(Some(&payload)))
    }

    async fn similar(&self, request: &PagedMovieRequest) -> Result<MoviePage, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "language", request.language.as_ref());
        push_opt(&mut query, "page", request.page);
        let payload: MovieListPayload = self
            .fetch(&format!("/movie/{}/similar", request.id), &query, true)
            .await?;
        Ok(self.normalizer.movie_page(Some(&payload)))
    }

    async fn search(&self, request: &SearchMoviesRequest) -> Result<MoviePage, CatalogError> {
        let mut query = Query::new();
        query.push(("query", request.query.clone()));
        query.push(("include_adult", request.include_adult.to_string()));
        push_opt(&mut query, "language", request.language.as_ref());
        push_opt(&mut query, "page", request.page);
        push_opt(&mut query, "primary_release_year", request.primary_release_year);
        push_opt(&mut query, "region", request.region.as_ref());
        push_opt(&mut query, "year", request.year);
        let payload: MovieListPayload = self.fetch("/search/movie", &query, false).await?;
        Ok(self.normalizer.movie_page(Some(&payload)))
    }

    async fn discover(&self, request: &DiscoverMoviesRequest) -> Result<MoviePage, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "certification", request.certification.as_ref());
        push_opt(
            &mut query,
            "certification_country",
            request.certification_country.as_ref(),
        );
        push_opt(&mut query, "certification.gte", request.certification_gte.as_ref());
        push_opt(&mut query, "certification.lte", request.certification_lte.as_ref());
        query.push(("include_adult", request.include_adult.to_string()));
        query.push(("include_video", request.include_video.to_string()));
        push_opt(&mut query, "language", request.language.as_ref());
        push_opt(&mut query, "page", request.page);
        push_opt(&mut query, "primary_release_year", request.primary_release_year);
        push_opt(
            &mut query,
            "primary_release_date.gte",
            request.primary_release_date_gte.as_ref(),
        );
        push_opt(
            &mut query,
            "primary_release_date.lte",
            request.primary_release_date_lte.as_ref(),
        );
        push_opt(&mut query, "region", request.region.as_ref());
        push_opt(&mut query, "release_date.gte", request.release_date_gte.as_ref());
        push_opt(&mut query, "release_date.lte", request.release_date_lte.as_ref());
        push_opt(&mut query, "sort_by", request.sort_by.as_query());
        push_opt(&mut query, "vote_average.gte", request.vote_average_gte);
        push_opt(&mut query, "vote_average.lte", request.vote_average_lte);
        push_opt(&mut query, "vote_count.gte", request.vote_count_gte);
        push_opt(&mut query, "vote_count.lte", request.vote_count_lte);
        push_opt(&mut query, "watch_region", request.watch_region.as_ref());
        push_opt(&mut query, "with_cast", request.with_cast.as_ref());
        push_opt(&mut query, "with_companies", request.with_companies.as_ref());
        push_opt(&mut query, "with_crew", request.with_crew.as_ref());
        push_opt(&mut query, "with_genres", request.with_genres.as_ref());
        push_opt(&mut query, "with_keywords", request.with_keywords.as_ref());
        push_opt(
            &mut query,
            "with_origin_country",
            request.with_origin_country.as_ref(),
        );
        push_opt(
            &mut query,
            "with_original_language",
            request.with_original_language.as_ref(),
        );
        push_opt(&mut query, "with_people", request.with_people.as_ref());
        push_opt(&mut query, "with_runtime.gte", request.with_runtime_gte);
        push_opt(&mut query, "with_runtime.lte", request.with_runtime_lte);
        let monetization: Vec<&str> = request
            .with_watch_monetization_types
            .iter()
            .filter_map(|t| t.as_query())
            .collect();
        if !monetization.is_empty() {
            query.push(("with_watch_monetization_types", monetization.join("|")));
        }
        push_opt(
            &mut query,
            "with_watch_providers",
            request.with_watch_providers.as_ref(),
        );
        push_opt(&mut query, "without_companies", request.without_companies.as_ref());
        push_opt(&mut query, "without_genres", request.without_genres.as_ref());
        push_opt(&mut query, "without_keywords", request.without_keywords.as_ref());
        push_opt(&mut query, "year", request.year);

        let payload: MovieListPayload = self.fetch("/discover/movie", &query, false).await?;
        Ok(self.normalizer.movie_page(Some(&payload)))
    }

    async fn details(&self, request: &MovieRequest) -> Result<MovieDetails, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "language", request.language.as_ref());
        let payload: MovieDetailsPayload = self
            .fetch(&format!("/movie/{}", request.id), &query, true)
            .await?;
        Ok(self.normalizer.movie_details(Some(&payload)))
    }

    async fn credits(&self, request: &MovieRequest) -> Result<MovieCredits, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "language", request.language.as_ref());
        let payload: CreditsPayload = self
            .fetch(&format!("/movie/{}/credits", request.id), &query, true)
            .await?;
        Ok(self.normalizer.credits(Some(&payload)))
    }

    async fn reviews(&self, request: &PagedMovieRequest) -> Result<CriticReviewPage, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "language", request.language.as_ref());
        push_opt(&mut query, "page", request.page);
        let payload: ReviewListPayload = self
            .fetch(&format!("/movie/{}/reviews", request.id), &query, true)
            .await?;
        Ok(self.normalizer.critic_review_page(Some(&payload)))
    }

    async fn genres(&self, request: &MovieGenresRequest) -> Result<GenreList, CatalogError> {
        let mut query = Query::new();
        push_opt(&mut query, "language", request.language.as_ref());
        let payload: GenreListPayload = self.fetch("/genre/movie/list", &query, false).await?;
        Ok(self.normalizer.genre_list(Some(&payload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reelgate_models::{MonetizationType, SortKey};
    use serde_json::json;

    fn test_client(base_url: String) -> TmdbClient {
        TmdbClient::new(&TmdbSettings {
            api_key: "test-key".to_string(),
            base_url,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_details_404_maps_to_not_found() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/movie/999999");
            then.status(404)
                .json_body(json!({"status_code": 34, "status_message": "not found"}));
        });

        let client = test_client(server.base_url());
        let err = client
            .details(&MovieRequest {
                id: 999_999,
                language: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_details_server_error_is_fatal() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/movie/550");
            then.status(503);
        });

        let client = test_client(server.base_url());
        let err = client
            .details(&MovieRequest {
                id: 550,
                language: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)
        ));
    }

    #[tokio::test]
    async fn test_list_op_404_is_fatal_not_not_found() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/movie/top_rated");
            then.status(404);
        });

        let client = test_client(server.base_url());
        let err = client
            .top_rated(&ListMoviesRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnexpectedStatus(StatusCode::NOT_FOUND)
        ));
    }

    #[tokio::test]
    async fn test_similar_404_maps_to_not_found() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/movie/999999/similar");
            then.status(404);
        });

        let client = test_client(server.base_url());
        let err = client
            .similar(&PagedMovieRequest {
                id: 999_999,
                language: None,
                page: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_top_rated_forwards_filters_and_normalizes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movie/top_rated")
                .query_param("api_key", "test-key")
                .query_param("language", "en-US")
                .query_param("page", "2")
                .query_param("region", "US");
            then.status(200).json_body(json!({
                "page": 2,
                "results": [{
                    "id": 550,
                    "title": "Fight Club",
                    "poster_path": "/poster.jpg",
                    "release_date": "1999-10-15",
                    "vote_average": 8.4,
                    "vote_count": 26280
                }],
                "total_pages": 100,
                "total_results": 2000
            }));
        });

        let client = test_client(server.base_url());
        let page = client
            .top_rated(&ListMoviesRequest {
                language: Some("en-US".to_string()),
                page: Some(2),
                region: Some("US".to_string()),
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Fight Club");
        assert!(page.results[0]
            .poster_url
            .as_deref()
            .unwrap()
            .ends_with("/poster.jpg"));
        assert_eq!(page.total_results, 2000);
    }

    #[tokio::test]
    async fn test_discover_forwards_sort_and_monetization() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/discover/movie")
                .query_param("sort_by", "popularity.desc")
                .query_param("with_watch_monetization_types", "flatrate|ads")
                .query_param("with_genres", "28,12")
                .query_param("include_adult", "false");
            then.status(200).json_body(json!({
                "page": 1,
                "results": [],
                "total_pages": 0,
                "total_results": 0
            }));
        });

        let client = test_client(server.base_url());
        let request = DiscoverMoviesRequest {
            sort_by: SortKey::PopularityDesc,
            with_watch_monetization_types: vec![
                MonetizationType::Flatrate,
                MonetizationType::Unspecified,
                MonetizationType::Ads,
            ],
            with_genres: Some("28,12".to_string()),
            ..Default::default()
        };

        let page = client.discover(&request).await.unwrap();
        mock.assert();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_genres_decodes_list() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/genre/movie/list");
            then.status(200).json_body(json!({
                "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]
            }));
        });

        let client = test_client(server.base_url());
        let list = client
            .genres(&MovieGenresRequest { language: None })
            .await
            .unwrap();

        assert_eq!(list.genres.len(), 2);
        assert_eq!(list.genres[0].name, "Action");
    }

    #[tokio::test]
    async fn test_malformed_body_is_fatal() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/movie/550");
            then.status(200).body("not json");
        });

        let client = test_client(server.base_url());
        let err = client
            .details(&MovieRequest {
                id: 550,
                language: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Http(_)));
    }
}
