use async_trait::async_trait;

use reelgate_models::{
    CriticReviewPage, DatedMoviePage, DiscoverMoviesRequest, GenreList, ListMoviesRequest,
    MovieCredits, MovieDetails, MovieGenresRequest, MoviePage, MovieRequest, PagedMovieRequest,
    SearchMoviesRequest,
};

use crate::error::CatalogError;

/// One operation per catalog query, returning wire-model records.
///
/// Implementations classify transport outcomes into [`CatalogError`] and
/// hand successful payloads to the normalizer; callers never see
/// provider-shaped documents.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn top_rated(&self, request: &ListMoviesRequest) -> Result<MoviePage, CatalogError>;
    async fn popular(&self, request: &ListMoviesRequest) -> Result<MoviePage, CatalogError>;
    async fn now_playing(&self, request: &ListMoviesRequest)
        -> Result<DatedMoviePage, CatalogError>;
    async fn upcoming(&self, request: &ListMoviesRequest) -> Result<DatedMoviePage, CatalogError>;
    async fn similar(&self, request: &PagedMovieRequest) -> Result<MoviePage, CatalogError>;
    async fn search(&self, request: &SearchMoviesRequest) -> Result<MoviePage, CatalogError>;
    async fn discover(&self, request: &DiscoverMoviesRequest) -> Result<MoviePage, CatalogError>;
    async fn details(&self, request: &MovieRequest) -> Result<MovieDetails, CatalogError>;
    async fn credits(&self, request: &MovieRequest) -> Result<MovieCredits, CatalogError>;
    async fn reviews(&self, request: &PagedMovieRequest)
        -> Result<CriticReviewPage, CatalogError>;
    async fn genres(&self, request: &MovieGenresRequest) -> Result<GenreList, CatalogError>;
}
