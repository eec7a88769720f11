use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use reelgate_models::{
    AddUserMovieReviewRequest, CriticReviewPage, DatedMoviePage, DeleteUserMovieReviewRequest,
    DiscoverMoviesRequest, GenreList, GetUserMovieReviewRequest, ListMoviesRequest, MovieCredits,
    MovieDetails, MovieGenresRequest, MoviePage, MovieRequest, PagedMovieRequest,
    SearchMoviesRequest, UpdateUserMovieReviewRequest, UserReview, UserReviewResponse,
};
use reelgate_store::ReviewStore;
use reelgate_tmdb::MovieCatalog;

use crate::context::{CallContext, UserId};
use crate::error::ServiceError;

/// The orchestrator: one entry point per RPC method.
///
/// Each method checks the context's cancellation state before touching a
/// collaborator, resolves identity where the operation requires one, races
/// the collaborator call against cancellation so an abandoned request
/// releases its pool slot promptly, and maps domain outcomes into
/// [`ServiceError`]. No partial responses.
pub struct Movies {
    catalog: Arc<dyn MovieCatalog>,
    reviews: Arc<dyn ReviewStore>,
}

impl Movies {
    pub fn new(catalog: Arc<dyn MovieCatalog>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self { catalog, reviews }
    }

    fn ensure_live(&self, ctx: &CallContext) -> Result<(), ServiceError> {
        if ctx.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        Ok(())
    }

    /// Review operations require an identity; the validating interceptor is
    /// upstream, so a missing identity here is an upstream contract
    /// violation surfaced as `Unauthenticated`.
    fn identity(&self, ctx: &CallContext) -> Result<UserId, ServiceError> {
        ctx.identity().ok_or(ServiceError::Unauthenticated)
    }

    /// Run one collaborator call, abandoning it if the context is cancelled
    /// first. The biased order means an already-cancelled context never
    /// polls the call at all.
    async fn run<T, E, F>(&self, ctx: &CallContext, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, E>>,
        ServiceError: From<E>,
    {
        tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => Err(ServiceError::Cancelled),
            result = call => result.map_err(ServiceError::from),
        }
    }

    pub async fn get_top_rated_movies(
        &self,
        ctx: &CallContext,
        request: &ListMoviesRequest,
    ) -> Result<MoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.top_rated(request)).await
    }

    pub async fn get_popular_movies(
        &self,
        ctx: &CallContext,
        request: &ListMoviesRequest,
    ) -> Result<MoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.popular(request)).await
    }

    pub async fn get_now_playing_movies(
        &self,
        ctx: &CallContext,
        request: &ListMoviesRequest,
    ) -> Result<DatedMoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.now_playing(request)).await
    }

    pub async fn get_upcoming_movies(
        &self,
        ctx: &CallContext,
        request: &ListMoviesRequest,
    ) -> Result<DatedMoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.upcoming(request)).await
    }

    pub async fn similar_movies(
        &self,
        ctx: &CallContext,
        request: &PagedMovieRequest,
    ) -> Result<MoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.similar(request)).await
    }

    pub async fn search_movies(
        &self,
        ctx: &CallContext,
        request: &SearchMoviesRequest,
    ) -> Result<MoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.search(request)).await
    }

    pub async fn discover_movies(
        &self,
        ctx: &CallContext,
        request: &DiscoverMoviesRequest,
    ) -> Result<MoviePage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.discover(request)).await
    }

    pub async fn get_movie_details(
        &self,
        ctx: &CallContext,
        request: &MovieRequest,
    ) -> Result<MovieDetails, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.details(request)).await
    }

    pub async fn get_movie_credits(
        &self,
        ctx: &CallContext,
        request: &MovieRequest,
    ) -> Result<MovieCredits, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.credits(request)).await
    }

    pub async fn get_movie_reviews(
        &self,
        ctx: &CallContext,
        request: &PagedMovieRequest,
    ) -> Result<CriticReviewPage, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.reviews(request)).await
    }

    pub async fn get_movie_genres(
        &self,
        ctx: &CallContext,
        request: &MovieGenresRequest,
    ) -> Result<GenreList, ServiceError> {
        self.ensure_live(ctx)?;
        self.run(ctx, self.catalog.genres(request)).await
    }

    pub async fn add_user_movie_review(
        &self,
        ctx: &CallContext,
        request: &AddUserMovieReviewRequest,
    ) -> Result<(), ServiceError> {
        self.ensure_live(ctx)?;
        let user_id = self.identity(ctx)?;
        debug!("adding review by user {} for movie {}", user_id, request.id);
        self.run(
            ctx,
            self.reviews
                .add(user_id, request.id, request.rating, &request.review),
        )
        .await
    }

    pub async fn update_user_movie_review(
        &self,
        ctx: &CallContext,
        request: &UpdateUserMovieReviewRequest,
    ) -> Result<(), ServiceError> {
        self.ensure_live(ctx)?;
        let user_id = self.identity(ctx)?;
        self.run(
            ctx,
            self.reviews
                .update(user_id, request.id, request.rating, &request.review),
        )
        .await
    }

    pub async fn delete_user_movie_review(
        &self,
        ctx: &CallContext,
        request: &DeleteUserMovieReviewRequest,
    ) -> Result<(), ServiceError> {
        self.ensure_live(ctx)?;
        let user_id = self.identity(ctx)?;
        self.run(ctx, self.reviews.delete(user_id, request.id)).await
    }

    pub async fn get_user_movie_review(
        &self,
        ctx: &CallContext,
        request: &GetUserMovieReviewRequest,
    ) -> Result<UserReviewResponse, ServiceError> {
        self.ensure_live(ctx)?;
        let user_id = self.identity(ctx)?;
        let stored = self.run(ctx, self.reviews.get(user_id, request.id)).await?;
        Ok(UserReviewResponse {
            user_review: UserReview {
                rating: stored.rating,
                review: stored.review,
                created_at: stored.created_at,
                updated_at: stored.updated_at,
            },
        })
    }
}
