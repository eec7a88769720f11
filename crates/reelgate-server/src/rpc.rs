//! Connect-style RPC transport: one `POST /movies.v1.MoviesService/<Method>`
//! route per method, JSON request and response bodies.
//!
//! This layer carries no domain logic. It builds a fresh [`CallContext`] per
//! request — identity from the `x-user-id` header the authenticating gateway
//! injects after validating the caller's token, cancellation chained to the
//! process shutdown token — and maps [`ServiceError`] onto HTTP statuses.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::error;

use reelgate_models::{
    AddUserMovieReviewRequest, DeleteUserMovieReviewRequest, DiscoverMoviesRequest,
    GetUserMovieReviewRequest, ListMoviesRequest, MovieGenresRequest, MovieRequest,
    PagedMovieRequest, SearchMoviesRequest, UpdateUserMovieReviewRequest,
};
use reelgate_service::{CallContext, ErrorCode, Movies, ServiceError};

/// Header set by the auth gateway once the caller's token has been
/// validated. Token validation itself never happens in this process.
const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<Movies>,
    pub shutdown: CancellationToken,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/movies.v1.MoviesService/GetTopRatedMovies",
            post(get_top_rated_movies),
        )
        .route(
            "/movies.v1.MoviesService/GetPopularMovies",
            post(get_popular_movies),
        )
        .route(
            "/movies.v1.MoviesService/GetNowPlayingMovies",
            post(get_now_playing_movies),
        )
        .route(
            "/movies.v1.MoviesService/GetUpcomingMovies",
            post(get_upcoming_movies),
        )
        .route("/movies.v1.MoviesService/SimilarMovies", post(similar_movies))
        .route("/movies.v1.MoviesService/SearchMovies", post(search_movies))
        .route("/movies.v1.MoviesService/DiscoverMovies", post(discover_movies))
        .route(
            "/movies.v1.MoviesService/GetMovieDetails",
            post(get_movie_details),
        )
        .route(
            "/movies.v1.MoviesService/GetMovieCredits",
            post(get_movie_credits),
        )
        .route(
            "/movies.v1.MoviesService/GetMovieReviews",
            post(get_movie_reviews),
        )
        .route(
            "/movies.v1.MoviesService/GetMovieGenres",
            post(get_movie_genres),
        )
        .route(
            "/movies.v1.MoviesService/AddUserMovieReview",
            post(add_user_movie_review),
        )
        .route(
            "/movies.v1.MoviesService/UpdateUserMovieReview",
            post(update_user_movie_review),
        )
        .route(
            "/movies.v1.MoviesService/DeleteUserMovieReview",
            post(delete_user_movie_review),
        )
        .route(
            "/movies.v1.MoviesService/GetUserMovieReview",
            post(get_user_movie_review),
        )
        .with_state(Arc::new(state))
}

fn call_context(state: &AppState, headers: &HeaderMap) -> CallContext {
    let mut ctx = CallContext::new().with_cancellation(state.shutdown.child_token());
    if let Some(user_id) = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
    {
        ctx = ctx.with_identity(user_id);
    }
    ctx
}

#[derive(Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

struct RpcError(ServiceError);

impl From<ServiceError> for RpcError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists => StatusCode::CONFLICT,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Cancelled => StatusCode::REQUEST_TIMEOUT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        // Internal causes are logged here and stay opaque on the wire.
        let message = match &self.0 {
            ServiceError::Internal(cause) => {
                error!("request failed: {:#}", cause);
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status_for(code), Json(ErrorBody { code, message })).into_response()
    }
}

macro_rules! rpc_handler {
    ($name:ident, $request:ty, $method:ident) => {
        async fn $name(
            State(state): State<Arc<AppState>>,
            headers: HeaderMap,
            Json(request): Json<$request>,
        ) -> Result<Response, RpcError> {
            let ctx = call_context(&state, &headers);
            let response = state.movies.$method(&ctx, &request).await?;
            Ok(Json(response).into_response())
        }
    };
}

rpc_handler!(get_top_rated_movies, ListMoviesRequest, get_top_rated_movies);
rpc_handler!(get_popular_movies, ListMoviesRequest, get_popular_movies);
rpc_handler!(get_now_playing_movies, ListMoviesRequest, get_now_playing_movies);
rpc_handler!(get_upcoming_movies, ListMoviesRequest, get_upcoming_movies);
rpc_handler!(similar_movies, PagedMovieRequest, similar_movies);
rpc_handler!(search_movies, SearchMoviesRequest, search_movies);
rpc_handler!(discover_movies, DiscoverMoviesRequest, discover_movies);
rpc_handler!(get_movie_details, MovieRequest, get_movie_details);
rpc_handler!(get_movie_credits, MovieRequest, get_movie_credits);
rpc_handler!(get_movie_reviews, PagedMovieRequest, get_movie_reviews);
rpc_handler!(get_movie_genres, MovieGenresRequest, get_movie_genres);
rpc_handler!(get_user_movie_review, GetUserMovieReviewRequest, get_user_movie_review);

// The mutating review calls return an empty object on success.

async fn add_user_movie_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AddUserMovieReviewRequest>,
) -> Result<Json<Value>, RpcError> {
    let ctx = call_context(&state, &headers);
    state.movies.add_user_movie_review(&ctx, &request).await?;
    Ok(Json(json!({})))
}

async fn update_user_movie_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateUserMovieReviewRequest>,
) -> Result<Json<Value>, RpcError> {
    let ctx = call_context(&state, &headers);
    state.movies.update_user_movie_review(&ctx, &request).await?;
    Ok(Json(json!({})))
}

async fn delete_user_movie_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<DeleteUserMovieReviewRequest>,
) -> Result<Json<Value>, RpcError> {
    let ctx = call_context(&state, &headers);
    state.movies.delete_user_movie_review(&ctx, &request).await?;
    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use reelgate_config::TmdbSettings;
    use reelgate_store::PgReviewStore;
    use reelgate_tmdb::TmdbClient;
    use tower::ServiceExt;

    /// A router whose collaborators are never reached by the tested paths:
    /// the lazy pool opens no connection and the catalog client sends
    /// nothing unless a catalog route is dispatched.
    fn test_router() -> Router {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/reelgate_unreachable")
            .unwrap();
        let movies = Movies::new(
            Arc::new(TmdbClient::new(&TmdbSettings {
                api_key: "unused".to_string(),
                ..Default::default()
            })),
            Arc::new(PgReviewStore::new(pool)),
        );
        create_router(AppState {
            movies: Arc::new(movies),
            shutdown: CancellationToken::new(),
        })
    }

    fn post_json(path: &str, body: &str, user_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(user_id) = user_id {
            builder = builder.header(USER_ID_HEADER, user_id);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_review_call_without_identity_is_unauthorized() {
        let response = test_router()
            .oneshot(post_json(
                "/movies.v1.MoviesService/AddUserMovieReview",
                r#"{"id": 100, "rating": 4, "review": "ok"}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_malformed_identity_header_is_ignored() {
        let response = test_router()
            .oneshot(post_json(
                "/movies.v1.MoviesService/GetUserMovieReview",
                r#"{"id": 100}"#,
                Some("not-a-number"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_method_is_not_routed() {
        let response = test_router()
            .oneshot(post_json(
                "/movies.v1.MoviesService/FrobnicateMovies",
                "{}",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_mapping_covers_every_code() {
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::AlreadyExists), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_for(ErrorCode::Cancelled), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            status_for(ErrorCode::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
