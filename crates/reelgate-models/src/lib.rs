pub mod company;
pub mod credits;
pub mod discover;
pub mod genre;
pub mod movie;
pub mod request;
pub mod review;

pub use company::{ProductionCompany, ProductionCountry};
pub use credits::{CastMember, CrewMember, Gender, MovieCredits};
pub use discover::{DiscoverMoviesRequest, MonetizationType, SortKey};
pub use genre::{Genre, GenreList};
pub use movie::{DateWindow, DatedMoviePage, MovieDetails, MoviePage, MovieSummary};
pub use request::{
    AddUserMovieReviewRequest, DeleteUserMovieReviewRequest, GetUserMovieReviewRequest,
    ListMoviesRequest, MovieGenresRequest, MovieRequest, PagedMovieRequest, SearchMoviesRequest,
    UpdateUserMovieReviewRequest,
};
pub use review::{CriticAuthor, CriticReview, CriticReviewPage, UserReview, UserReviewResponse};
