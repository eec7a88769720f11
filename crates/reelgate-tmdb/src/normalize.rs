//! Mapping from provider payloads to the wire model.
//!
//! Every function here is total: an absent payload maps to the wire type's
//! zero value, an unparseable date or unknown enum code maps to
//! absent/unspecified. Normalization never fails a request.

use chrono::{DateTime, NaiveDate, Utc};

use reelgate_config::ImageSettings;
use reelgate_models::{
    CastMember, CrewMember, CriticAuthor, CriticReview, CriticReviewPage, DateWindow,
    DatedMoviePage, Gender, Genre, GenreList, MovieCredits, MovieDetails, MoviePage, MovieSummary,
    ProductionCompany, ProductionCountry,
};

use crate::payload::{
    AuthorDetailsPayload, CastPayload, CreditsPayload, CrewPayload, DateRangePayload,
    DatedMovieListPayload, GenreListPayload, GenrePayload, MovieDetailsPayload, MovieListPayload,
    MovieSummaryPayload, ProductionCompanyPayload, ProductionCountryPayload, ReviewListPayload,
    ReviewPayload,
};

/// Parse a provider `YYYY-MM-DD` date; anything unparseable is absent.
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?, "%Y-%m-%d").ok()
}

/// Parse an RFC3339 timestamp; anything unparseable is absent.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Stateless except for the configured image endpoint and width tiers.
#[derive(Debug, Clone)]
pub struct Normalizer {
    image_base_url: String,
    images: ImageSettings,
}

impl Normalizer {
    pub fn new(image_base_url: impl Into<String>, images: ImageSettings) -> Self {
        Self {
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
            images,
        }
    }

    /// Combine a relative image path with a width tier into an absolute URL.
    /// An absent or empty path yields no URL.
    fn image_url(&self, width: u32, path: Option<&str>) -> Option<String> {
        let path = path?;
        let path = path.strip_prefix('/').unwrap_or(path);
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/w{}/{}", self.image_base_url, width, path))
    }

    pub fn movie_summary(&self, payload: Option<&MovieSummaryPayload>) -> MovieSummary {
        let Some(p) = payload else {
            return MovieSummary::default();
        };
        MovieSummary {
            adult: p.adult,
            genre_ids: p.genre_ids.clone(),
            id: p.id,
            original_language: p.original_language.clone(),
            original_title: p.original_title.clone(),
            overview: p.overview.clone(),
            popularity: p.popularity,
            poster_url: self.image_url(self.images.movie_poster_width, p.poster_path.as_deref()),
            release_date: parse_date(p.release_date.as_deref()),
            title: p.title.clone(),
            rating_average_critics: p.vote_average,
            rating_count_critics: p.vote_count,
        }
    }

    pub fn movie_summaries(&self, payloads: &[MovieSummaryPayload]) -> Vec<MovieSummary> {
        payloads.iter().map(|p| self.movie_summary(Some(p))).collect()
    }

    pub fn movie_page(&self, payload: Option<&MovieListPayload>) -> MoviePage {
        let Some(p) = payload else {
            return MoviePage::default();
        };
        MoviePage {
            page: p.page,
            results: self.movie_summaries(&p.results),
            total_pages: p.total_pages,
            total_results: p.total_results,
        }
    }

    pub fn date_window(&self, payload: Option<&DateRangePayload>) -> DateWindow {
        let Some(p) = payload else {
            return DateWindow::default();
        };
        DateWindow {
            minimum: parse_date(p.minimum.as_deref()),
            maximum: parse_date(p.maximum.as_deref()),
        }
    }

    pub fn dated_movie_page(&self, payload: Option<&DatedMovieListPayload>) -> DatedMoviePage {
        let Some(p) = payload else {
            return DatedMoviePage::default();
        };
        DatedMoviePage {
            dates: self.date_window(p.dates.as_ref()),
            page: p.page,
            results: self.movie_summaries(&p.results),
            total_pages: p.total_pages,
            total_results: p.total_results,
        }
    }

    pub fn genre(&self, payload: Option<&GenrePayload>) -> Genre {
        let Some(p) = payload else {
            return Genre::default();
        };
        Genre {
            id: p.id,
            name: p.name.clone(),
        }
    }

    pub fn genre_list(&self, payload: Option<&GenreListPayload>) -> GenreList {
        let Some(p) = payload else {
            return GenreList::default();
        };
        GenreList {
            genres: p.genres.iter().map(|g| self.genre(Some(g))).collect(),
        }
    }

    pub fn production_company(
        &self,
        payload: Option<&ProductionCompanyPayload>,
    ) -> ProductionCompany {
        let Some(p) = payload else {
            return ProductionCompany::default();
        };
        ProductionCompany {
            id: p.id,
            logo_url: self.image_url(self.images.company_logo_width, p.logo_path.as_deref()),
            name: p.name.clone(),
            origin_country: p.origin_country.clone(),
        }
    }

    pub fn production_country(
        &self,
        payload: Option<&ProductionCountryPayload>,
    ) -> ProductionCountry {
        let Some(p) = payload else {
            return ProductionCountry::default();
        };
        ProductionCountry {
            iso_3166_1: p.iso_3166_1.clone(),
            name: p.name.clone(),
        }
    }

    pub fn movie_details(&self, payload: Option<&MovieDetailsPayload>) -> MovieDetails {
        let Some(p) = payload else {
            return MovieDetails::default();
        };
        MovieDetails {
            adult: p.adult,
            budget: p.budget,
            genres: p.genres.iter().map(|g| self.genre(Some(g))).collect(),
            homepage: p.homepage.clone(),
            id: p.id,
            original_language: p.original_language.clone(),
            original_title: p.original_title.clone(),
            overview: p.overview.clone(),
            popularity: p.popularity,
            poster_url: self.image_url(self.images.detail_poster_width, p.poster_path.as_deref()),
            production_companies: p
                .production_companies
                .iter()
                .map(|c| self.production_company(Some(c)))
                .collect(),
            production_countries: p
                .production_countries
                .iter()
                .map(|c| self.production_country(Some(c)))
                .collect(),
            release_date: parse_date(p.release_date.as_deref()),
            revenue: p.revenue,
            runtime: p.runtime,
            status: p.status.clone(),
            tagline: p.tagline.clone(),
            title: p.title.clone(),
            rating_average_critics: p.vote_average,
            rating_count_critics: p.vote_count,
        }
    }

    pub fn cast_member(&self, payload: Option<&CastPayload>) -> CastMember {
        let Some(p) = payload else {
            return CastMember::default();
        };
        CastMember {
            adult: p.adult,
            gender: Gender::from_provider(p.gender),
            id: p.id,
            known_department: p.known_for_department.clone(),
            name: p.name.clone(),
            original_name: p.original_name.clone(),
            popularity: p.popularity,
            profile_url: self.image_url(self.images.cast_profile_width, p.profile_path.as_deref()),
            cast_id: p.cast_id,
            character: p.character.clone(),
            credit_id: p.credit_id.clone(),
            order: p.order,
        }
    }

    pub fn crew_member(&self, payload: Option<&CrewPayload>) -> CrewMember {
        let Some(p) = payload else {
            return CrewMember::default();
        };
        CrewMember {
            adult: p.adult,
            gender: Gender::from_provider(p.gender),
            id: p.id,
            known_department: p.known_for_department.clone(),
            name: p.name.clone(),
            original_name: p.original_name.clone(),
            popularity: p.popularity,
            profile_url: self.image_url(self.images.crew_profile_width, p.profile_path.as_deref()),
            credit_id: p.credit_id.clone(),
            department: p.department.clone(),
            job: p.job.clone(),
        }
    }

    pub fn credits(&self, payload: Option<&CreditsPayload>) -> MovieCredits {
        let Some(p) = payload else {
            return MovieCredits::default();
        };
        MovieCredits {
            cast: p.cast.iter().map(|c| self.cast_member(Some(c))).collect(),
            crew: p.crew.iter().map(|c| self.crew_member(Some(c))).collect(),
        }
    }

    pub fn critic_author(&self, payload: Option<&AuthorDetailsPayload>) -> CriticAuthor {
        let Some(p) = payload else {
            return CriticAuthor::default();
        };
        CriticAuthor {
            name: p.name.clone(),
            username: p.username.clone(),
            avatar_url: self
                .image_url(self.images.reviewer_avatar_width, p.avatar_path.as_deref()),
            rating: p.rating,
        }
    }

    pub fn critic_review(&self, payload: Option<&ReviewPayload>) -> CriticReview {
        let Some(p) = payload else {
            return CriticReview::default();
        };
        CriticReview {
            id: p.id.clone(),
            author: p.author.clone(),
            author_details: self.critic_author(p.author_details.as_ref()),
            content: p.content.clone(),
            created_at: parse_timestamp(p.created_at.as_deref()),
            updated_at: parse_timestamp(p.updated_at.as_deref()),
            url: p.url.clone(),
        }
    }

    pub fn critic_review_page(&self, payload: Option<&ReviewListPayload>) -> CriticReviewPage {
        let Some(p) = payload else {
            return CriticReviewPage::default();
        };
        CriticReviewPage {
            critic_reviews: p.results.iter().map(|r| self.critic_review(Some(r))).collect(),
            page: p.page,
            total_pages: p.total_pages,
            total_results: p.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new("https://image.tmdb.org/t/p", ImageSettings::default())
    }

    fn summary_payload(poster_path: Option<&str>) -> MovieSummaryPayload {
        MovieSummaryPayload {
            id: 550,
            title: "Fight Club".to_string(),
            original_title: "Fight Club".to_string(),
            original_language: "en".to_string(),
            overview: "An insomniac office worker...".to_string(),
            poster_path: poster_path.map(|p| p.to_string()),
            release_date: Some("1999-10-15".to_string()),
            popularity: Some(61.4),
            vote_average: Some(8.4),
            vote_count: 26280,
            ..Default::default()
        }
    }

    #[test]
    fn test_poster_url_present_iff_poster_path_nonempty() {
        let n = normalizer();

        let with_path = n.movie_summary(Some(&summary_payload(Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"))));
        assert_eq!(
            with_path.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );

        let empty_path = n.movie_summary(Some(&summary_payload(Some(""))));
        assert_eq!(empty_path.poster_url, None);

        let no_path = n.movie_summary(Some(&summary_payload(None)));
        assert_eq!(no_path.poster_url, None);
    }

    #[test]
    fn test_image_url_keeps_paths_without_leading_slash() {
        let n = normalizer();
        assert_eq!(
            n.image_url(300, Some("abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w300/abc.jpg")
        );
    }

    #[test]
    fn test_absent_payloads_normalize_to_zero_values() {
        let n = normalizer();
        assert_eq!(n.movie_summary(None), MovieSummary::default());
        assert_eq!(n.movie_page(None), MoviePage::default());
        assert_eq!(n.dated_movie_page(None), DatedMoviePage::default());
        assert_eq!(n.date_window(None), DateWindow::default());
        assert_eq!(n.movie_details(None), MovieDetails::default());
        assert_eq!(n.genre(None), Genre::default());
        assert_eq!(n.genre_list(None), GenreList::default());
        assert_eq!(n.production_company(None), ProductionCompany::default());
        assert_eq!(n.production_country(None), ProductionCountry::default());
        assert_eq!(n.cast_member(None), CastMember::default());
        assert_eq!(n.crew_member(None), CrewMember::default());
        assert_eq!(n.credits(None), MovieCredits::default());
        assert_eq!(n.critic_author(None), CriticAuthor::default());
        assert_eq!(n.critic_review(None), CriticReview::default());
        assert_eq!(n.critic_review_page(None), CriticReviewPage::default());
    }

    #[test]
    fn test_unparseable_release_date_is_absent() {
        let n = normalizer();
        let mut payload = summary_payload(None);

        payload.release_date = Some("15/10/1999".to_string());
        assert_eq!(n.movie_summary(Some(&payload)).release_date, None);

        payload.release_date = Some(String::new());
        assert_eq!(n.movie_summary(Some(&payload)).release_date, None);

        payload.release_date = Some("1999-10-15".to_string());
        assert_eq!(
            n.movie_summary(Some(&payload)).release_date,
            NaiveDate::from_ymd_opt(1999, 10, 15)
        );
    }

    #[test]
    fn test_absent_numeric_fields_stay_absent() {
        let n = normalizer();
        let mut payload = summary_payload(None);
        payload.popularity = None;
        payload.vote_average = None;

        let summary = n.movie_summary(Some(&payload));
        assert_eq!(summary.popularity, None);
        assert_eq!(summary.rating_average_critics, None);
    }

    #[test]
    fn test_details_uses_detail_poster_tier() {
        let n = normalizer();
        let payload = MovieDetailsPayload {
            id: 550,
            poster_path: Some("/poster.jpg".to_string()),
            ..Default::default()
        };

        let details = n.movie_details(Some(&payload));
        assert_eq!(
            details.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }

    #[test]
    fn test_company_logo_tier_and_absent_logo() {
        let n = normalizer();

        let with_logo = n.production_company(Some(&ProductionCompanyPayload {
            id: 508,
            logo_path: Some("/logo.png".to_string()),
            name: "Regency".to_string(),
            origin_country: "US".to_string(),
        }));
        assert_eq!(
            with_logo.logo_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w92/logo.png")
        );

        let without_logo = n.production_company(Some(&ProductionCompanyPayload {
            id: 711,
            logo_path: None,
            name: "Fox 2000".to_string(),
            origin_country: "US".to_string(),
        }));
        assert_eq!(without_logo.logo_url, None);
    }

    #[test]
    fn test_cast_member_gender_crosswalk() {
        let n = normalizer();

        let known = n.cast_member(Some(&CastPayload {
            gender: Some(2),
            name: "Edward Norton".to_string(),
            ..Default::default()
        }));
        assert_eq!(known.gender, Gender::Male);

        let unknown = n.cast_member(Some(&CastPayload {
            gender: Some(9),
            ..Default::default()
        }));
        assert_eq!(unknown.gender, Gender::Unspecified);

        let missing = n.cast_member(Some(&CastPayload::default()));
        assert_eq!(missing.gender, Gender::Unspecified);
    }

    #[test]
    fn test_critic_review_timestamps_are_lossy_tolerant() {
        let n = normalizer();
        let review = n.critic_review(Some(&ReviewPayload {
            id: "5b1c13b9c3a36848f2026384".to_string(),
            author: "Goddard".to_string(),
            created_at: Some("2018-06-09T17:51:53.359Z".to_string()),
            updated_at: Some("not a timestamp".to_string()),
            ..Default::default()
        }));

        assert!(review.created_at.is_some());
        assert_eq!(review.updated_at, None);
        // Missing author block degrades to the zero author, not an error.
        assert_eq!(review.author_details, CriticAuthor::default());
    }

    #[test]
    fn test_dated_page_parses_window() {
        let n = normalizer();
        let page = n.dated_movie_page(Some(&DatedMovieListPayload {
            dates: Some(DateRangePayload {
                minimum: Some("2026-07-01".to_string()),
                maximum: Some("garbage".to_string()),
            }),
            page: 1,
            results: vec![summary_payload(None)],
            total_pages: 3,
            total_results: 55,
        }));

        assert_eq!(page.dates.minimum, NaiveDate::from_ymd_opt(2026, 7, 1));
        assert_eq!(page.dates.maximum, None);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.total_results, 55);
    }

    #[test]
    fn test_avatar_uses_reviewer_tier() {
        let n = normalizer();
        let author = n.critic_author(Some(&AuthorDetailsPayload {
            name: "Goddard".to_string(),
            username: "goddard".to_string(),
            avatar_path: Some("/avatar.png".to_string()),
            rating: Some(9.0),
        }));
        assert_eq!(
            author.avatar_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w45/avatar.png")
        );
    }
}
