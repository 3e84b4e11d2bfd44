use crate::error::SnapshotResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type MovieId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub plot_summary: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: i32,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Inclusive range of valid rating scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: i32,
    pub max: i32,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl RatingScale {
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Raw catalog contents as delivered by a catalog source, not yet validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl CatalogData {
    pub fn into_snapshot(self, scale: RatingScale) -> SnapshotResult<CatalogSnapshot> {
        CatalogSnapshot::new(self.movies, self.users, self.ratings, scale)
    }
}

/// Frozen view of movies, users and ratings for one computation session.
///
/// The fields are private so a snapshot can only be obtained through
/// validation, and never changes once built.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    movies: Vec<Movie>,
    users: Vec<User>,
    ratings: Vec<Rating>,
}

impl CatalogSnapshot {
    pub fn new(
        movies: Vec<Movie>,
        users: Vec<User>,
        ratings: Vec<Rating>,
        scale: RatingScale,
    ) -> SnapshotResult<Self> {
        crate::utils::validation::validate_snapshot(&movies, &users, &ratings, &scale)?;
        Ok(Self {
            movies,
            users,
            ratings,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.users.is_empty() && self.ratings.is_empty()
    }
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            genres: Vec::new(),
            director: None,
            cast: Vec::new(),
            plot_summary: None,
            average_rating: None,
            poster_url: None,
            trailer_url: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cast<I, S>(mut self, cast: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cast = cast.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot_summary = Some(plot.into());
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Text document used for content similarity: genres, cast, director and
    /// plot, in that order. Absent fields contribute an empty string.
    pub fn document(&self) -> String {
        format!(
            "{} {} {} {}",
            self.genres.join(" "),
            self.cast.join(" "),
            self.director.as_deref().unwrap_or(""),
            self.plot_summary.as_deref().unwrap_or(""),
        )
    }
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            registration_date: None,
            preferred_genres: Vec::new(),
        }
    }
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: i32) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            timestamp: Some(Utc::now()),
        }
    }
}
