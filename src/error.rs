use crate::models::{MovieId, UserId};

/// Raised when a catalog snapshot violates its construction contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Duplicate rating for user {user_id} and movie {movie_id}")]
    DuplicateRating { user_id: UserId, movie_id: MovieId },

    #[error("Rating {score} by user {user_id} for movie {movie_id} is outside {min}..={max}")]
    RatingOutOfRange {
        user_id: UserId,
        movie_id: MovieId,
        score: i32,
        min: i32,
        max: i32,
    },

    #[error("Duplicate movie id: {0}")]
    DuplicateMovie(MovieId),

    #[error("Duplicate user id: {0}")]
    DuplicateUser(UserId),

    #[error("Invalid rating scale: min {min} is greater than max {max}")]
    InvalidScale { min: i32, max: i32 },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
