use crate::error::{SnapshotError, SnapshotResult};
use crate::models::*;
use std::collections::HashSet;

pub fn validate_rating_scale(scale: &RatingScale) -> SnapshotResult<()> {
    if scale.min > scale.max {
        return Err(SnapshotError::InvalidScale {
            min: scale.min,
            max: scale.max,
        });
    }
    Ok(())
}

pub fn validate_movies(movies: &[Movie]) -> SnapshotResult<()> {
    let mut seen = HashSet::with_capacity(movies.len());
    for movie in movies {
        if !seen.insert(movie.id) {
            return Err(SnapshotError::DuplicateMovie(movie.id));
        }
    }
    Ok(())
}

pub fn validate_users(users: &[User]) -> SnapshotResult<()> {
    let mut seen = HashSet::with_capacity(users.len());
    for user in users {
        if !seen.insert(user.id) {
            return Err(SnapshotError::DuplicateUser(user.id));
        }
    }
    Ok(())
}

/// Ratings referencing unknown users or movies are allowed here; the rating
/// matrix skips them. Only duplicates and out-of-scale scores are rejected.
pub fn validate_ratings(ratings: &[Rating], scale: &RatingScale) -> SnapshotResult<()> {
    let mut seen = HashSet::with_capacity(ratings.len());

    for rating in ratings {
        if !scale.contains(rating.rating) {
            return Err(SnapshotError::RatingOutOfRange {
                user_id: rating.user_id,
                movie_id: rating.movie_id,
                score: rating.rating,
                min: scale.min,
                max: scale.max,
            });
        }

        if !seen.insert((rating.user_id, rating.movie_id)) {
            return Err(SnapshotError::DuplicateRating {
                user_id: rating.user_id,
                movie_id: rating.movie_id,
            });
        }
    }

    Ok(())
}

pub fn validate_snapshot(
    movies: &[Movie],
    users: &[User],
    ratings: &[Rating],
    scale: &RatingScale,
) -> SnapshotResult<()> {
    validate_rating_scale(scale)?;
    validate_movies(movies)?;
    validate_users(users)?;
    validate_ratings(ratings, scale)
}

pub fn sanitize_string(input: &str, max_length: usize) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .take(max_length)
        .collect()
}
