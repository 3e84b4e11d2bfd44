pub mod content;
pub mod rating_matrix;
pub mod stopwords;
pub mod tfidf;
pub mod user_similarity;

pub use content::ContentSimilarityIndex;
pub use rating_matrix::RatingMatrix;
pub use user_similarity::UserSimilarityModel;

use crate::models::*;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Content,
    Collaborative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub movie: Movie,
    pub score: f64,
    pub source: RecommendationSource,
}

/// Content-based, collaborative and hybrid recommendations over one
/// catalog snapshot.
///
/// All indexes are built in [`Recommender::new`] and never change; every
/// operation only reads. Unknown ids and missing data yield empty lists.
#[derive(Debug, Clone)]
pub struct Recommender {
    snapshot: CatalogSnapshot,
    content: ContentSimilarityIndex,
    ratings: RatingMatrix,
    users: UserSimilarityModel,
}

impl Recommender {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let started = Instant::now();
        let content = ContentSimilarityIndex::build(snapshot.movies());
        let ratings = RatingMatrix::build(&snapshot);
        let users = UserSimilarityModel::build(&ratings);

        info!(
            "Recommender ready: {} movies, {} users, {} ratings in {:?}",
            snapshot.movies().len(),
            snapshot.users().len(),
            snapshot.ratings().len(),
            started.elapsed()
        );

        Self {
            snapshot,
            content,
            ratings,
            users,
        }
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn content_index(&self) -> &ContentSimilarityIndex {
        &self.content
    }

    pub fn rating_matrix(&self) -> &RatingMatrix {
        &self.ratings
    }

    pub fn user_similarity(&self) -> &UserSimilarityModel {
        &self.users
    }

    pub fn content_based_recommendations(&self, movie_id: MovieId, count: usize) -> Vec<Movie> {
        into_movies(self.content_based_scored(movie_id, count))
    }

    pub fn collaborative_recommendations(&self, user_id: UserId, count: usize) -> Vec<Movie> {
        into_movies(self.collaborative_scored(user_id, count))
    }

    pub fn hybrid_recommendations(
        &self,
        user_id: UserId,
        movie_id: Option<MovieId>,
        count: usize,
    ) -> Vec<Movie> {
        into_movies(self.hybrid_scored(user_id, movie_id, count))
    }

    pub fn content_based_scored(&self, movie_id: MovieId, count: usize) -> Vec<RecommendationItem> {
        let items: Vec<RecommendationItem> = self
            .content
            .similar_movies(movie_id, count)
            .into_iter()
            .map(|(position, score)| self.item(position, score, RecommendationSource::Content))
            .collect();

        debug!("Content recommendations for movie {}: {} items", movie_id, items.len());
        items
    }

    /// Scores unseen movies by `sum(rating * similarity)` over positively
    /// similar users.
    pub fn collaborative_scored(&self, user_id: UserId, count: usize) -> Vec<RecommendationItem> {
        if self.ratings.is_empty() || !self.ratings.contains_user(user_id) {
            return Vec::new();
        }

        let seen: HashSet<usize> = self
            .ratings
            .rated_movies(user_id)
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        if seen.is_empty() {
            debug!("User {} has no ratings, no collaborative basis", user_id);
            return Vec::new();
        }

        let mut scores: HashMap<usize, f64> = HashMap::new();
        for (other, similarity) in self.users.similar_users(user_id) {
            if similarity <= 0.0 {
                continue;
            }
            for (position, rating) in self.ratings.rated_movies(other) {
                if !seen.contains(&position) {
                    *scores.entry(position).or_insert(0.0) += f64::from(rating) * similarity;
                }
            }
        }

        let candidates: Vec<(usize, f64)> = scores.into_iter().collect();
        let items: Vec<RecommendationItem> = utils::rank_positions(&candidates)
            .into_iter()
            .take(count)
            .map(|(position, score)| self.item(position, score, RecommendationSource::Collaborative))
            .collect();

        debug!("Collaborative recommendations for user {}: {} items", user_id, items.len());
        items
    }

    /// Collaborative results first, then content results for `movie_id`
    /// that are not already included, up to `count`.
    pub fn hybrid_scored(
        &self,
        user_id: UserId,
        movie_id: Option<MovieId>,
        count: usize,
    ) -> Vec<RecommendationItem> {
        let mut merged = self.collaborative_scored(user_id, count);
        merged.truncate(count);

        if let Some(movie_id) = movie_id {
            let mut included: HashSet<MovieId> = merged.iter().map(|item| item.movie.id).collect();
            for item in self.content_based_scored(movie_id, count) {
                if merged.len() >= count {
                    break;
                }
                if included.insert(item.movie.id) {
                    merged.push(item);
                }
            }
        }

        merged
    }

    fn item(&self, position: usize, score: f64, source: RecommendationSource) -> RecommendationItem {
        RecommendationItem {
            movie: self.snapshot.movies()[position].clone(),
            score,
            source,
        }
    }
}

fn into_movies(items: Vec<RecommendationItem>) -> Vec<Movie> {
    items.into_iter().map(|item| item.movie).collect()
}
