use super::rating_matrix::RatingMatrix;
use crate::models::UserId;
use crate::utils::{self, LabeledMatrix};
use std::time::Instant;
use tracing::info;

/// Cosine similarity between users' rating rows.
///
/// Unrated cells count as 0 in both the dot product and the norms, so users
/// who rated few movies in common with many ratings elsewhere score low. A
/// user with no ratings has similarity 0 with everyone, including itself.
#[derive(Debug, Clone)]
pub struct UserSimilarityModel {
    similarity: LabeledMatrix<UserId, UserId, f64>,
}

impl UserSimilarityModel {
    pub fn build(ratings: &RatingMatrix) -> Self {
        let started = Instant::now();
        let ids = ratings.user_ids().to_vec();

        let rows = ratings.dense_rows();
        let matrix = utils::pairwise_similarity(&rows, |a, b| {
            utils::cosine_similarity(a, b).clamp(-1.0, 1.0)
        });

        info!(
            "Built user similarity model: {} users in {:?}",
            ids.len(),
            started.elapsed()
        );

        Self {
            similarity: LabeledMatrix::from_parts(ids.clone(), ids, matrix),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.similarity.nrows() == 0
    }

    pub fn score(&self, a: UserId, b: UserId) -> Option<f64> {
        self.similarity.get(&a, &b).copied()
    }

    /// Every other user by descending similarity, ties in matrix row order.
    /// Zero and negative scores are included.
    pub fn similar_users(&self, user_id: UserId) -> Vec<(UserId, f64)> {
        let Some(own) = self.similarity.row_position(&user_id) else {
            return Vec::new();
        };

        let scores: Vec<(usize, f64)> = self
            .similarity
            .data()
            .row(own)
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != own)
            .map(|(position, score)| (position, *score))
            .collect();

        utils::rank_positions(&scores)
            .into_iter()
            .filter_map(|(position, score)| {
                self.similarity.row_label(position).map(|id| (id, score))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    fn model(ratings: Vec<Rating>) -> UserSimilarityModel {
        let snapshot = CatalogSnapshot::new(
            vec![Movie::new(1, "X"), Movie::new(2, "Y"), Movie::new(3, "Z")],
            vec![User::new(1, "a"), User::new(2, "b"), User::new(3, "c"), User::new(4, "d")],
            ratings,
            RatingScale::default(),
        )
        .unwrap();
        UserSimilarityModel::build(&RatingMatrix::build(&snapshot))
    }

    #[test]
    fn test_cosine_over_rating_rows() {
        let m = model(vec![
            Rating::new(1, 1, 5),
            Rating::new(2, 1, 5),
            Rating::new(2, 2, 5),
            Rating::new(3, 3, 2),
        ]);

        let expected = 25.0 / (5.0 * 50f64.sqrt());
        assert!((m.score(1, 2).unwrap() - expected).abs() < 1e-12);
        assert_eq!(m.score(1, 3), Some(0.0));
        assert!((m.score(1, 1).unwrap() - 1.0).abs() < 1e-12);
        // user 4 rated nothing
        assert_eq!(m.score(4, 4), Some(0.0));
        assert_eq!(m.score(4, 1), Some(0.0));
    }

    #[test]
    fn test_similar_users_order() {
        let m = model(vec![
            Rating::new(1, 1, 5),
            Rating::new(2, 1, 5),
            Rating::new(2, 2, 5),
            Rating::new(3, 1, 4),
        ]);

        let similar = m.similar_users(1);
        let ids: Vec<UserId> = similar.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![3, 2, 4]);
        assert!(similar.iter().all(|(id, _)| *id != 1));
        assert_eq!(similar[2].1, 0.0);
    }

    #[test]
    fn test_unknown_user_and_empty_model() {
        let m = model(vec![Rating::new(1, 1, 5)]);
        assert!(m.similar_users(77).is_empty());

        let empty = UserSimilarityModel::build(&RatingMatrix::empty());
        assert!(empty.is_empty());
        assert!(empty.similar_users(1).is_empty());
    }
}
