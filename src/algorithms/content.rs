use super::tfidf::TfidfVectorizer;
use crate::models::{Movie, MovieId};
use crate::utils::{self, LabeledMatrix};
use ndarray::Array2;
use std::time::Instant;
use tracing::info;

/// All-pairs content similarity between movies, keyed by snapshot position.
#[derive(Debug, Clone)]
pub struct ContentSimilarityIndex {
    similarity: LabeledMatrix<MovieId, MovieId, f64>,
    vocabulary_size: usize,
}

impl ContentSimilarityIndex {
    pub fn build(movies: &[Movie]) -> Self {
        Self::build_with(movies, &TfidfVectorizer::english())
    }

    pub fn build_with(movies: &[Movie], vectorizer: &TfidfVectorizer) -> Self {
        let started = Instant::now();
        let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();
        let documents: Vec<String> = movies.iter().map(Movie::document).collect();

        let model = vectorizer.fit_transform(&documents);
        let vocabulary_size = model.vocabulary_size();

        let matrix = if vocabulary_size == 0 {
            // Nothing to compare: only a movie is similar to itself.
            Array2::eye(ids.len())
        } else {
            let vectors = model.into_vectors();
            utils::pairwise_similarity(&vectors, |a, b| a.dot(b).clamp(0.0, 1.0))
        };

        info!(
            "Built content similarity index: {} movies, {} terms in {:?}",
            ids.len(),
            vocabulary_size,
            started.elapsed()
        );

        Self {
            similarity: LabeledMatrix::from_parts(ids.clone(), ids, matrix),
            vocabulary_size,
        }
    }

    pub fn len(&self) -> usize {
        self.similarity.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.similarity.nrows() == 0
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn position(&self, movie_id: MovieId) -> Option<usize> {
        self.similarity.row_position(&movie_id)
    }

    pub fn score(&self, a: MovieId, b: MovieId) -> Option<f64> {
        self.similarity.get(&a, &b).copied()
    }

    pub fn matrix(&self) -> &Array2<f64> {
        self.similarity.data()
    }

    /// Other movies ranked by descending similarity to `movie_id`, as
    /// `(position, score)`. Ties keep snapshot order. Unknown ids yield an
    /// empty list.
    pub fn similar_movies(&self, movie_id: MovieId, count: usize) -> Vec<(usize, f64)> {
        let Some(own) = self.position(movie_id) else {
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

        let mut ranked = utils::rank_positions(&scores);
        ranked.truncate(count);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Movie> {
        vec![
            Movie::new(1, "A").with_genres(["Drama"]).with_plot("lighthouse keeper"),
            Movie::new(2, "B").with_genres(["Drama"]).with_plot("orbital station"),
            Movie::new(3, "C").with_genres(["Comedy"]).with_plot("wedding caterer"),
            Movie::new(4, "D").with_genres(["Comedy"]).with_plot("lighthouse wedding"),
        ]
    }

    #[test]
    fn test_shared_genre_ranks_first() {
        let index = ContentSimilarityIndex::build(&catalog()[..3]);
        let ranked: Vec<usize> = index.similar_movies(1, 2).into_iter().map(|(p, _)| p).collect();
        assert_eq!(ranked, vec![1, 2]);
        assert!(index.score(1, 2).unwrap() > index.score(1, 3).unwrap());
        assert_eq!(index.score(1, 3), Some(0.0));
    }

    #[test]
    fn test_excludes_self_and_respects_count() {
        let index = ContentSimilarityIndex::build(&catalog());
        for movie in catalog() {
            let own = index.position(movie.id).unwrap();
            let similar = index.similar_movies(movie.id, 2);
            assert!(similar.len() <= 2);
            assert!(similar.iter().all(|(p, _)| *p != own));
            assert!(similar.windows(2).all(|w| w[0].1 >= w[1].1));
        }
        assert!(index.similar_movies(1, 0).is_empty());
        assert_eq!(index.similar_movies(1, 10).len(), 3);
    }

    #[test]
    fn test_scores_in_unit_range_with_unit_diagonal() {
        let index = ContentSimilarityIndex::build(&catalog());
        let m = index.matrix();
        for i in 0..m.nrows() {
            assert!((m[(i, i)] - 1.0).abs() < 1e-9);
            for j in 0..m.ncols() {
                assert!((0.0..=1.0).contains(&m[(i, j)]));
                assert_eq!(m[(i, j)], m[(j, i)]);
            }
        }
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let movies = vec![
            Movie::new(10, "X").with_genres(["Western"]),
            Movie::new(11, "Y").with_genres(["Noir"]),
            Movie::new(12, "Z").with_genres(["Musical"]),
            Movie::new(13, "W").with_genres(["Noir"]),
        ];
        let index = ContentSimilarityIndex::build(&movies);
        let ranked: Vec<usize> = index.similar_movies(10, 3).into_iter().map(|(p, _)| p).collect();
        assert_eq!(ranked, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_and_empty() {
        let empty = ContentSimilarityIndex::build(&[]);
        assert!(empty.is_empty());
        assert!(empty.similar_movies(1, 5).is_empty());

        let index = ContentSimilarityIndex::build(&catalog());
        assert!(index.similar_movies(999, 5).is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_identity() {
        let movies = vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")];
        let index = ContentSimilarityIndex::build(&movies);
        assert_eq!(index.vocabulary_size(), 0);
        assert_eq!(index.score(1, 1), Some(1.0));
        assert_eq!(index.score(1, 2), Some(0.0));
        let ranked: Vec<usize> = index.similar_movies(2, 5).into_iter().map(|(p, _)| p).collect();
        assert_eq!(ranked, vec![0, 2]);
    }

    #[test]
    fn test_rebuild_is_bit_identical() {
        let first = ContentSimilarityIndex::build(&catalog());
        let second = ContentSimilarityIndex::build(&catalog());
        let a: Vec<u64> = first.matrix().iter().map(|v| v.to_bits()).collect();
        let b: Vec<u64> = second.matrix().iter().map(|v| v.to_bits()).collect();
        assert_eq!(a, b);
    }
}
