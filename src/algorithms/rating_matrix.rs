use crate::models::{CatalogSnapshot, MovieId, UserId};
use crate::utils::LabeledMatrix;
use tracing::{debug, info};

/// User × movie scores. `None` marks an unrated cell, which is distinct
/// from any score on the scale, including zero.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    cells: LabeledMatrix<UserId, MovieId, Option<i32>>,
}

impl RatingMatrix {
    pub fn build(snapshot: &CatalogSnapshot) -> Self {
        if snapshot.users().is_empty()
            || snapshot.ratings().is_empty()
            || snapshot.movies().is_empty()
        {
            info!("Rating matrix is empty: no collaborative signal available");
            return Self::empty();
        }

        let user_ids: Vec<UserId> = snapshot.users().iter().map(|u| u.id).collect();
        let movie_ids: Vec<MovieId> = snapshot.movies().iter().map(|m| m.id).collect();
        let mut cells = LabeledMatrix::filled(user_ids, movie_ids, None);

        let mut skipped = 0usize;
        for rating in snapshot.ratings() {
            if !cells.set(&rating.user_id, &rating.movie_id, Some(rating.rating)) {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {} ratings referencing users or movies outside the snapshot", skipped);
        }

        let matrix = Self { cells };
        info!(
            "Built rating matrix: {} users x {} movies, {} rated cells",
            matrix.user_count(),
            matrix.movie_count(),
            matrix.rated_count()
        );
        matrix
    }

    pub fn empty() -> Self {
        Self {
            cells: LabeledMatrix::filled(Vec::new(), Vec::new(), None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.cells.nrows()
    }

    pub fn movie_count(&self) -> usize {
        self.cells.ncols()
    }

    pub fn rated_count(&self) -> usize {
        self.cells.data().iter().filter(|cell| cell.is_some()).count()
    }

    pub fn user_ids(&self) -> &[UserId] {
        self.cells.row_labels()
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.cells.row_position(&user_id).is_some()
    }

    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<i32> {
        self.cells.get(&user_id, &movie_id).copied().flatten()
    }

    /// Rated cells of a user as `(movie position, score)`, in snapshot order.
    pub fn rated_movies(&self, user_id: UserId) -> Vec<(usize, i32)> {
        self.cells
            .row(&user_id)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(position, cell)| cell.map(|score| (position, score)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dense rows with unrated cells read as 0, one per user in row order.
    pub fn dense_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .data()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.map_or(0.0, f64::from)).collect())
            .collect()
    }
}
