use ndarray::Array2;
use rayon::prelude::*;
use std::cmp::Ordering;

pub mod labeled;
pub mod validation;

pub use labeled::LabeledMatrix;

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn l2_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot(a, b) / (norm_a * norm_b)
    }
}

/// Symmetric matrix of `kernel(vectors[i], vectors[j])` over all pairs.
///
/// Rows are computed in parallel. Each cell of the upper triangle is
/// evaluated exactly once and mirrored, so the result does not depend on
/// scheduling.
pub fn pairwise_similarity<V, F>(vectors: &[V], kernel: F) -> Array2<f64>
where
    V: Sync,
    F: Fn(&V, &V) -> f64 + Sync,
{
    let n = vectors.len();

    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| (i..n).map(|j| kernel(&vectors[i], &vectors[j])).collect())
        .collect();

    let mut matrix = Array2::zeros((n, n));
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, value) in row.into_iter().enumerate() {
            let j = i + offset;
            matrix[(i, j)] = value;
            matrix[(j, i)] = value;
        }
    }
    matrix
}

/// Descending score order; NaN compares equal so it never panics.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Positions ranked by descending score, ties kept in position order.
pub fn rank_positions(scores: &[(usize, f64)]) -> Vec<(usize, f64)> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| by_score_desc(a.1, b.1).then(a.0.cmp(&b.0)));
    ranked
}
