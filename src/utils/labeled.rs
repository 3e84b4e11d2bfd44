//! Two-dimensional array with identifier-labelled axes.

use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;
use std::hash::Hash;

/// A dense matrix whose rows and columns are addressed by identifier as well
/// as by position. Axis order is the order the labels were supplied in.
#[derive(Debug, Clone)]
pub struct LabeledMatrix<R, C, T> {
    row_labels: Vec<R>,
    row_index: HashMap<R, usize>,
    col_index: HashMap<C, usize>,
    data: Array2<T>,
}

impl<R, C, T> LabeledMatrix<R, C, T>
where
    R: Copy + Eq + Hash,
    C: Copy + Eq + Hash,
    T: Clone,
{
    /// Builds a matrix with every cell set to `fill`. Repeated labels keep
    /// their first position.
    pub fn filled(row_labels: Vec<R>, col_labels: Vec<C>, fill: T) -> Self {
        let data = Array2::from_elem((row_labels.len(), col_labels.len()), fill);
        Self::from_parts(row_labels, col_labels, data)
    }

    /// `data` must be `row_labels.len()` by `col_labels.len()`.
    pub(crate) fn from_parts(row_labels: Vec<R>, col_labels: Vec<C>, data: Array2<T>) -> Self {
        debug_assert_eq!(data.dim(), (row_labels.len(), col_labels.len()));
        let row_index = index_of(&row_labels);
        let col_index = index_of(&col_labels);
        Self {
            row_labels,
            row_index,
            col_index,
            data,
        }
    }

    pub fn row_position(&self, label: &R) -> Option<usize> {
        self.row_index.get(label).copied()
    }

    pub fn col_position(&self, label: &C) -> Option<usize> {
        self.col_index.get(label).copied()
    }

    pub fn row_label(&self, position: usize) -> Option<R> {
        self.row_labels.get(position).copied()
    }

    pub fn row_labels(&self) -> &[R] {
        &self.row_labels
    }

    pub fn get(&self, row: &R, col: &C) -> Option<&T> {
        let r = self.row_position(row)?;
        let c = self.col_position(col)?;
        self.data.get((r, c))
    }

    pub fn set(&mut self, row: &R, col: &C, value: T) -> bool {
        match (self.row_position(row), self.col_position(col)) {
            (Some(r), Some(c)) => {
                self.data[(r, c)] = value;
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, label: &R) -> Option<ArrayView1<'_, T>> {
        self.row_position(label).map(|r| self.data.row(r))
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// True when either axis has no labels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn index_of<L: Copy + Eq + Hash>(labels: &[L]) -> HashMap<L, usize> {
    let mut index = HashMap::with_capacity(labels.len());
    for (position, label) in labels.iter().enumerate() {
        index.entry(*label).or_insert(position);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_label() {
        let mut m: LabeledMatrix<i64, i64, Option<i32>> =
            LabeledMatrix::filled(vec![10, 20], vec![7, 8, 9], None);

        assert!(m.set(&20, &9, Some(4)));
        assert!(!m.set(&30, &9, Some(1)));

        assert_eq!(m.get(&20, &9), Some(&Some(4)));
        assert_eq!(m.get(&10, &9), Some(&None));
        assert_eq!(m.get(&99, &9), None);
        assert_eq!(m.row_position(&20), Some(1));
        assert_eq!(m.col_position(&9), Some(2));
        assert_eq!(m.row(&20).unwrap().to_vec(), vec![None, None, Some(4)]);
    }

    #[test]
    fn test_from_parts_keeps_label_order() {
        let data = Array2::from_shape_vec((2, 2), vec![1.0, 0.5, 0.5, 1.0]).unwrap();
        let m = LabeledMatrix::from_parts(vec![9, 3], vec![9, 3], data);

        assert_eq!(m.row_labels(), &[9, 3]);
        assert_eq!(m.row_label(1), Some(3));
        assert_eq!(m.get(&3, &9), Some(&0.5));
        assert_eq!(m.get(&3, &3), Some(&1.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_from_parts_rejects_shape_mismatch() {
        let data: Array2<f64> = Array2::zeros((2, 3));
        LabeledMatrix::from_parts(vec![1, 2], vec![1, 2], data);
    }

    #[test]
    fn test_empty_axis() {
        let m: LabeledMatrix<i64, i64, f64> = LabeledMatrix::filled(vec![1, 2], vec![], 0.0);
        assert!(m.is_empty());
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 0);
    }
}
