//! Sparse TF-IDF weighting over a corpus-wide vocabulary.
//!
//! Weighting follows the smoothed variant:
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), then each document vector is L2-normalised
//! ```
//!
//! Tokens are maximal runs of alphanumeric characters or `_`, lowercased,
//! at least two characters long, with stop words removed.

use super::stopwords::StopWords;
use std::collections::{BTreeMap, BTreeSet};

/// Sparse vector stored as `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Entries may arrive in any order; duplicates are summed.
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (index, weight) in entries {
            *merged.entry(index).or_insert(0.0) += weight;
        }
        Self {
            entries: merged.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Splits text into lowercase word tokens of two or more characters,
/// dropping stop words.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if current.chars().count() >= 2 && !stop_words.contains(current) {
            tokens.push(current.clone());
        }
        current.clear();
    };

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            flush(&mut current, &mut tokens);
        }
    }
    if !current.is_empty() {
        flush(&mut current, &mut tokens);
    }

    tokens
}

/// Result of fitting a corpus: the vocabulary, per-term idf, and one
/// normalised vector per input document, in input order.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TfidfModel {
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<SparseVector> {
        self.vectors
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::english()
    }
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn english() -> Self {
        Self::new(StopWords::english().clone())
    }

    /// Learns the vocabulary from `documents` and returns their weighted
    /// vectors. Terms are indexed in lexicographic order.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfModel {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref(), &self.stop_words))
            .collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect();

        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|tokens| {
                let mut tf = BTreeMap::new();
                for token in tokens {
                    if let Some(&index) = vocabulary.get(token) {
                        *tf.entry(index).or_insert(0) += 1;
                    }
                }
                tf
            })
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tf in &counts {
            for &index in tf.keys() {
                doc_freq[index] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                let mut vector = SparseVector::from_entries(
                    tf.into_iter()
                        .map(|(index, count)| (index, count as f64 * idf[index])),
                );
                vector.normalize();
                vector
            })
            .collect();

        TfidfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}
