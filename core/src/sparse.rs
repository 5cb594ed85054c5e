use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term -> weight mapping. Absent terms carry weight 0; zero-weight entries
/// are never stored by the vectorizer. Serializes as a plain JSON object, so
/// this is also the wire shape of a query or document vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseVector {
    weights: HashMap<String, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: String, weight: f64) {
        self.weights.insert(term, weight);
    }

    /// Weight of `term`, 0 when absent.
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Union of terms, weights summed.
    pub fn add(&self, other: &SparseVector) -> SparseVector {
        let mut weights = self.weights.clone();
        for (term, weight) in &other.weights {
            *weights.entry(term.clone()).or_insert(0.0) += weight;
        }
        SparseVector { weights }
    }

    /// Every weight multiplied by `factor`. Negative factors turn `add` into
    /// subtraction.
    pub fn scale(&self, factor: f64) -> SparseVector {
        let weights = self
            .weights
            .iter()
            .map(|(t, w)| (t.clone(), w * factor))
            .collect();
        SparseVector { weights }
    }

    /// Centroid of `vectors`. The mean of an empty list is the empty vector,
    /// which lets a missing judgment set drop out of Rocchio instead of
    /// failing it.
    pub fn mean(vectors: &[&SparseVector]) -> SparseVector {
        if vectors.is_empty() {
            return SparseVector::new();
        }
        let mut sum = SparseVector::new();
        for vector in vectors {
            sum = sum.add(vector);
        }
        sum.scale(1.0 / vectors.len() as f64)
    }

    /// Dot product over the intersection of terms.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        self.weights
            .iter()
            .filter_map(|(term, weight)| other.weights.get(term).map(|w| weight * w))
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Angular closeness in [-1, 1]. A zero-norm vector has no direction to
    /// compare, so either side being zero yields 0 rather than NaN.
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return 0.0;
        }
        self.dot(other) / norms
    }
}

impl FromIterator<(String, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        SparseVector { weights: iter.into_iter().collect() }
    }
}
