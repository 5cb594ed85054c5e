use crate::sparse::SparseVector;

/// Mixing weights for query reformulation. Not required to sum to 1; the
/// non-relevant centroid is added with its weight as-is, so callers push away
/// from it by passing a negative `gamma`.
#[derive(Debug, Clone, Copy)]
pub struct RocchioWeights {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for RocchioWeights {
    fn default() -> Self {
        Self { alpha: 0.3, beta: 0.3, gamma: 0.3 }
    }
}

/// Reformulate `query` as `alpha*query + beta*mean(relevant) +
/// gamma*mean(non_relevant)`. Empty judgment lists contribute the zero
/// vector, so with no judgments this is just the scaled original query.
pub fn rocchio(
    query: &SparseVector,
    relevant: &[&SparseVector],
    non_relevant: &[&SparseVector],
    weights: RocchioWeights,
) -> SparseVector {
    let relevant_centroid = SparseVector::mean(relevant);
    let non_relevant_centroid = SparseVector::mean(non_relevant);
    query
        .scale(weights.alpha)
        .add(&relevant_centroid.scale(weights.beta))
        .add(&non_relevant_centroid.scale(weights.gamma))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> SparseVector {
        entries.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn no_judgments_and_unit_alpha_returns_the_query() {
        let q = vector(&[("fox", 0.7), ("dog", 0.1)]);
        let weights = RocchioWeights { alpha: 1.0, beta: 0.0, gamma: 0.0 };
        assert_eq!(rocchio(&q, &[], &[], weights), q.scale(1.0));
    }

    #[test]
    fn default_weights_scale_the_query_when_judgments_are_empty() {
        let q = vector(&[("fox", 1.0)]);
        let out = rocchio(&q, &[], &[], RocchioWeights::default());
        assert!((out.get("fox") - 0.3).abs() < 1e-12);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn combines_query_and_centroids() {
        let q = vector(&[("fox", 1.0)]);
        let r1 = vector(&[("fox", 0.5), ("den", 1.0)]);
        let r2 = vector(&[("den", 3.0)]);
        let n = vector(&[("dog", 2.0)]);
        let weights = RocchioWeights { alpha: 1.0, beta: 0.5, gamma: -0.25 };
        let out = rocchio(&q, &[&r1, &r2], &[&n], weights);
        // relevant centroid: fox 0.25, den 2.0
        assert!((out.get("fox") - (1.0 + 0.5 * 0.25)).abs() < 1e-12);
        assert!((out.get("den") - 0.5 * 2.0).abs() < 1e-12);
        assert!((out.get("dog") - (-0.25 * 2.0)).abs() < 1e-12);
    }
}
