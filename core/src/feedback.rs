use crate::rocchio::{rocchio, RocchioWeights};
use crate::tfidf::TfIdfIndex;
use crate::DocId;
use anyhow::Result;
use std::cmp::Ordering;

/// The primary full-text search system that produces the baseline ranked
/// list. Implemented by the surrounding retrieval pipeline, never here; the
/// feedback loop only consumes it.
pub trait BaselineSearch {
    fn fetch_baseline_results(&self, query: &str) -> Result<Vec<DocId>>;
}

/// Run one feedback round: fetch the baseline candidates for `query`,
/// reformulate the query vector from the relevance judgments, and return the
/// candidates reordered by cosine similarity to the reformulated query,
/// highest first. Judged or candidate ids unknown to the index are dropped.
/// A failed baseline fetch fails the round; no partial ranking is produced.
pub fn rerank_with_feedback<B: BaselineSearch>(
    index: &TfIdfIndex,
    baseline: &B,
    query: &str,
    relevants: &[DocId],
    non_relevants: &[DocId],
    weights: RocchioWeights,
) -> Result<Vec<(DocId, f64)>> {
    let candidates = baseline.fetch_baseline_results(query)?;
    let query_vector = index.vectorize_query(query);
    let relevant_vectors = index.vectors_for(relevants);
    let non_relevant_vectors = index.vectors_for(non_relevants);
    let reformulated = rocchio(&query_vector, &relevant_vectors, &non_relevant_vectors, weights);

    let mut ranked: Vec<(DocId, f64)> = candidates
        .into_iter()
        .filter_map(|id| {
            index
                .get(id)
                .map(|vector| (id, reformulated.cosine_similarity(vector)))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
