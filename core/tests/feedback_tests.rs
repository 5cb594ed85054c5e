use anyhow::{bail, Result};
use vsm_core::corpus::{Corpus, DocumentRecord};
use vsm_core::feedback::{rerank_with_feedback, BaselineSearch};
use vsm_core::rocchio::RocchioWeights;
use vsm_core::tfidf::TfIdfIndex;
use vsm_core::DocId;

struct FixedBaseline(Vec<DocId>);

impl BaselineSearch for FixedBaseline {
    fn fetch_baseline_results(&self, _query: &str) -> Result<Vec<DocId>> {
        Ok(self.0.clone())
    }
}

struct FailingBaseline;

impl BaselineSearch for FailingBaseline {
    fn fetch_baseline_results(&self, _query: &str) -> Result<Vec<DocId>> {
        bail!("baseline unavailable")
    }
}

fn record(id: DocId, overview: &str) -> DocumentRecord {
    DocumentRecord { id, title: String::new(), overview: overview.into() }
}

fn index() -> TfIdfIndex {
    let corpus = Corpus::from_records(vec![
        record(0, "A fast fox jumps over the den"),
        record(1, "A fast fast dog sleeps"),
        record(2, "Galactic empire crumbles"),
    ])
    .unwrap();
    TfIdfIndex::build(&corpus)
}

#[test]
fn reranks_baseline_candidates_by_similarity() {
    let index = index();
    let baseline = FixedBaseline(vec![2, 1, 0]);
    let ranked = rerank_with_feedback(
        &index,
        &baseline,
        "fox jumps",
        &[],
        &[],
        RocchioWeights::default(),
    )
    .unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].0, 0);
    assert!(ranked[0].1 > ranked[1].1);
}

#[test]
fn relevant_judgments_pull_the_ranking() {
    let index = index();
    let baseline = FixedBaseline(vec![0, 1, 2]);
    // Query matches nothing; only the judgment on doc 2 gives it direction.
    let ranked = rerank_with_feedback(
        &index,
        &baseline,
        "unrelated words",
        &[2],
        &[],
        RocchioWeights::default(),
    )
    .unwrap();
    assert_eq!(ranked[0].0, 2);
    assert!(ranked[0].1 > 0.0);
}

#[test]
fn candidates_missing_from_the_index_are_dropped() {
    let index = index();
    let baseline = FixedBaseline(vec![0, 77, 2]);
    let ranked = rerank_with_feedback(
        &index,
        &baseline,
        "fox",
        &[],
        &[],
        RocchioWeights::default(),
    )
    .unwrap();
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|(id, _)| *id != 77));
}

#[test]
fn baseline_failure_fails_the_round() {
    let index = index();
    let result = rerank_with_feedback(
        &index,
        &FailingBaseline,
        "fox",
        &[],
        &[],
        RocchioWeights::default(),
    );
    assert!(result.is_err());
}
