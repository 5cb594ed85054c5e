use crate::corpus::Corpus;
use crate::sparse::SparseVector;
use crate::tokenizer::normalize;
use crate::DocId;
use std::collections::{HashMap, HashSet};

/// Document frequency: term -> number of distinct documents containing it.
/// Terms never observed in the corpus are simply absent.
pub type Df = HashMap<String, u32>;

/// One pass over the corpus. A document contributes at most 1 per term, no
/// matter how often the term repeats inside it.
pub fn compute_df(corpus: &Corpus) -> Df {
    let mut df: Df = HashMap::new();
    for doc in corpus.iter() {
        let distinct: HashSet<&str> = doc
            .title_tokens
            .iter()
            .chain(doc.overview_tokens.iter())
            .map(String::as_str)
            .collect();
        for term in distinct {
            *df.entry(term.to_string()).or_insert(0) += 1;
        }
    }
    df
}

fn idf(df: u32, collection_size: u32) -> f64 {
    (f64::from(collection_size + 1) / f64::from(df + 1)).ln()
}

// tf divides by the number of distinct terms in the document, not the token
// count. Every similarity score depends on this divisor.
fn weigh_tokens<'a, I>(tokens: I, df: &Df, collection_size: u32) -> SparseVector
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    let distinct = counts.len() as f64;
    let mut vector = SparseVector::new();
    for (term, count) in counts {
        let tf = f64::from(count) / distinct;
        let term_df = df.get(term).copied().unwrap_or(0);
        let weight = tf * idf(term_df, collection_size);
        if weight != 0.0 {
            vector.insert(term.to_string(), weight);
        }
    }
    vector
}

/// Weigh free query text against a known document frequency map. Terms absent
/// from `df` score the maximum idf for the collection size. Both parameters
/// are required; there is no fallback that silently rebuilds them.
pub fn vectorize_query(text: &str, df: &Df, collection_size: u32) -> SparseVector {
    let tokens = normalize(text);
    weigh_tokens(tokens.iter().map(String::as_str), df, collection_size)
}

/// The in-memory index: one tf-idf vector per document plus the corpus
/// statistics queries are weighed against. Built once, read-only afterwards.
pub struct TfIdfIndex {
    vectors: HashMap<DocId, SparseVector>,
    df: Df,
    num_docs: u32,
}

impl TfIdfIndex {
    pub fn build(corpus: &Corpus) -> Self {
        let df = compute_df(corpus);
        let num_docs = corpus.len() as u32;
        let mut vectors = HashMap::with_capacity(corpus.len());
        for doc in corpus.iter() {
            let tokens = doc
                .title_tokens
                .iter()
                .chain(doc.overview_tokens.iter())
                .map(String::as_str);
            vectors.insert(doc.id, weigh_tokens(tokens, &df, num_docs));
        }
        tracing::info!(num_docs, vocabulary = df.len(), "tf-idf index built");
        Self { vectors, df, num_docs }
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn df(&self) -> &Df {
        &self.df
    }

    pub fn get(&self, id: DocId) -> Option<&SparseVector> {
        self.vectors.get(&id)
    }

    /// Vectors for the given ids. Ids not present in the index are dropped;
    /// partial judgment sets are expected client behavior, not a fault.
    pub fn vectors_for(&self, ids: &[DocId]) -> Vec<&SparseVector> {
        ids.iter().filter_map(|id| self.vectors.get(id)).collect()
    }

    pub fn vectorize_query(&self, text: &str) -> SparseVector {
        vectorize_query(text, &self.df, self.num_docs)
    }

    /// Cosine similarity of `query` against every document in the index.
    /// Nothing is filtered or truncated; ranking is the caller's job.
    pub fn score(&self, query: &SparseVector) -> HashMap<DocId, f64> {
        self.vectors
            .iter()
            .map(|(id, vector)| (*id, query.cosine_similarity(vector)))
            .collect()
    }
}
