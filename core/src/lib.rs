pub mod corpus;
pub mod feedback;
pub mod rocchio;
pub mod sparse;
pub mod tfidf;
pub mod tokenizer;

pub type DocId = u32;

pub use corpus::{Corpus, Document, DocumentRecord};
pub use feedback::BaselineSearch;
pub use rocchio::RocchioWeights;
pub use sparse::SparseVector;
pub use tfidf::{compute_df, vectorize_query, Df, TfIdfIndex};
