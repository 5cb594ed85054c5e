use crate::tokenizer::normalize;
use crate::DocId;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One record of the corpus file: a JSON array of these. All three fields are
/// required; a record missing any of them fails the whole load.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "docID")]
    pub id: DocId,
    #[serde(rename = "Series_Title")]
    pub title: String,
    #[serde(rename = "Overview")]
    pub overview: String,
}

/// A loaded document. Token sequences are computed once here and never touched
/// again; everything downstream reads them.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub overview: String,
    pub title_tokens: Vec<String>,
    pub overview_tokens: Vec<String>,
}

/// The fixed document collection an index is built over. No inserts or
/// deletes after load.
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open corpus file {}", path.display()))?;
        let records: Vec<DocumentRecord> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse corpus file {}", path.display()))?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<DocumentRecord>) -> Result<Self> {
        let mut seen: HashSet<DocId> = HashSet::with_capacity(records.len());
        let mut docs = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                bail!("duplicate docID {} in corpus", record.id);
            }
            let title_tokens = normalize(&record.title);
            let overview_tokens = normalize(&record.overview);
            docs.push(Document {
                id: record.id,
                title: record.title,
                overview: record.overview,
                title_tokens,
                overview_tokens,
            });
        }
        tracing::info!(num_docs = docs.len(), "corpus loaded");
        Ok(Self { docs })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: DocId, title: &str, overview: &str) -> DocumentRecord {
        DocumentRecord { id, title: title.into(), overview: overview.into() }
    }

    #[test]
    fn tokenizes_both_fields_at_load() {
        let corpus =
            Corpus::from_records(vec![record(7, "Fast Fox", "A fox jumps.")]).unwrap();
        let doc = corpus.get(7).unwrap();
        assert_eq!(doc.title_tokens, vec!["fast", "fox"]);
        assert_eq!(doc.overview_tokens, vec!["fox", "jump"]);
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let records = vec![record(1, "a", "b"), record(1, "c", "d")];
        assert!(Corpus::from_records(records).is_err());
    }

    #[test]
    fn missing_fields_fail_the_parse() {
        let err = serde_json::from_str::<Vec<DocumentRecord>>(r#"[{"docID": 3}]"#);
        assert!(err.is_err());
    }
}
