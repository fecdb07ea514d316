//! In-memory lexical knowledge index.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

use super::{Document, KnowledgeRepository, RetrievalResult, Snippet};

/// File extensions picked up by [`LocalKnowledgeIndex::load_directory`].
const KNOWN_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Query terms shorter than this are ignored when scoring.
const MIN_TERM_LEN: usize = 3;

/// In-memory keyword index over ingested documents.
///
/// Scoring is plain term overlap: the fraction of query terms present in the
/// document text. Crude next to an embedding index, but deterministic and
/// sufficient for the retrieval fallback and for tests. Safe for concurrent
/// use; every invocation is independent.
pub struct LocalKnowledgeIndex {
    /// Keyed by content checksum so re-ingesting identical content is a no-op.
    documents: RwLock<HashMap<String, Document>>,
}

impl LocalKnowledgeIndex {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Index every `.md`/`.txt` file under `dir`.
    ///
    /// A missing directory is not an error; the index just starts empty.
    /// Returns the number of files actually indexed.
    pub fn load_directory(&self, dir: &Path) -> RetrievalResult<usize> {
        if !dir.is_dir() {
            return Ok(0);
        }
        let mut added = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !KNOWN_EXTENSIONS.contains(&ext) {
                continue;
            }
            // Skip unreadable or non-UTF-8 files rather than failing the scan.
            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document")
                .to_string();
            added += self.insert(Document::new(name, text));
        }
        Ok(added)
    }

    /// Seed a minimal charter-party primer so first-run queries have something
    /// to land on. No-op unless the index is empty.
    pub fn seed_primer_if_empty(&self) -> usize {
        if !self.documents.read().is_empty() {
            return 0;
        }
        self.insert(Document::new(
            "cp_primer.md",
            "# GENCON Basics\n\
             Laytime = allowed time for cargo ops.\n\
             Demurrage = rate per day for excess time.\n\
             Despatch = reward for saving laytime.\n",
        ))
    }

    fn insert(&self, document: Document) -> usize {
        let mut documents = self.documents.write();
        if documents.contains_key(&document.checksum) {
            0
        } else {
            documents.insert(document.checksum.clone(), document);
            1
        }
    }
}

impl Default for LocalKnowledgeIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= MIN_TERM_LEN)
        .map(str::to_string)
        .collect()
}

fn score_document(query_terms: &[String], document: &Document) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let haystack = document.text.to_lowercase();
    let hits = query_terms
        .iter()
        .filter(|t| haystack.contains(t.as_str()))
        .count();
    hits as f64 / query_terms.len() as f64
}

/// The non-empty line containing the most query terms, as the quoted passage.
fn best_line<'a>(query_terms: &[String], text: &'a str) -> &'a str {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .max_by_key(|line| {
            let lowered = line.to_lowercase();
            query_terms
                .iter()
                .filter(|t| lowered.contains(t.as_str()))
                .count()
        })
        .unwrap_or(text)
        .trim()
}

#[async_trait]
impl KnowledgeRepository for LocalKnowledgeIndex {
    async fn add_documents(&self, documents: Vec<Document>) -> RetrievalResult<usize> {
        Ok(documents.into_iter().map(|d| self.insert(d)).sum())
    }

    async fn query(&self, question: &str, top_k: usize) -> RetrievalResult<Vec<Snippet>> {
        let query_terms = terms(question);
        let documents = self.documents.read();
        let mut snippets: Vec<Snippet> = documents
            .values()
            .filter_map(|document| {
                let score = score_document(&query_terms, document);
                (score > 0.0).then(|| Snippet {
                    source: document.name.clone(),
                    text: best_line(&query_terms, &document.text).to_string(),
                    score,
                })
            })
            .collect();
        snippets.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        snippets.truncate(top_k);
        Ok(snippets)
    }

    async fn document_count(&self) -> RetrievalResult<usize> {
        Ok(self.documents.read().len())
    }
}
