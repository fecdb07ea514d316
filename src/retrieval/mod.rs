//! Document knowledge base.
//!
//! [`KnowledgeRepository`] is the boundary to any retrieval backend; the
//! assistant only ever talks to the trait. [`LocalKnowledgeIndex`] is the
//! in-process lexical implementation used by the server and in tests.
//! Embedding-based retrieval services plug in behind the same trait.

pub mod local;

pub use local::LocalKnowledgeIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Errors raised by knowledge base implementations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// SHA-256 hex digest of document content, used to deduplicate ingestion.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// A document held by the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source filename, reported back as the citation.
    pub name: String,
    pub text: String,
    pub checksum: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let checksum = content_checksum(&text);
        Self {
            name: name.into(),
            text,
            checksum,
        }
    }
}

/// A retrieval hit: a matching passage and the document it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub source: String,
    pub text: String,
    pub score: f64,
}

/// Abstract retrieval backend.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Add documents, skipping any whose checksum is already indexed.
    /// Returns the number actually added.
    async fn add_documents(&self, documents: Vec<Document>) -> RetrievalResult<usize>;

    /// Return up to `top_k` best-matching snippets for `question`, best first.
    /// An empty index yields an empty result, not an error.
    async fn query(&self, question: &str, top_k: usize) -> RetrievalResult<Vec<Snippet>>;

    /// Number of documents currently indexed.
    async fn document_count(&self) -> RetrievalResult<usize>;
}
