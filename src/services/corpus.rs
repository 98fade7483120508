use crate::models::JobPosting;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the scraped job corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Job corpus unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("Job corpus is malformed: {0}")]
    Malformed(String),
}

/// Read-only source of scraped job postings
#[async_trait]
pub trait JobCorpus: Send + Sync {
    async fn load(&self) -> Result<Vec<JobPosting>, CorpusError>;
}

/// Corpus backed by the scraper's JSON export
///
/// The file is re-read on every call since the scraper rewrites it in place.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobCorpus for FileCorpus {
    async fn load(&self) -> Result<Vec<JobPosting>, CorpusError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                _ => e.to_string(),
            };
            CorpusError::Unavailable {
                path: self.path.display().to_string(),
                reason,
            }
        })?;

        let postings = parse_corpus(&raw)?;
        tracing::info!("Loaded {} job postings from {}", postings.len(), self.path.display());
        Ok(postings)
    }
}

/// Parse the scraper export: a JSON array of records
///
/// A document that is not valid UTF-8 JSON or not an array fails as a whole.
/// Individual records that cannot be read as a posting are logged and skipped.
pub fn parse_corpus(raw: impl AsRef<[u8]>) -> Result<Vec<JobPosting>, CorpusError> {
    let document: Value = serde_json::from_slice(raw.as_ref()).map_err(|e| CorpusError::Malformed(e.to_string()))?;

    let records = match document {
        Value::Array(records) => records,
        other => {
            return Err(CorpusError::Malformed(format!(
                "expected an array of postings, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut postings = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<JobPosting>(record) {
            Ok(posting) => postings.push(posting),
            Err(e) => tracing::warn!("Skipping corpus record {}: {}", index, e),
        }
    }

    Ok(postings)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fixed in-memory corpus
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    postings: Vec<JobPosting>,
}

impl StaticCorpus {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }
}

#[async_trait]
impl JobCorpus for StaticCorpus {
    async fn load(&self) -> Result<Vec<JobPosting>, CorpusError> {
        Ok(self.postings.clone())
    }
}
