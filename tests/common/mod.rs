// Shared test fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use jobalign::core::{JobMatcher, MatchScorer, QuotaResolver, RoleInference, RoleVariations};
use jobalign::models::JobPosting;
use jobalign::services::{
    CorpusError, InMemorySubscriptionStore, JobCorpus, LlmError, StaticCorpus, SubscriptionStore,
    TextGenerator,
};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(2);

type Reply = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

/// Deterministic text generator driven by a closure over the prompt
pub struct ScriptedGenerator {
    reply: Box<Reply>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(reply: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every call fails as if the service were unreachable
    pub fn failing() -> Arc<Self> {
        Self::new(|_| Err(LlmError::Api { status: 503, message: "unavailable".to_string() }))
    }

    /// Role prompts get `roles`; scoring prompts get `score`
    pub fn fixed(roles: &'static str, score: &'static str) -> Arc<Self> {
        Self::new(move |prompt| {
            if is_scoring_prompt(prompt) {
                Ok(score.to_string())
            } else {
                Ok(roles.to_string())
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(prompt)
    }
}

/// Generator that never answers within any reasonable timeout
pub struct StalledGenerator;

#[async_trait]
impl TextGenerator for StalledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("Never".to_string())
    }
}

pub fn is_scoring_prompt(prompt: &str) -> bool {
    prompt.contains("Job Position:")
}

/// Corpus that counts how often it was read
pub struct CountingCorpus {
    inner: StaticCorpus,
    loads: AtomicUsize,
}

impl CountingCorpus {
    pub fn new(postings: Vec<JobPosting>) -> Arc<Self> {
        Arc::new(Self {
            inner: StaticCorpus::new(postings),
            loads: AtomicUsize::new(0),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobCorpus for CountingCorpus {
    async fn load(&self) -> Result<Vec<JobPosting>, CorpusError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load().await
    }
}

pub fn skills(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn posting(title: &str, company: &str) -> JobPosting {
    JobPosting::new(title, company, format!("https://jobs.example.com/{}", title.to_lowercase().replace(' ', "-")))
}

pub fn scorer(generator: Arc<dyn TextGenerator>) -> MatchScorer {
    MatchScorer::new(generator, Arc::new(RoleVariations::standard()), TIMEOUT)
}

pub fn build_matcher(
    generator: Arc<dyn TextGenerator>,
    corpus: Arc<dyn JobCorpus>,
    store: Arc<dyn SubscriptionStore>,
) -> JobMatcher {
    JobMatcher::new(
        RoleInference::new(generator.clone(), TIMEOUT),
        scorer(generator),
        corpus,
        QuotaResolver::new(store),
    )
}

pub fn free_store() -> Arc<dyn SubscriptionStore> {
    Arc::new(InMemorySubscriptionStore::new())
}

/// Write a scraper-style JSON corpus to a temp file
pub fn corpus_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write corpus");
    file
}
