// Service exports
pub mod corpus;
pub mod llm;
pub mod subscriptions;

pub use corpus::{CorpusError, FileCorpus, JobCorpus, StaticCorpus};
pub use llm::{DisabledGenerator, GeminiClient, LlmError, TextGenerator};
pub use subscriptions::{InMemorySubscriptionStore, PostgresSubscriptionStore, StoreError, SubscriptionStore};
