use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub corpus: CorpusSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Empty disables the model tiers entirely
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: default_llm_endpoint(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_llm_model() -> String { crate::services::llm::DEFAULT_MODEL.to_string() }
fn default_llm_endpoint() -> String { crate::services::llm::DEFAULT_ENDPOINT.to_string() }
fn default_llm_timeout() -> u64 { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusSettings {
    #[serde(default = "default_corpus_path")]
    pub path: String,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self { path: default_corpus_path() }
    }
}

fn default_corpus_path() -> String { "scraper/scraped_jobs.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_matches")]
    pub default_max_matches: usize,
    #[serde(default = "default_min_model_score")]
    pub min_model_score: f64,
    #[serde(default = "default_max_roles")]
    pub max_roles: usize,
    #[serde(default = "default_scoring_concurrency")]
    pub scoring_concurrency: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_max_matches: default_max_matches(),
            min_model_score: default_min_model_score(),
            max_roles: default_max_roles(),
            scoring_concurrency: default_scoring_concurrency(),
        }
    }
}

fn default_max_matches() -> usize { crate::core::FREE_TIER_MAX_MATCHES }
fn default_min_model_score() -> f64 { crate::core::scoring::DEFAULT_MIN_MODEL_SCORE }
fn default_max_roles() -> usize { crate::core::roles::MAX_ROLES }
fn default_scoring_concurrency() -> usize { crate::core::matcher::DEFAULT_SCORING_CONCURRENCY }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    /// Without a URL subscriptions are kept in memory and everyone is on the free tier
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBALIGN_)
    /// 5. GOOGLE_GEMINI_API_KEY and DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBALIGN__LLM__TIMEOUT_SECS -> llm.timeout_secs
            .add_source(
                Environment::with_prefix("JOBALIGN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_well_known_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("JOBALIGN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_well_known_env(settings)?.try_deserialize()
    }
}

/// Honour the variable names the rest of the deployment already uses
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("GOOGLE_GEMINI_API_KEY") {
        builder = builder.set_override("llm.api_key", api_key)?;
    }
    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }

    builder.build()
}
