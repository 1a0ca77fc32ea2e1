use crate::errors::SummarizeError;
use crate::nlp::{SnowballStemmer, Stopwords};
use serde::Serialize;
use std::sync::Arc;

pub mod count;
pub mod document;
pub mod extractive;
pub mod luhn;

pub use count::SentencesCount;
pub use luhn::LuhnConfig;

/// Backends accepted by [`build_summarizer`].
pub const BACKENDS: &[&str] = &["luhn", "lead"];

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResult {
    pub summary: String,
    pub sentences: Vec<String>,
    pub sentences_total: usize,
    pub backend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatedSentence {
    pub order: usize,
    pub rating: f64,
    pub sentence: String,
}

pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        text: &str,
        count: SentencesCount,
    ) -> Result<SummarizeResult, SummarizeError>;
    /// Every sentence of `text` with its rating, in document order.
    fn rate(&self, text: &str) -> Result<Vec<RatedSentence>, SummarizeError>;
    fn backend(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerSettings {
    pub backend: String,
    pub luhn: LuhnConfig,
    /// Snowball language for the luhn backend, or `none` for exact matching.
    pub stemmer: String,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            backend: "luhn".into(),
            luhn: LuhnConfig::with_stopwords(Stopwords::english()),
            stemmer: "none".into(),
        }
    }
}

pub fn build_summarizer(
    settings: &SummarizerSettings,
) -> Result<Arc<dyn Summarizer>, SummarizeError> {
    settings.luhn.validate()?;
    let stemmer = SnowballStemmer::by_name(&settings.stemmer)?;
    let summarizer: Arc<dyn Summarizer> = match settings.backend.as_str() {
        "lead" => Arc::new(extractive::LeadSummarizer::default()),
        "luhn" => luhn_summarizer(settings.luhn.clone(), stemmer),
        other => {
            tracing::warn!(backend=%other, "unknown summary backend, using luhn");
            luhn_summarizer(settings.luhn.clone(), stemmer)
        }
    };
    Ok(summarizer)
}

fn luhn_summarizer(config: LuhnConfig, stemmer: Option<SnowballStemmer>) -> Arc<dyn Summarizer> {
    match stemmer {
        Some(stemmer) => {
            tracing::debug!(language = stemmer.language(), "luhn with snowball stemmer");
            Arc::new(extractive::LuhnSummarizer::with_stemmer(config, stemmer))
        }
        None => Arc::new(extractive::LuhnSummarizer::new(config)),
    }
}
