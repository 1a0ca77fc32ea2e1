use crate::errors::SummarizeError;
use crate::nlp::{SnowballStemmer, Stopwords};
use crate::summarize::{LuhnConfig, SentencesCount, SummarizerSettings, BACKENDS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "luhn-summarizer")]
#[command(about = "Luhn extractive summarizer: one-shot CLI or stdio MCP server", long_about = None)]
pub struct AppConfig {
    /// Summarize this file (`-` for stdin) and exit instead of serving MCP.
    #[arg(long, env = "LUHN_INPUT")]
    pub input: Option<PathBuf>,

    #[arg(long, env = "SUMMARY_BACKEND", default_value = "luhn")]
    pub summary_backend: String,

    /// Absolute count (`3`) or share of the document (`20%`).
    #[arg(long, env = "SENTENCES_COUNT", default_value = "3")]
    pub sentences_count: String,

    #[arg(long, env = "LUHN_MAX_GAP_SIZE", default_value_t = 4)]
    pub max_gap_size: usize,

    #[arg(long, env = "LUHN_SIGNIFICANT_PERCENTAGE", default_value_t = 1.0)]
    pub significant_percentage: f64,

    /// Built-in stopword list: a language name (`english`, `german`, ...) or `none`.
    #[arg(long, env = "STOPWORDS", default_value = "english")]
    pub stopwords: String,

    /// Extra stopwords, one per line; merged into the built-in list.
    #[arg(long, env = "STOPWORDS_FILE")]
    pub stopwords_file: Option<PathBuf>,

    /// Snowball stemmer language for the luhn backend, or `none`.
    #[arg(long, env = "STEMMER", default_value = "none")]
    pub stemmer: String,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_gap_size == 0 {
            return Err("max_gap_size must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.significant_percentage) {
            return Err("significant_percentage must be within 0.0..=1.0".into());
        }
        if !BACKENDS.contains(&self.summary_backend.as_str()) {
            return Err(format!(
                "unknown summary backend '{}' (expected one of {})",
                self.summary_backend,
                BACKENDS.join(", ")
            ));
        }
        self.sentences_count
            .parse::<SentencesCount>()
            .map_err(|e| e.to_string())?;
        Stopwords::by_name(&self.stopwords).map_err(|e| e.to_string())?;
        SnowballStemmer::by_name(&self.stemmer).map_err(|e| e.to_string())?;
        if let Some(path) = &self.stopwords_file {
            if !path.exists() {
                return Err(format!("stopwords file {} does not exist", path.display()));
            }
        }
        Ok(())
    }

    pub fn sentences_count(&self) -> Result<SentencesCount, SummarizeError> {
        self.sentences_count.parse()
    }

    /// Resolves stopword lists and builds the summarizer settings.
    pub fn settings(&self) -> Result<SummarizerSettings, SummarizeError> {
        let mut stopwords = Stopwords::by_name(&self.stopwords)?;
        if let Some(path) = &self.stopwords_file {
            stopwords.extend(Stopwords::from_file(path)?.iter());
        }
        let luhn = LuhnConfig {
            max_gap_size: self.max_gap_size,
            significant_percentage: self.significant_percentage,
            stopwords,
        };
        luhn.validate()?;
        Ok(SummarizerSettings {
            backend: self.summary_backend.clone(),
            luhn,
            stemmer: self.stemmer.clone(),
        })
    }
}
