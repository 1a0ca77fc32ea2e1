//! Luhn's significant-word clustering summarizer.
//!
//! One request runs three steps in order: the document's significant stems
//! are selected once, every sentence is rated against that fixed set, and the
//! best rated sentences are returned in reading order. Nothing is kept
//! between requests.

pub mod rater;
pub mod selector;
pub mod significant;

use crate::errors::SummarizeError;
use crate::nlp::{NullStemmer, Stemmer, Stopwords};
use crate::summarize::document::{Document, Sentence, Token, Word};

pub use significant::SignificantStems;

pub const DEFAULT_MAX_GAP_SIZE: usize = 4;
pub const DEFAULT_SIGNIFICANT_PERCENTAGE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LuhnConfig {
    /// Consecutive non-significant words that close an open cluster. The
    /// core treats 0 as "never close"; `validate` still rejects it for
    /// user-supplied settings.
    pub max_gap_size: usize,
    /// Fraction of distinct stems kept as significant. Values below 1.0 keep
    /// the least frequent stems.
    pub significant_percentage: f64,
    pub stopwords: Stopwords,
}

impl Default for LuhnConfig {
    fn default() -> Self {
        Self {
            max_gap_size: DEFAULT_MAX_GAP_SIZE,
            significant_percentage: DEFAULT_SIGNIFICANT_PERCENTAGE,
            stopwords: Stopwords::empty(),
        }
    }
}

impl LuhnConfig {
    pub fn with_stopwords(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.max_gap_size == 0 {
            return Err(SummarizeError::InvalidConfig(
                "max_gap_size must be > 0".into(),
            ));
        }
        let pct = self.significant_percentage;
        if !pct.is_finite() || !(0.0..=1.0).contains(&pct) {
            return Err(SummarizeError::InvalidConfig(format!(
                "significant_percentage must be within 0.0..=1.0, got {pct}"
            )));
        }
        Ok(())
    }
}

/// A sentence with its document position and rating. Lives only for the
/// duration of one selection.
#[derive(Debug, Clone)]
pub struct SentenceInfo<'d, W = Token> {
    pub sentence: &'d Sentence<W>,
    pub order: usize,
    pub rating: f64,
}

pub struct LuhnMethod<'c, S = NullStemmer> {
    config: &'c LuhnConfig,
    stemmer: S,
}

impl<'c, S: Stemmer> LuhnMethod<'c, S> {
    /// Does not validate `config`; see [`LuhnConfig::validate`].
    pub fn new(config: &'c LuhnConfig, stemmer: S) -> Self {
        Self { config, stemmer }
    }

    pub fn significant_stems<W: Word>(&self, words: &[W]) -> SignificantStems {
        significant::select_significant_stems(
            words,
            &self.config.stopwords,
            self.config.significant_percentage,
            &self.stemmer,
        )
    }

    pub fn rate_sentence<W: Word>(
        &self,
        sentence: &Sentence<W>,
        significant: &SignificantStems,
    ) -> f64 {
        rater::rate_sentence(
            sentence.words(),
            significant,
            self.config.max_gap_size,
            &self.stemmer,
        )
    }

    /// Ratings for every sentence, in document order.
    pub fn rate_sentences<'d, W: Word>(
        &self,
        document: &'d Document<W>,
    ) -> Vec<SentenceInfo<'d, W>> {
        let significant = self.significant_stems(document.words());
        tracing::debug!(
            significant = significant.len(),
            sentences = document.sentences().len(),
            "rating sentences"
        );
        document
            .sentences()
            .iter()
            .enumerate()
            .map(|(order, sentence)| SentenceInfo {
                sentence,
                order,
                rating: self.rate_sentence(sentence, &significant),
            })
            .collect()
    }

    /// The `count` best rated sentences in document order.
    pub fn summarize<'d, W: Word>(
        &self,
        document: &'d Document<W>,
        count: usize,
    ) -> Vec<&'d Sentence<W>> {
        selector::select_top(self.rate_sentences(document), count)
    }
}

pub(crate) fn stem_word<W: Word, S: Stemmer>(word: &W, stemmer: &S) -> String {
    stemmer.stem(&word.as_ref().to_lowercase())
}
