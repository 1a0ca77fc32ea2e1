//! Stopword sets handed to the significance selector.
//!
//! Entries are stored lowercase; lookups are case-insensitive.

use crate::errors::SummarizeError;
use std::collections::HashSet;
use std::path::Path;
use stop_words::{get, LANGUAGE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// No stopwords: every word is a candidate for significance.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::language(LANGUAGE::English)
    }

    pub fn language(language: LANGUAGE) -> Self {
        Self::from_list(get(language).iter())
    }

    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Resolve a built-in list by language name or ISO code, or `none`.
    pub fn by_name(name: &str) -> Result<Self, SummarizeError> {
        let lang = match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => return Ok(Self::empty()),
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            other => {
                return Err(SummarizeError::InvalidConfig(format!(
                    "unknown stopword list '{other}' (expected a language name or 'none')"
                )))
            }
        };
        Ok(Self::language(lang))
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::from_list(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, SummarizeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SummarizeError::Io(format!("read stopwords {}: {e}", path.display()))
        })?;
        let stopwords = Self::parse(&contents);
        tracing::debug!(path=%path.display(), count=stopwords.len(), "loaded stopword file");
        Ok(stopwords)
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
