//! Plain-text segmentation into sentences and word tokens.
//!
//! No language-specific rules: a sentence ends at `.`, `!`, `?`, a blank
//! line, or the end of input. Abbreviations such as "e.g." split sentences.

use crate::summarize::document::{Document, Sentence, Token};
use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph regex"));

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("sentence regex"));

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("word regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn parse(&self, text: &str) -> Document<Token> {
        Document::new(self.sentences(text))
    }

    /// Sentences that contain at least one word, whitespace collapsed.
    pub fn sentences(&self, text: &str) -> Vec<Sentence<Token>> {
        PARAGRAPH_BREAK
            .split(text)
            .flat_map(|paragraph| SENTENCE_PATTERN.find_iter(paragraph))
            .filter_map(|m| {
                let words = self.tokenize(m.as_str());
                if words.is_empty() {
                    return None;
                }
                let text = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
                Some(Sentence::new(text, words))
            })
            .collect()
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        WORD_PATTERN
            .find_iter(text)
            .map(|m| Token::new(m.as_str()))
            .collect()
    }
}
