//! Pre-segmented document structure consumed by the scoring engine.

use crate::nlp::Stopwords;

/// A text token. Its text (via `AsRef<str>`) is what gets lowercased and
/// stemmed; the stopword test is the word's own responsibility.
pub trait Word: AsRef<str> {
    fn is_stopword(&self, stopwords: &Stopwords) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Word for Token {
    fn is_stopword(&self, stopwords: &Stopwords) -> bool {
        stopwords.contains(&self.text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence<W = Token> {
    text: String,
    words: Vec<W>,
}

impl<W> Sentence<W> {
    pub fn new(text: impl Into<String>, words: Vec<W>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[W] {
        &self.words
    }
}

impl Sentence<Token> {
    /// Builds a sentence whose text is its words joined by spaces.
    pub fn from_words(words: &[&str]) -> Self {
        Self::new(
            words.join(" "),
            words.iter().map(|w| Token::new(*w)).collect(),
        )
    }
}

/// Ordered sentences plus the flat word sequence used for significance
/// analysis. Sentence order is positional.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<W = Token> {
    sentences: Vec<Sentence<W>>,
    words: Vec<W>,
}

impl<W: Clone> Document<W> {
    /// The flat word sequence is the concatenation of the sentences' words.
    pub fn new(sentences: Vec<Sentence<W>>) -> Self {
        let words = sentences
            .iter()
            .flat_map(|s| s.words.iter().cloned())
            .collect();
        Self { sentences, words }
    }
}

impl<W> Document<W> {
    /// Uses an explicit vocabulary that need not match the sentences.
    pub fn with_words(sentences: Vec<Sentence<W>>, words: Vec<W>) -> Self {
        Self { sentences, words }
    }

    pub fn sentences(&self) -> &[Sentence<W>] {
        &self.sentences
    }

    pub fn words(&self) -> &[W] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
