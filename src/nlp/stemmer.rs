use crate::errors::SummarizeError;
use rust_stemmers::Algorithm;
use std::fmt;
use std::sync::Arc;

/// Reduces lowercase text to the stem used for equality comparisons.
pub trait Stemmer {
    fn stem(&self, word: &str) -> String;
}

/// Identity stemmer: every word is its own stem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStemmer;

impl Stemmer for NullStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Snowball (Porter2 family) stemmer for one language.
#[derive(Clone)]
pub struct SnowballStemmer {
    language: &'static str,
    inner: Arc<rust_stemmers::Stemmer>,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self::create("english", Algorithm::English)
    }

    fn create(language: &'static str, algorithm: Algorithm) -> Self {
        Self {
            language,
            inner: Arc::new(rust_stemmers::Stemmer::create(algorithm)),
        }
    }

    /// Resolve a stemmer by language name or ISO code. `none` means no
    /// stemming and yields `Ok(None)`.
    pub fn by_name(name: &str) -> Result<Option<Self>, SummarizeError> {
        let (language, algorithm) = match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => return Ok(None),
            "en" | "english" => ("english", Algorithm::English),
            "de" | "german" => ("german", Algorithm::German),
            "fr" | "french" => ("french", Algorithm::French),
            "es" | "spanish" => ("spanish", Algorithm::Spanish),
            "it" | "italian" => ("italian", Algorithm::Italian),
            "pt" | "portuguese" => ("portuguese", Algorithm::Portuguese),
            "nl" | "dutch" => ("dutch", Algorithm::Dutch),
            "ru" | "russian" => ("russian", Algorithm::Russian),
            "sv" | "swedish" => ("swedish", Algorithm::Swedish),
            "no" | "norwegian" => ("norwegian", Algorithm::Norwegian),
            "da" | "danish" => ("danish", Algorithm::Danish),
            "fi" | "finnish" => ("finnish", Algorithm::Finnish),
            "hu" | "hungarian" => ("hungarian", Algorithm::Hungarian),
            "tr" | "turkish" => ("turkish", Algorithm::Turkish),
            other => {
                return Err(SummarizeError::InvalidConfig(format!(
                    "unknown stemmer '{other}' (expected a language name or 'none')"
                )))
            }
        };
        Ok(Some(Self::create(language, algorithm)))
    }

    pub fn language(&self) -> &'static str {
        self.language
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String,
{
    fn stem(&self, word: &str) -> String {
        self(word)
    }
}
