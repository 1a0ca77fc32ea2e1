use crate::errors::SummarizeError;
use crate::nlp::{NullStemmer, PlainTextParser, Stemmer};
use crate::summarize::document::Sentence;
use crate::summarize::luhn::{LuhnConfig, LuhnMethod};
use crate::summarize::{RatedSentence, SentencesCount, SummarizeResult, Summarizer};

fn join_sentences(selected: &[&Sentence]) -> (String, Vec<String>) {
    let sentences: Vec<String> = selected.iter().map(|s| s.text().to_string()).collect();
    (sentences.join(" "), sentences)
}

/// Luhn significant-word clustering over plain text.
pub struct LuhnSummarizer<S = NullStemmer> {
    config: LuhnConfig,
    parser: PlainTextParser,
    stemmer: S,
}

impl LuhnSummarizer<NullStemmer> {
    pub fn new(config: LuhnConfig) -> Self {
        Self::with_stemmer(config, NullStemmer)
    }
}

impl<S> LuhnSummarizer<S>
where
    S: Stemmer + Clone + Send + Sync,
{
    pub fn with_stemmer(config: LuhnConfig, stemmer: S) -> Self {
        Self {
            config,
            parser: PlainTextParser,
            stemmer,
        }
    }

    fn method(&self) -> LuhnMethod<'_, S> {
        LuhnMethod::new(&self.config, self.stemmer.clone())
    }
}

impl<S> Summarizer for LuhnSummarizer<S>
where
    S: Stemmer + Clone + Send + Sync,
{
    fn summarize(
        &self,
        text: &str,
        count: SentencesCount,
    ) -> Result<SummarizeResult, SummarizeError> {
        let document = self.parser.parse(text);
        let total = document.sentences().len();
        let k = count.resolve(total);
        let selected = self.method().summarize(&document, k);
        tracing::debug!(
            sentences_total = total,
            requested = %count,
            selected = selected.len(),
            "luhn summary"
        );
        let (summary, sentences) = join_sentences(&selected);
        Ok(SummarizeResult {
            summary,
            sentences,
            sentences_total: total,
            backend: self.backend().into(),
        })
    }

    fn rate(&self, text: &str) -> Result<Vec<RatedSentence>, SummarizeError> {
        let document = self.parser.parse(text);
        Ok(self
            .method()
            .rate_sentences(&document)
            .into_iter()
            .map(|info| RatedSentence {
                order: info.order,
                rating: info.rating,
                sentence: info.sentence.text().to_string(),
            })
            .collect())
    }

    fn backend(&self) -> &'static str {
        "luhn"
    }
}

/// Baseline: the first sentences of the document, unscored.
#[derive(Default)]
pub struct LeadSummarizer {
    parser: PlainTextParser,
}

impl Summarizer for LeadSummarizer {
    fn summarize(
        &self,
        text: &str,
        count: SentencesCount,
    ) -> Result<SummarizeResult, SummarizeError> {
        let document = self.parser.parse(text);
        let total = document.sentences().len();
        let k = count.resolve(total);
        let selected: Vec<&Sentence> = document.sentences().iter().take(k).collect();
        let (summary, sentences) = join_sentences(&selected);
        Ok(SummarizeResult {
            summary,
            sentences,
            sentences_total: total,
            backend: self.backend().into(),
        })
    }

    fn rate(&self, text: &str) -> Result<Vec<RatedSentence>, SummarizeError> {
        let document = self.parser.parse(text);
        Ok(document
            .sentences()
            .iter()
            .enumerate()
            .map(|(order, sentence)| RatedSentence {
                order,
                rating: 1.0 / (order + 1) as f64,
                sentence: sentence.text().to_string(),
            })
            .collect())
    }

    fn backend(&self) -> &'static str {
        "lead"
    }
}
