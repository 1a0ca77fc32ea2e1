//! Text plumbing that feeds the scoring engine: stemming, stopword
//! provisioning and plain-text segmentation.

pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use stemmer::{NullStemmer, SnowballStemmer, Stemmer};
pub use stopwords::Stopwords;
pub use tokenizer::PlainTextParser;
