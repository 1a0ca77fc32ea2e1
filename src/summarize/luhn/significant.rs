use super::stem_word;
use crate::nlp::{Stemmer, Stopwords};
use crate::summarize::document::Word;
use std::collections::{HashMap, HashSet};

/// Stems treated as content-bearing for one scoring request. Read-only once
/// built so every sentence is rated against the same vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignificantStems {
    stems: HashSet<String>,
}

impl SignificantStems {
    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stems.iter().map(String::as_str)
    }

    /// Stems in lexicographic order, for stable reporting.
    pub fn sorted(&self) -> Vec<&str> {
        let mut stems: Vec<&str> = self.iter().collect();
        stems.sort_unstable();
        stems
    }
}

impl<S: Into<String>> FromIterator<S> for SignificantStems {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            stems: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Counts the stems of all non-stopword words and keeps the first
/// `floor(percentage * distinct)` entries of the list ordered ascending by
/// `(count, stem)`.
///
/// Note the ordering: below 1.0 this keeps the *least* frequent stems. At the
/// default of 1.0 the whole vocabulary is kept and the ordering is moot.
pub fn select_significant_stems<W, S>(
    words: &[W],
    stopwords: &Stopwords,
    percentage: f64,
    stemmer: &S,
) -> SignificantStems
where
    W: Word,
    S: Stemmer,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in words.iter().filter(|w| !w.is_stopword(stopwords)) {
        *counts.entry(stem_word(word, stemmer)).or_insert(0) += 1;
    }

    let mut ranked: Vec<(usize, String)> = counts
        .into_iter()
        .map(|(stem, count)| (count, stem))
        .collect();
    ranked.sort_unstable();

    // `as` saturates: negative or NaN keeps nothing, > 1.0 is clamped by `take`.
    let keep = (ranked.len() as f64 * percentage).floor() as usize;
    tracing::trace!(
        distinct = ranked.len(),
        keep,
        percentage,
        "selected significant stems"
    );
    ranked.into_iter().take(keep).map(|(_, stem)| stem).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::NullStemmer;
    use crate::summarize::document::Token;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w)).collect()
    }

    #[test]
    fn empty_words_yield_empty_set() {
        let stems =
            select_significant_stems::<Token, _>(&[], &Stopwords::empty(), 1.0, &NullStemmer);
        assert!(stems.is_empty());
    }

    #[test]
    fn stopwords_are_dropped_and_stems_lowercased() {
        let words = tokens(&["The", "Cat", "the", "cat", "sat"]);
        let stems = select_significant_stems(
            &words,
            &Stopwords::from_list(["the"]),
            1.0,
            &NullStemmer,
        );
        assert_eq!(stems.sorted(), vec!["cat", "sat"]);
    }

    #[test]
    fn stemmer_merges_word_forms() {
        let words = tokens(&["cats", "cat", "Dogs"]);
        let strip_s = |w: &str| w.trim_end_matches('s').to_string();
        let stems = select_significant_stems(&words, &Stopwords::empty(), 1.0, &strip_s);
        assert_eq!(stems.sorted(), vec!["cat", "dog"]);
    }

    #[test]
    fn stopword_check_uses_the_word_not_its_stem() {
        // "runs" is not a stopword even though it stems onto one.
        let words = tokens(&["runs", "the", "cat"]);
        let onto_the = |w: &str| {
            if w == "runs" {
                "the".to_string()
            } else {
                w.to_string()
            }
        };
        let stems =
            select_significant_stems(&words, &Stopwords::from_list(["the"]), 1.0, &onto_the);
        assert_eq!(stems.sorted(), vec!["cat", "the"]);
    }

    #[test]
    fn partial_percentage_keeps_least_frequent_stems() {
        // counts: a=1, c=2, b=3
        let words = tokens(&["b", "b", "b", "a", "c", "c"]);
        let sw = Stopwords::empty();

        let third = select_significant_stems(&words, &sw, 0.34, &NullStemmer);
        assert_eq!(third.sorted(), vec!["a"]);

        let two_thirds = select_significant_stems(&words, &sw, 0.67, &NullStemmer);
        assert_eq!(two_thirds.sorted(), vec!["a", "c"]);
    }

    #[test]
    fn equal_counts_break_ties_by_stem_text() {
        let words = tokens(&["z", "y", "x"]);
        let stems = select_significant_stems(&words, &Stopwords::empty(), 0.5, &NullStemmer);
        assert_eq!(stems.sorted(), vec!["x"]);
    }

    #[test]
    fn zero_percentage_keeps_nothing() {
        let words = tokens(&["alpha", "beta"]);
        let stems = select_significant_stems(&words, &Stopwords::empty(), 0.0, &NullStemmer);
        assert!(stems.is_empty());
    }
}
