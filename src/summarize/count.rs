use crate::errors::SummarizeError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How many sentences a summary should contain: a fixed number or a share of
/// the document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "CountWire")]
pub enum SentencesCount {
    /// Negative values select nothing.
    Absolute(i64),
    /// Percent of the document's sentences, `0.0..=100.0`.
    Percentage(f64),
}

impl Default for SentencesCount {
    fn default() -> Self {
        SentencesCount::Absolute(3)
    }
}

impl SentencesCount {
    /// Number of sentences to keep out of `total`. A non-zero percentage keeps
    /// at least one sentence.
    pub fn resolve(&self, total: usize) -> usize {
        match *self {
            SentencesCount::Absolute(n) => usize::try_from(n).unwrap_or(0),
            SentencesCount::Percentage(p) if p <= 0.0 => 0,
            SentencesCount::Percentage(p) => {
                let count = (total as f64 * p / 100.0).floor() as usize;
                count.max(1)
            }
        }
    }
}

impl FromStr for SentencesCount {
    type Err = SummarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            let value: f64 = pct
                .trim()
                .parse()
                .map_err(|_| SummarizeError::InvalidCount(s.to_string()))?;
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(SummarizeError::InvalidCount(format!(
                    "{s}: percentage must be within 0%..=100%"
                )));
            }
            return Ok(SentencesCount::Percentage(value));
        }
        s.parse::<i64>()
            .map(SentencesCount::Absolute)
            .map_err(|_| SummarizeError::InvalidCount(s.to_string()))
    }
}

impl fmt::Display for SentencesCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentencesCount::Absolute(n) => write!(f, "{n}"),
            SentencesCount::Percentage(p) => write!(f, "{p}%"),
        }
    }
}

// Tool arguments may carry either `3` or `"20%"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountWire {
    Number(i64),
    Text(String),
}

impl TryFrom<CountWire> for SentencesCount {
    type Error = SummarizeError;

    fn try_from(wire: CountWire) -> Result<Self, Self::Error> {
        match wire {
            CountWire::Number(n) => Ok(SentencesCount::Absolute(n)),
            CountWire::Text(s) => s.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_and_percentage() {
        assert_eq!("3".parse::<SentencesCount>().unwrap(), SentencesCount::Absolute(3));
        assert_eq!(" -2 ".parse::<SentencesCount>().unwrap(), SentencesCount::Absolute(-2));
        assert_eq!(
            "20%".parse::<SentencesCount>().unwrap(),
            SentencesCount::Percentage(20.0)
        );
        assert!(matches!(
            "lots".parse::<SentencesCount>(),
            Err(SummarizeError::InvalidCount(_))
        ));
        assert!("150%".parse::<SentencesCount>().is_err());
    }

    #[test]
    fn negative_absolute_resolves_to_zero() {
        assert_eq!(SentencesCount::Absolute(-5).resolve(10), 0);
        assert_eq!(SentencesCount::Absolute(0).resolve(10), 0);
        assert_eq!(SentencesCount::Absolute(4).resolve(2), 4);
    }

    #[test]
    fn percentage_floors_but_keeps_one() {
        assert_eq!(SentencesCount::Percentage(20.0).resolve(10), 2);
        assert_eq!(SentencesCount::Percentage(25.0).resolve(10), 2);
        assert_eq!(SentencesCount::Percentage(5.0).resolve(10), 1);
        assert_eq!(SentencesCount::Percentage(0.0).resolve(10), 0);
        assert_eq!(SentencesCount::Percentage(100.0).resolve(7), 7);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let n: SentencesCount = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(n, SentencesCount::Absolute(2));
        let p: SentencesCount = serde_json::from_value(serde_json::json!("50%")).unwrap();
        assert_eq!(p, SentencesCount::Percentage(50.0));
        assert!(serde_json::from_value::<SentencesCount>(serde_json::json!("x")).is_err());
    }

    #[test]
    fn display_matches_parse_syntax() {
        assert_eq!(SentencesCount::Absolute(3).to_string(), "3");
        assert_eq!(SentencesCount::Percentage(12.5).to_string(), "12.5%");
    }
}
