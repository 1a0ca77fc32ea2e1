use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid sentences count: {0}")]
    InvalidCount(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SummarizeError {
    fn from(e: std::io::Error) -> Self {
        SummarizeError::Io(e.to_string())
    }
}
