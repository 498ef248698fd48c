use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Invalid sequence: unexpected symbol {symbol:?} at position {position}")]
    InvalidSequence { position: usize, symbol: char },

    #[error("Invalid region {start}..{end} for sequence of length {len}")]
    InvalidRegion { start: usize, end: usize, len: usize },

    #[error("Unknown feedback target: {0}")]
    UnknownFeedbackTarget(String),

    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid FASTA: {0}")]
    InvalidFasta(String),

    #[error("Feedback log error: {0}")]
    FeedbackLog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, DesignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sequence_display() {
        let err = DesignError::InvalidSequence { position: 3, symbol: 'x' };
        assert_eq!(
            err.to_string(),
            "Invalid sequence: unexpected symbol 'x' at position 3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DesignError = io.into();
        assert!(matches!(err, DesignError::Io(_)));
    }
}
