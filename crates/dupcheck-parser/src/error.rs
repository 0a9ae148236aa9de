//! Error types for the parsers

use thiserror::Error;

/// Errors that can occur while reading ground truth or detector output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A line contained a marker phrase but could not be split into a pair
    #[error("Malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A match descriptor did not have the shape `KEY (TAG:SCORE)`
    #[error("Malformed match descriptor '{descriptor}' on line {line}: {reason}")]
    MalformedDescriptor {
        /// 1-based line number
        line: usize,
        /// The offending descriptor text
        descriptor: String,
        /// What was wrong with it
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::JsonParse(e.to_string())
    }
}
