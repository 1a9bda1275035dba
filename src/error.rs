//! Structured error types for the Montage composition engine.
//!
//! Rendering itself never fails: malformed section props degrade to
//! "not shown". Errors only come from parsing input, loading config, I/O,
//! and routing events to a live page.

use thiserror::Error;

/// The unified error type returned by all public Montage API functions.
#[derive(Debug, Error)]
pub enum MontageError {
    /// JSON input failed to parse as a page document.
    #[error("Failed to parse page document: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// Engine configuration was rejected.
    #[error("Config error: {0}")]
    Config(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event was addressed to a section index with no live instance.
    #[error("No interactive section at index {0}")]
    UnknownSection(usize),
}

/// Result type alias for Montage operations.
pub type Result<T> = std::result::Result<T, MontageError>;

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for MontageError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but isn't a list of sections. Each entry needs a \"type\" string."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        MontageError::Parse { source: e, hint }
    }
}
