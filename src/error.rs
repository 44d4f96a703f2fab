//! Error types for content loading and form submission

use thiserror::Error;

/// Failure to obtain the content document
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request did not return a success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The content could not be retrieved at all
    #[error("failed to fetch content: {0}")]
    Fetch(String),

    /// The body was not a valid content document
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Whether this is a fetch failure (as opposed to a parse failure)
    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Status(_) | LoadError::Fetch(_))
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => LoadError::Status(status.as_u16()),
            None => LoadError::Fetch(e.to_string()),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Fetch(e.to_string())
    }
}

/// Failure to deliver a contact form submission
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The relay answered with a non-success status
    #[error("{}", .message.as_deref().unwrap_or(SubmissionError::DEFAULT_MESSAGE))]
    Rejected { status: u16, message: Option<String> },

    /// The relay could not be reached or its reply could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmissionError {
    const DEFAULT_MESSAGE: &'static str = "Failed to send message.";
    /// Shown when the relay cannot be reached at all
    pub const TRANSPORT_MESSAGE: &'static str = "An error occurred. Please try again later.";

    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected { message, .. } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(Self::DEFAULT_MESSAGE)
                .to_string(),
            SubmissionError::Transport(_) => Self::TRANSPORT_MESSAGE.to_string(),
        }
    }
}
