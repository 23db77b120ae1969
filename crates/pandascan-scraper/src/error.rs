use thiserror::Error;

/// Failure taxonomy for one scrape invocation.
///
/// Extractor-level "not found" is never an error (absence is the normal
/// return there), and a card that cannot be parsed is skipped rather than
/// failing the request. These variants are the request-fatal conditions the
/// caller sees; each maps to a stable machine-readable [`kind`](Self::kind)
/// so the transport can relay `{ kind, message }` without string matching.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("scrape did not finish within the {deadline_secs}s deadline")]
    DeadlineExceeded { deadline_secs: u64 },

    #[error("extraction failed: {reason}")]
    Extraction { reason: String },
}

impl ScrapeError {
    /// Stable machine-readable identifier for this error's category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::NavigationFailed { .. } => "navigation_failed",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Extraction { .. } => "extraction_error",
        }
    }
}

impl From<pandascan_core::RequestError> for ScrapeError {
    fn from(err: pandascan_core::RequestError) -> Self {
        Self::InvalidInput {
            reason: err.to_string(),
        }
    }
}
