//! Error kinds produced while requesting an analysis.

use thiserror::Error;

/// Fallback message when the service rejects a request without saying why.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Every way a single analysis request can fail.
///
/// The `Display` text is what ends up after `"Error: "` in the status line.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input was empty after trimming; no request was sent.
    #[error("Please enter some text to analyze.")]
    EmptyInput,

    /// The service could not be reached.
    #[error("Failed to reach the analysis service")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response. `message` is the service's `error` field, or a
    /// generic fallback.
    #[error("{message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A 2xx response whose body is not an analysis object.
    #[error("Malformed analysis response")]
    MalformedResponse,
}

impl AnalysisError {
    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            AnalysisError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = AnalysisError::Server {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Text is required".to_string(),
        };
        assert_eq!(err.to_string(), "Text is required");
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            AnalysisError::MalformedResponse.to_string(),
            "Malformed analysis response"
        );
        assert_eq!(AnalysisError::Timeout(30).to_string(), "Request timed out after 30s");
        assert!(AnalysisError::Timeout(30).status().is_none());
    }
}
