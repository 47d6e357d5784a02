//! Tool error types
//!
//! Every handler returns `Result<String, ToolError>`. The dispatcher is the
//! only place that turns a `ToolError` into response text (see
//! [`error_text`]).

use std::time::Duration;
use thiserror::Error;

use crate::kagi::KagiError;

/// Prefix marking a failed tool invocation
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Error, Debug)]
pub enum ToolError {
    /// A required argument is missing, empty or has the wrong shape
    #[error("{0}")]
    Validation(String),

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The Kagi API call failed
    #[error("{0}")]
    Upstream(#[from] KagiError),

    /// A single search exceeded the per-call ceiling
    #[error("Search for query \"{query}\" timed out after {}s", .timeout.as_secs_f64())]
    Timeout { query: String, timeout: Duration },

    /// The upstream returned a different number of result sets than queries were sent
    #[error("Expected {expected} result sets, got {actual}")]
    ResultCountMismatch { expected: usize, actual: usize },

    /// Task join failures and other invariant breaks
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Collapse a handler outcome into the text returned to the caller
pub fn into_response_text(result: Result<String, ToolError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => error_text(&e),
    }
}

/// `Error: <message>`, or the debug form if the message is empty
pub fn error_text(error: &ToolError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        format!("{}{:?}", ERROR_PREFIX, error)
    } else {
        format!("{}{}", ERROR_PREFIX, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_prefix() {
        let text = error_text(&ToolError::validation("Search called with no queries."));
        assert_eq!(text, "Error: Search called with no queries.");

        let text = error_text(&ToolError::UnknownTool("nope".to_string()));
        assert_eq!(text, "Error: Unknown tool: nope");
    }

    #[test]
    fn test_empty_message_falls_back_to_debug() {
        let text = error_text(&ToolError::validation(""));
        assert_eq!(text, "Error: Validation(\"\")");
    }

    #[test]
    fn test_timeout_message_names_query() {
        let err = ToolError::Timeout {
            query: "slow one".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "Search for query \"slow one\" timed out after 10s");
    }

    #[test]
    fn test_success_passes_through() {
        assert_eq!(into_response_text(Ok("fine".to_string())), "fine");
        assert!(into_response_text(Err(ToolError::internal("boom"))).starts_with(ERROR_PREFIX));
    }
}
