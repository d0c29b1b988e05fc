//! Result and error types for Carrito.

use thiserror::Error;

/// Result type for Carrito operations
pub type CarritoResult<T> = Result<T, CarritoError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum CarritoError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Script evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// An interaction or query did not become satisfiable within its timeout
    #[error("{action} on {selector} timed out after {ms}ms")]
    ActionTimeout {
        /// The interaction that timed out (click, fill, ...)
        action: String,
        /// Selector description of the target element
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Scraped text does not match the expected shape
    #[error("Malformed {context}: {text:?}")]
    MalformedContent {
        /// What was being parsed (product metadata, pricing block, ...)
        context: String,
        /// The offending text
        text: String,
    },

    /// Fixture setup failed
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CarritoError {
    /// Build an [`CarritoError::ActionTimeout`] for a facade operation.
    pub(crate) fn action_timeout(
        action: impl Into<String>,
        selector: impl Into<String>,
        ms: u64,
    ) -> Self {
        Self::ActionTimeout {
            action: action.into(),
            selector: selector.into(),
            ms,
        }
    }

    /// Build a [`CarritoError::MalformedContent`] for a scrape-parse failure.
    pub(crate) fn malformed(context: impl Into<String>, text: impl Into<String>) -> Self {
        Self::MalformedContent {
            context: context.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_timeout_display() {
        let err = CarritoError::action_timeout("click", "button.btn", 5000);
        assert_eq!(err.to_string(), "click on button.btn timed out after 5000ms");
    }

    #[test]
    fn test_malformed_content_display() {
        let err = CarritoError::malformed("product metadata", "Brand Apple");
        assert!(err.to_string().contains("product metadata"));
        assert!(err.to_string().contains("Brand Apple"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CarritoError = io.into();
        assert!(matches!(err, CarritoError::Io(_)));
    }
}
