//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Classifies provider failures so the client can decide whether to retry.
//!
//! ## Error Categories
//!
//! - **Auth**: Token missing, invalid or expired (fail fast)
//! - **AccessDenied**: Token valid but the file is not shared with the user
//! - **NotFound**: The file key does not exist
//! - **RateLimit**: API rate limiting (wait and retry)
//! - **Network**: Connectivity issues (retry with backoff)
//! - **Transient**: Server-side 5xx errors (retry)
//!
//! Data-shape irregularities in a design file are never errors; only the
//! depth guard can fail an analysis.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Token rejected (401)
    Auth,
    /// File exists but the token may not read it (403)
    AccessDenied,
    /// File key unknown to the provider (404)
    NotFound,
    /// Rate limited - wait then retry
    RateLimit,
    /// Network/connectivity issues - retry with backoff
    Network,
    /// Temporary server issues - retry
    Transient,
    /// Invalid request - don't retry
    BadRequest,
    /// Response body could not be decoded
    ParseError,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "AUTH"),
            Self::AccessDenied => write!(f, "ACCESS_DENIED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Network => write!(f, "NETWORK"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Check if this category is worth retrying against the same endpoint
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Network | Self::Transient)
    }

    /// Get recommended retry delay for this category
    pub fn recommended_delay(&self) -> Duration {
        match self {
            Self::RateLimit => Duration::from_secs(30),
            Self::Network => Duration::from_secs(5),
            Self::Transient => Duration::from_secs(2),
            _ => Duration::from_millis(500),
        }
    }

    /// Short hint printed next to the error in the CLI
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Auth => Some("check the token (FIGSONA_FIGMA__TOKEN or FIGMA_ACCESS_TOKEN)"),
            Self::AccessDenied => {
                Some("the file is not shared with this account, or the session expired")
            }
            Self::NotFound => Some("make sure the file exists and the key is correct"),
            Self::RateLimit => Some("wait a minute and try again"),
            _ => None,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Provider API error with category, HTTP status, and retry hints
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category for retry decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Suggested wait time before retry (if applicable)
    pub retry_after: Option<Duration>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}:{}] {}", self.category, status, self.message),
            None => write!(f, "[{}] {}", self.category, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    /// Attach the HTTP status that produced this error
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add suggested retry delay
    pub fn retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }

    /// Get recommended retry delay
    pub fn recommended_delay(&self) -> Duration {
        self.retry_after
            .unwrap_or_else(|| self.category.recommended_delay())
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport failures and HTTP statuses onto categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify HTTP status code directly
    pub fn classify_http_status(status: u16, message: &str) -> ApiError {
        let err = match status {
            401 => ApiError::new(ErrorCategory::Auth, message),
            403 => ApiError::new(ErrorCategory::AccessDenied, message),
            404 => ApiError::new(ErrorCategory::NotFound, message),
            429 => ApiError::new(ErrorCategory::RateLimit, message)
                .retry_after(Duration::from_secs(30)),
            400 | 422 => ApiError::new(ErrorCategory::BadRequest, message),
            500..=599 => ApiError::new(ErrorCategory::Transient, message)
                .retry_after(Duration::from_secs(2)),
            _ => ApiError::new(ErrorCategory::Unknown, message),
        };
        err.with_status(status)
    }

    /// Classify a transport-level failure from reqwest
    pub fn classify_transport(err: &reqwest::Error) -> ApiError {
        if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &err.to_string());
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return ApiError::new(ErrorCategory::Network, err.to_string())
                .retry_after(Duration::from_secs(5));
        }
        if err.is_decode() {
            return ApiError::new(ErrorCategory::ParseError, err.to_string());
        }
        ApiError::new(ErrorCategory::Unknown, err.to_string())
    }

    /// Extract the provider's error message from a JSON body, if present
    pub fn provider_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("err")
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(String::from)
    }
}

// =============================================================================
// Analysis Error
// =============================================================================

/// Failures raised by the tree analyzer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Nesting exceeded the configured guard
    #[error("document tree too deep: depth {depth} exceeds limit {limit}")]
    TooDeep { depth: usize, limit: usize },
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum FigsonaError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Provider Errors
    // -------------------------------------------------------------------------
    #[error("Figma API error: {0}")]
    Api(ApiError),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Not a Figma file URL or key: {0}")]
    InvalidTarget(String),

    #[error("{failed} of {total} targets failed")]
    Incomplete { failed: usize, total: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not initialized: run 'figsona init' first")]
    NotInitialized,
}

impl From<ApiError> for FigsonaError {
    fn from(err: ApiError) -> Self {
        FigsonaError::Api(err)
    }
}

impl From<reqwest::Error> for FigsonaError {
    fn from(err: reqwest::Error) -> Self {
        FigsonaError::Api(ErrorClassifier::classify_transport(&err))
    }
}

pub type Result<T> = std::result::Result<T, FigsonaError>;

impl FigsonaError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Category of a provider error, if this is one
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Api(e) => Some(e.category),
            Self::Timeout { .. } => Some(ErrorCategory::Network),
            _ => None,
        }
    }

    /// Check if retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        self.category().is_some_and(|c| c.is_retryable())
    }

    /// Minimum pause before retrying; zero for non-provider errors
    pub fn recommended_delay(&self) -> Duration {
        match self {
            Self::Api(e) => e.recommended_delay(),
            other => other
                .category()
                .map(|c| c.recommended_delay())
                .unwrap_or_default(),
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| FigsonaError::Storage(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| FigsonaError::Storage(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
        assert_eq!(ErrorCategory::AccessDenied.to_string(), "ACCESS_DENIED");
        assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
    }

    #[test]
    fn test_error_category_retryable() {
        assert!(ErrorCategory::RateLimit.is_retryable());
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Transient.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::AccessDenied.is_retryable());
        assert!(!ErrorCategory::NotFound.is_retryable());
        assert!(!ErrorCategory::ParseError.is_retryable());
    }

    #[test]
    fn test_classify_http_status() {
        let auth = ErrorClassifier::classify_http_status(401, "Invalid token");
        assert_eq!(auth.category, ErrorCategory::Auth);
        assert_eq!(auth.status, Some(401));

        let denied = ErrorClassifier::classify_http_status(403, "Forbidden");
        assert_eq!(denied.category, ErrorCategory::AccessDenied);

        let missing = ErrorClassifier::classify_http_status(404, "Not found");
        assert_eq!(missing.category, ErrorCategory::NotFound);

        let limited = ErrorClassifier::classify_http_status(429, "Slow down");
        assert_eq!(limited.category, ErrorCategory::RateLimit);
        assert!(limited.is_retryable());

        let server = ErrorClassifier::classify_http_status(503, "Unavailable");
        assert_eq!(server.category, ErrorCategory::Transient);

        let odd = ErrorClassifier::classify_http_status(418, "Teapot");
        assert_eq!(odd.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_provider_message() {
        assert_eq!(
            ErrorClassifier::provider_message(r#"{"status":404,"err":"Not found"}"#),
            Some("Not found".to_string())
        );
        assert_eq!(
            ErrorClassifier::provider_message(r#"{"message":"Invalid token"}"#),
            Some("Invalid token".to_string())
        );
        assert_eq!(ErrorClassifier::provider_message("<html>"), None);
    }

    #[test]
    fn test_recommended_delay() {
        let rate_limit = ApiError::new(ErrorCategory::RateLimit, "test");
        assert!(rate_limit.recommended_delay() >= Duration::from_secs(30));

        let custom =
            ApiError::new(ErrorCategory::Unknown, "test").retry_after(Duration::from_secs(100));
        assert_eq!(custom.recommended_delay(), Duration::from_secs(100));

        let timeout = FigsonaError::timeout("GET /files/abc", Duration::from_secs(60));
        assert!(timeout.is_retryable());
        assert_eq!(timeout.recommended_delay(), Duration::from_secs(5));
        assert_eq!(
            FigsonaError::Config("bad".to_string()).recommended_delay(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new(ErrorCategory::NotFound, "File not found").with_status(404);
        assert_eq!(err.to_string(), "[NOT_FOUND:404] File not found");

        let err_no_status = ApiError::new(ErrorCategory::Network, "Connection failed");
        assert_eq!(err_no_status.to_string(), "[NETWORK] Connection failed");
    }

    #[test]
    fn test_figsona_error_retryable() {
        let api: FigsonaError = ApiError::new(ErrorCategory::Transient, "502").into();
        assert!(api.is_retryable());

        let analysis: FigsonaError = AnalysisError::TooDeep {
            depth: 10,
            limit: 5,
        }
        .into();
        assert!(!analysis.is_retryable());
        assert_eq!(
            analysis.to_string(),
            "Analysis failed: document tree too deep: depth 10 exceeds limit 5"
        );
    }
}
