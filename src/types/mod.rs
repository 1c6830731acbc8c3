pub mod document;
pub mod error;
pub mod utils;

pub use document::{
    BoundingBox, DesignFile, DocumentNode, FigmaUser, NodeKind, Paint, Rgba, TypeStyle,
};
pub use error::{
    AnalysisError, ApiError, ErrorCategory, ErrorClassifier, FigsonaError, Result, ResultExt,
};
pub use utils::{format_thousands, log_filter_error};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Type-safe wrapper for Figma file keys
///
/// Prevents accidental mixing of raw URLs with extracted keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey(String);

impl FileKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FileKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FileKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FileKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod newtype_tests {
    use super::*;

    #[test]
    fn test_file_key() {
        let key = FileKey::new("abcDEF123");
        assert_eq!(key.as_str(), "abcDEF123");
        assert_eq!(format!("{}", key), "abcDEF123");
        assert_eq!(key.into_inner(), "abcDEF123");
    }
}
