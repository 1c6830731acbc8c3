//! Figma Access Module
//!
//! - `url`: file-key extraction from links and bare keys
//! - `client`: authenticated REST client with retry
//!
//! The pipeline only sees [`DocumentSource`], so it runs the same way against
//! the live API, a local export, or an in-memory fixture.

pub mod client;
pub mod url;

pub use client::FigmaClient;
pub use url::extract_file_key;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::types::{ApiError, DesignFile, ErrorCategory, FileKey, Result};

/// Anything that can produce a design file for a key
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, key: &FileKey) -> Result<DesignFile>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// In-memory source keyed by file key
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    files: HashMap<FileKey, DesignFile>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, key: impl Into<FileKey>, file: DesignFile) -> Self {
        self.files.insert(key.into(), file);
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn fetch(&self, key: &FileKey) -> Result<DesignFile> {
        self.files.get(key).cloned().ok_or_else(|| {
            ApiError::new(ErrorCategory::NotFound, format!("No file for key {}", key))
                .with_status(404)
                .into()
        })
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentNode, FigsonaError, NodeKind};

    #[tokio::test]
    async fn test_static_source() {
        let file = DesignFile::from_document(DocumentNode::new(NodeKind::Document, "Doc"));
        let source = StaticSource::new().with_file("abc", file.clone());

        assert_eq!(source.fetch(&FileKey::new("abc")).await.unwrap(), file);

        let err = source.fetch(&FileKey::new("zzz")).await.unwrap_err();
        assert!(matches!(err, FigsonaError::Api(ref e) if e.category == ErrorCategory::NotFound));
    }
}
