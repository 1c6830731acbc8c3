//! figsona - Design Personality Analysis for Figma Files
//!
//! Walks a Figma document tree, collects structural statistics (layers,
//! depth, colors, typography, components, complex frames), evaluates the
//! color palette, and classifies the file into one of a fixed set of design
//! archetypes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use figsona::{AnalysisPipeline, FigmaClient, ConfigLoader};
//!
//! let config = ConfigLoader::load()?;
//! let client = FigmaClient::new(&config.figma)?;
//! let pipeline = AnalysisPipeline::from_config(Arc::new(client), &config);
//! let report = pipeline.run("https://www.figma.com/design/<KEY>/Name").await?;
//! println!("{}", report.personality.primary_archetype);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: tree statistics and color harmony
//! - [`persona`]: archetype catalog and classification
//! - [`figma`]: file-key extraction and the REST client
//! - [`storage`]: SQLite history of recent files and reports
//! - [`config`]: layered configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod figma;
pub mod persona;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, OutputFormat};

// Error Types
pub use types::error::{ErrorCategory, FigsonaError, Result, ResultExt};

// Storage
pub use storage::{Database, HistoryStore, SharedDatabase};

// =============================================================================
// Analysis Re-exports
// =============================================================================

pub use analyzer::{AnalysisStats, ColorHarmonyProfile, TreeAnalyzer};
pub use figma::{DocumentSource, FigmaClient, StaticSource, extract_file_key};
pub use persona::{ClassificationResult, classify};
pub use pipeline::AnalysisPipeline;
pub use report::AnalysisReport;
pub use types::{DesignFile, DocumentNode, FileKey};
