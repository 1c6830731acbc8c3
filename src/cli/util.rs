//! CLI Common Utilities
//!
//! Shared context for command handlers: merged configuration, the chosen
//! output format, and access to the history database.

use std::path::PathBuf;
use std::sync::Arc;

use super::Output;
use crate::config::{Config, ConfigLoader, OutputFormat};
use crate::report::AnalysisReport;
use crate::storage::{Database, HistoryStore, SharedDatabase};
use crate::types::{FigsonaError, Result};

/// Command execution context
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// `--format` if given, otherwise `output.format` from config
    pub format: OutputFormat,
    pub output: Output,
}

impl CommandContext {
    /// Load configuration and resolve the output format
    pub fn load(format: Option<OutputFormat>, quiet: bool) -> Result<Self> {
        let config = ConfigLoader::load()?;
        Ok(Self::with_config(config, format, quiet))
    }

    pub fn with_config(config: Config, format: Option<OutputFormat>, quiet: bool) -> Self {
        let format = format.unwrap_or(config.output.format);
        Self {
            config,
            format,
            output: Output::new(quiet),
        }
    }

    /// History database for recording, or `None` when history is off.
    ///
    /// Created on first use so `analyze` works before `init`.
    pub fn recording_db(&self) -> Result<Option<SharedDatabase>> {
        if !self.config.history.enabled {
            return Ok(None);
        }
        Ok(Some(Arc::new(create_history_db()?)))
    }

    /// Open an existing history database
    pub fn history_db(&self) -> Result<Database> {
        open_history_db()
    }

    pub fn history<'a>(&self, db: &'a Database) -> HistoryStore<'a> {
        HistoryStore::new(db, self.config.history.max_entries)
    }

    /// Print reports on stdout in the selected format.
    ///
    /// More than one report is emitted as a list for JSON and YAML.
    pub fn print_reports(&self, reports: &[AnalysisReport]) -> Result<()> {
        match (self.format, reports) {
            (_, [single]) => println!("{}", single.render(self.format)?),
            (OutputFormat::Text, many) => {
                for report in many {
                    println!("{}", report.render_text());
                }
            }
            (OutputFormat::Json, many) => println!("{}", serde_json::to_string_pretty(many)?),
            (OutputFormat::Yaml, many) => print!("{}", serde_yaml::to_string(many)?),
        }
        Ok(())
    }

    /// Serialize any value for the JSON and YAML formats.
    ///
    /// Returns `false` for text so the caller renders it instead.
    pub fn print_structured<T: serde::Serialize>(&self, value: &T) -> Result<bool> {
        match self.format {
            OutputFormat::Text => Ok(false),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
                Ok(true)
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(value)?);
                Ok(true)
            }
        }
    }
}

/// History database location
pub fn history_db_path() -> Result<PathBuf> {
    ConfigLoader::history_db_path().ok_or_else(|| {
        FigsonaError::Config("Cannot determine data directory for history".to_string())
    })
}

/// Open the history database, failing with `NotInitialized` if it is missing
pub fn open_history_db() -> Result<Database> {
    let db_path = history_db_path()?;
    if !db_path.exists() {
        return Err(FigsonaError::NotInitialized);
    }

    let db = Database::open(&db_path)?;
    // Creates any missing tables
    db.initialize()?;
    Ok(db)
}

/// Create (or open) and initialize the history database
pub fn create_history_db() -> Result<Database> {
    let db = Database::open(history_db_path()?)?;
    db.initialize()?;
    Ok(db)
}
