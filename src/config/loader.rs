//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config ($XDG_CONFIG_HOME/figsona/config.toml)
//! 3. Project config (.figsona/config.toml)
//! 4. Environment variables (FIGSONA_* prefix, `__` between sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::types::Config;
use crate::types::{FigsonaError, Result};

const ENV_PREFIX: &str = "FIGSONA_";
const APP_DIR: &str = "figsona";
const PROJECT_DIR: &str = ".figsona";
const HISTORY_DB: &str = "history.db";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Resolve the chain from explicit file locations. Missing files are skipped.
    pub fn load_layers(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // FIGSONA_FIGMA__TOKEN -> figma.token
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| FigsonaError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| FigsonaError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory ($XDG_CONFIG_HOME/figsona/)
    pub fn global_dir() -> Option<PathBuf> {
        Self::xdg_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to the data directory ($XDG_DATA_HOME/figsona/)
    pub fn data_dir() -> Option<PathBuf> {
        Self::xdg_dir("XDG_DATA_HOME", ".local/share")
    }

    /// Get path to the history database
    pub fn history_db_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join(HISTORY_DB))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project config directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(PROJECT_DIR)
    }

    fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
        env::var(var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(home_fallback))
            })
            .map(|p| p.join(APP_DIR))
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        if let Some(db) = Self::history_db_path() {
            let exists = if db.exists() { "✓" } else { "✗" };
            println!("  History: {} {}", exists, db.display());
        }
    }

    /// Show current effective configuration with the token masked
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?.redacted();

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| FigsonaError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    /// Edit config file with default editor
    pub fn edit_config(global: bool) -> Result<()> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                FigsonaError::Config("Cannot determine global config path".to_string())
            })?
        } else {
            Self::project_config_path()
        };

        if !path.exists() {
            println!("Config file does not exist: {}", path.display());
            println!(
                "Run: figsona config init {}",
                if global { "--global" } else { "" }
            );
            return Ok(());
        }

        let editor = env::var("EDITOR").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        });

        let status = Command::new(&editor).arg(&path).status().map_err(|e| {
            FigsonaError::Config(format!("Failed to launch editor {}: {}", editor, e))
        })?;

        if !status.success() {
            return Err(FigsonaError::Config("Editor exited with error".to_string()));
        }

        println!("Config saved: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration and the data directory
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            FigsonaError::Config("Cannot determine global config directory".to_string())
        })?;
        fs::create_dir_all(&global_dir)?;

        if let Some(data_dir) = Self::data_dir() {
            fs::create_dir_all(&data_dir)?;
        }

        let config_path = global_dir.join("config.toml");
        Self::write_config(&config_path, &Self::default_global_config(), force)?;
        Ok(config_path)
    }

    /// Initialize project configuration in the current directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        fs::create_dir_all(&project_dir)?;

        let config_path = project_dir.join("config.toml");
        Self::write_config(&config_path, &Self::default_project_config(), force)?;
        Ok(config_path)
    }

    fn write_config(path: &Path, content: &str, force: bool) -> Result<()> {
        if !path.exists() || force {
            fs::write(path, content)?;
            info!("Created config: {}", path.display());
        } else {
            info!("Config exists: {}", path.display());
        }
        Ok(())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default global config content (TOML)
    fn default_global_config() -> String {
        r#"# figsona global configuration
# Project settings in .figsona/config.toml override these.

version = "1.0"

[figma]
api_base = "https://api.figma.com/v1"
# token = "figd_..."        # or set FIGMA_ACCESS_TOKEN
token_kind = "personal"     # personal | oauth
timeout_secs = 60
connect_timeout_secs = 10
max_retries = 3

[analysis]
max_depth = 1024
concurrency = 4

[output]
format = "text"             # text | json | yaml

[history]
enabled = true
max_entries = 10
"#
        .to_string()
    }

    /// Default project config content (TOML)
    fn default_project_config() -> String {
        r#"# figsona project configuration
# Overrides the global configuration for this directory.

version = "1.0"

[output]
format = "text"
"#
        .to_string()
    }
}
