//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config ($XDG_CONFIG_HOME/figsona/config.toml)
//! 3. Project config (.figsona/config.toml)
//! 4. Environment variables (FIGSONA_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
