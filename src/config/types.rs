//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (`$XDG_CONFIG_HOME/figsona/`) and project (`.figsona/`) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{analysis, history, network};
use crate::types::{FigsonaError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Figma API access
    pub figma: FigmaConfig,

    /// Document analysis limits
    pub analysis: AnalysisConfig,

    /// Report output
    pub output: OutputConfig,

    /// Recent-files history
    pub history: HistoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            figma: FigmaConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `FigsonaError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.figma.timeout_secs == 0 {
            return Err(FigsonaError::Config(
                "figma.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.figma.connect_timeout_secs == 0 {
            return Err(FigsonaError::Config(
                "figma.connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(1..=analysis::MAX_DEPTH_CEILING).contains(&self.analysis.max_depth) {
            return Err(FigsonaError::Config(format!(
                "analysis.max_depth must be between 1 and {}, got {}",
                analysis::MAX_DEPTH_CEILING,
                self.analysis.max_depth
            )));
        }

        if !(1..=history::MAX_CONCURRENCY).contains(&self.analysis.concurrency) {
            return Err(FigsonaError::Config(format!(
                "analysis.concurrency must be between 1 and {}, got {}",
                history::MAX_CONCURRENCY,
                self.analysis.concurrency
            )));
        }

        if self.history.max_entries == 0 {
            return Err(FigsonaError::Config(
                "history.max_entries must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Copy safe to print: the token is masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.figma.token.is_some() {
            config.figma.token = Some("[REDACTED]".to_string());
        }
        config
    }
}

// =============================================================================
// Figma Configuration
// =============================================================================

/// How the token is presented to the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Personal access token (`X-Figma-Token` header)
    #[default]
    Personal,
    /// OAuth access token (`Authorization: Bearer`)
    Oauth,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Personal => write!(f, "personal"),
            TokenKind::Oauth => write!(f, "oauth"),
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personal" => Ok(TokenKind::Personal),
            "oauth" => Ok(TokenKind::Oauth),
            _ => Err(format!(
                "Unknown token kind: {}. Valid values: personal, oauth",
                s
            )),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaConfig {
    /// API base URL
    pub api_base: String,

    /// Access token; `FIGMA_ACCESS_TOKEN` is used when unset
    pub token: Option<String>,

    pub token_kind: TokenKind,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Retries for rate limits, network errors and 5xx responses
    pub max_retries: usize,
}

impl std::fmt::Debug for FigmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaConfig")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_kind", &self.token_kind)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base: network::DEFAULT_API_BASE.to_string(),
            token: None,
            token_kind: TokenKind::Personal,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: network::CONNECTION_TIMEOUT_SECS,
            max_retries: network::MAX_NETWORK_RETRIES,
        }
    }
}

impl FigmaConfig {
    /// Configured token, falling back to `FIGMA_ACCESS_TOKEN`
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var(network::TOKEN_ENV_FALLBACK).ok())
            .filter(|t| !t.trim().is_empty())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nesting depth at which traversal aborts
    pub max_depth: usize,

    /// Files analyzed concurrently by `analyze`
    pub concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: analysis::DEFAULT_MAX_DEPTH,
            concurrency: 4,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: text, json, yaml",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

// =============================================================================
// History Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Record analyses in the local history database
    pub enabled: bool,

    /// Recent files kept
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: history::DEFAULT_MAX_ENTRIES,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.figma.api_base, "https://api.figma.com/v1");
        assert_eq!(config.figma.token_kind, TokenKind::Personal);
        assert_eq!(config.analysis.max_depth, 1024);
        assert_eq!(config.history.max_entries, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = Config::default();
        config.analysis.concurrency = 0;
        assert!(config.validate().is_err());
        config.analysis.concurrency = 17;
        assert!(config.validate().is_err());
        config.analysis.concurrency = 16;
        assert!(config.validate().is_ok());

        config.analysis.max_depth = 0;
        assert!(config.validate().is_err());
        config.analysis.max_depth = 1025;
        assert!(config.validate().is_err());
        config.analysis.max_depth = 1024;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.figma.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.history.max_entries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enums_parse_and_display() {
        assert_eq!("oauth".parse::<TokenKind>().unwrap(), TokenKind::Oauth);
        assert_eq!(TokenKind::Personal.to_string(), "personal");
        assert!("basic".parse::<TokenKind>().is_err());

        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_token_is_redacted() {
        let mut config = Config::default();
        config.figma.token = Some("figd_secret".to_string());

        assert!(!format!("{:?}", config).contains("figd_secret"));
        assert_eq!(config.redacted().figma.token.as_deref(), Some("[REDACTED]"));
        assert_eq!(Config::default().redacted().figma.token, None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[figma]\ntoken_kind = \"oauth\"\n").unwrap();
        assert_eq!(config.figma.token_kind, TokenKind::Oauth);
        assert_eq!(config.figma.timeout_secs, 60);
        assert_eq!(config.output.format, OutputFormat::Text);
    }
}
