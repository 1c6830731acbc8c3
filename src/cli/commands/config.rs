//! Config Command
//!
//! Manage figsona configuration.
//!
//! Usage:
//!   figsona config show [-g] [--format json]
//!   figsona config path
//!   figsona config edit [-g]
//!   figsona config init [-g] [--force]

use crate::cli::Output;
use crate::config::{ConfigLoader, OutputFormat};
use crate::types::Result;

/// Show the merged configuration, or the raw global file with `global`
pub fn show(global: bool, format: OutputFormat) -> Result<()> {
    if !global {
        return match format {
            OutputFormat::Yaml => {
                let config = ConfigLoader::load()?.redacted();
                print!("{}", serde_yaml::to_string(&config)?);
                Ok(())
            }
            _ => ConfigLoader::show_config(format == OutputFormat::Json),
        };
    }

    match ConfigLoader::global_config_path() {
        Some(path) if path.exists() => {
            println!("# Global Config: {}\n", path.display());
            println!("{}", std::fs::read_to_string(&path)?);
        }
        Some(_) => {
            println!("No global config found.");
            println!("Run 'figsona config init --global' to create one.");
        }
        None => println!("Cannot determine global config directory."),
    }
    Ok(())
}

pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn edit(global: bool) -> Result<()> {
    ConfigLoader::edit_config(global)
}

pub fn init(global: bool, force: bool, output: &Output) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    let scope = if global { "global" } else { "project" };
    output.success(&format!("Initialized {} configuration", scope));
    println!("  Config: {}", path.display());
    Ok(())
}
