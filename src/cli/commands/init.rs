//! Init Command
//!
//! Create the global configuration and the history database.

use crate::cli::{Output, create_history_db, history_db_path};
use crate::config::ConfigLoader;
use crate::types::{FigsonaError, Result};

pub fn run(force: bool, output: &Output) -> Result<()> {
    let db_path = history_db_path()?;
    let config_exists = ConfigLoader::global_config_path().is_some_and(|p| p.exists());

    if config_exists && db_path.exists() && !force {
        return Err(FigsonaError::Config(
            "Already initialized. Use --force to overwrite.".to_string(),
        ));
    }

    let config_path = ConfigLoader::init_global(force)?;
    let db = create_history_db()?;
    tracing::debug!(schema_version = db.schema_version()?, "History database ready");

    output.success("Initialized figsona");
    println!("  Config:  {}", config_path.display());
    println!("  History: {}", db_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Create a personal access token in Figma (Settings > Security)");
    println!("  2. Set FIGMA_ACCESS_TOKEN or figma.token in the config file");
    println!("  3. Run 'figsona analyze <figma-url>'");

    Ok(())
}
