use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use figsona::cli::{CommandContext, Output, commands};
use figsona::config::OutputFormat;

/// Parse output format from string
fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "figsona")]
#[command(version, about = "Discover the design personality of a Figma file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,

    #[arg(long, short = 'f', global = true, value_parser = parse_output_format, help = "Output format: text, json, yaml")]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the global config and the history database
    Init {
        #[arg(long, help = "Overwrite existing configuration")]
        force: bool,
    },

    /// Fetch files from Figma and report their design personality
    Analyze {
        #[arg(required = true, help = "Figma file URLs or keys")]
        targets: Vec<String>,
        #[arg(long, help = "Do not record results in history")]
        no_history: bool,
    },

    /// Analyze a local JSON export
    Inspect {
        #[arg(help = "Path to a file response or node JSON")]
        path: PathBuf,
    },

    /// Print the latest stored report for a file
    Show {
        #[arg(help = "Figma file URL or key")]
        target: String,
    },

    /// List recently analyzed files
    Recent {
        #[arg(short = 'n', long, default_value = "10", help = "Maximum entries")]
        limit: usize,
    },

    /// Verify the Figma token
    Whoami,

    /// List the archetype catalog
    Archetypes,

    /// Clear history
    Clean {
        #[arg(long, help = "Also remove stored reports")]
        all: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
    },
    /// Show configuration file paths
    Path,
    /// Edit configuration file with $EDITOR
    Edit {
        #[arg(long, short, help = "Edit global config")]
        global: bool,
    },
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mfigsona encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace with RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    // stderr keeps stdout clean for --format json
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = Output::new(cli.quiet);

    match cli.command {
        Commands::Init { force } => {
            commands::init::run(force, &output)?;
        }
        Commands::Analyze {
            targets,
            no_history,
        } => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::analyze::run(&ctx, &targets, no_history))?;
        }
        Commands::Inspect { path } => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            commands::inspect::run(&ctx, &path)?;
        }
        Commands::Show { target } => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            commands::show::run(&ctx, &target)?;
        }
        Commands::Recent { limit } => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            commands::recent::run(&ctx, limit)?;
        }
        Commands::Whoami => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::whoami::run(&ctx))?;
        }
        Commands::Archetypes => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            commands::archetypes::run(&ctx)?;
        }
        Commands::Clean { all } => {
            let ctx = CommandContext::load(cli.format, cli.quiet)?;
            commands::clean::run(&ctx, all)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global } => {
                commands::config::show(global, cli.format.unwrap_or_default())?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Edit { global } => {
                commands::config::edit(global)?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force, &output)?;
            }
        },
    }

    Ok(())
}
