// rostersync CLI - keep a lookup sheet in step with the master roster

mod exit_codes;
mod sync;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "rostersync")]
#[command(about = "Sync supervisor names from a master roster into a lookup sheet")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean duplicates and upsert supervisors into the lookup sheet
    #[command(after_help = "\
Examples:
  rostersync sync --master allops.xlsx --target shorts.xlsx
  rostersync sync --master allops.xlsx --target shorts.xlsx --dry-run
  rostersync sync --master allops.xlsx --target shorts.xlsx --out updated.xlsx --json
  rostersync sync --master allops.csv --target shorts.xlsx --all --config columns.toml")]
    Sync(sync::SyncArgs),

    /// Validate a config file and print the effective settings
    #[command(after_help = "\
Examples:
  rostersync check-config columns.toml")]
    CheckConfig {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Sync(args) => sync::cmd_sync(args),
        Commands::CheckConfig { config } => cmd_check_config(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// check-config
// ============================================================================

fn cmd_check_config(config_path: PathBuf) -> Result<(), CliError> {
    let config = sync::load_config(Some(&config_path))?;
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| CliError::general(format!("cannot render config: {e}")))?;
    eprintln!("valid: {}", config_path.display());
    print!("{rendered}");
    Ok(())
}
