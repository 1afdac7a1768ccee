//! `rostersync sync`: merge master-roster supervisors into the lookup sheet.

use std::path::{Path, PathBuf};

use clap::Args;
use rostersync_recon::engine::{RunOptions, WorkListSource};
use rostersync_recon::{ReconError, SyncConfig, SyncOutcome};

use crate::exit_codes::{io_exit_code, recon_exit_code, EXIT_CONFIG, EXIT_IO, EXIT_USAGE};
use crate::CliError;

#[derive(Args)]
pub struct SyncArgs {
    /// Master roster workbook (source of truth)
    #[arg(long)]
    pub master: PathBuf,

    /// Workbook holding the data and lookup sheets
    #[arg(long)]
    pub target: PathBuf,

    /// Master roster sheet [config default: Sheet1]
    #[arg(long)]
    pub master_sheet: Option<String>,

    /// Sheet listing the driver IDs to reconcile [config default: Data]
    #[arg(long)]
    pub data_sheet: Option<String>,

    /// Lookup sheet to update [config default: vlookup]
    #[arg(long)]
    pub vlookup_sheet: Option<String>,

    /// Output workbook; never the target itself (.xlsx, or .csv for the lookup sheet only)
    #[arg(long, short = 'o', default_value = "output.xlsx")]
    pub out: PathBuf,

    /// Compute and report everything, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Upsert every roster entry instead of the IDs on the data sheet
    #[arg(long)]
    pub all: bool,

    /// TOML file with sheet and column names
    #[arg(long, env = "ROSTERSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the run outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

fn config_err(err: ReconError) -> CliError {
    CliError::new(EXIT_CONFIG, err.to_string())
}

/// Load a config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig, CliError> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(EXIT_IO, format!("cannot read config {}: {e}", path.display())))?;
    SyncConfig::from_toml(&text).map_err(config_err)
}

fn engine_err(err: ReconError) -> CliError {
    let hint = match &err {
        ReconError::ConflictingName { .. } | ReconError::DuplicateIdentifier { .. } => {
            Some("fix the rows in the target workbook and run again; nothing was written")
        }
        ReconError::MissingColumn { .. } | ReconError::HeaderNotFound { .. } => {
            Some("check the header row, or set the column names with --config")
        }
        ReconError::NoSuchSheet(_) => Some("pick the sheet with --master-sheet, --data-sheet or --vlookup-sheet"),
        _ => None,
    };
    let cli_err = CliError::new(recon_exit_code(&err), err.to_string());
    match hint {
        Some(hint) => cli_err.with_hint(hint),
        None => cli_err,
    }
}

/// Lexically equal, or resolving to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn cmd_sync(args: SyncArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(name) = args.master_sheet {
        config.sheets.master = name;
    }
    if let Some(name) = args.data_sheet {
        config.sheets.data = name;
    }
    if let Some(name) = args.vlookup_sheet {
        config.sheets.lookup = name;
    }
    config.validate().map_err(config_err)?;

    if !args.dry_run && same_file(&args.out, &args.target) {
        return Err(CliError::new(EXIT_USAGE, "--out must differ from --target")
            .with_hint("the target workbook is never overwritten in place"));
    }

    let io_err = |e: rostersync_io::IoError| CliError::new(io_exit_code(&e), e.to_string());
    let master = rostersync_io::open(&args.master, &config.sheets.master).map_err(io_err)?;
    let mut target = rostersync_io::open(&args.target, &config.sheets.lookup).map_err(io_err)?;

    let options = RunOptions {
        dry_run: args.dry_run,
        source: if args.all { WorkListSource::AllAuthoritative } else { WorkListSource::DataSheet },
    };
    let outcome = rostersync_recon::run(&config, &master, &mut target, options).map_err(engine_err)?;

    print_summary(&outcome);

    if args.json {
        let json_str = serde_json::to_string_pretty(&outcome)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if args.dry_run {
        eprintln!("dry run enabled, no file written.");
        return Ok(());
    }

    rostersync_io::save(&target, &args.out, &config.sheets.lookup).map_err(io_err)?;
    eprintln!("update completed: wrote {}", args.out.display());
    Ok(())
}

/// Human summary to stderr. Missing identifiers are warnings, not failures.
fn print_summary(outcome: &SyncOutcome) {
    let cleanup = &outcome.cleanup;
    let merge = &outcome.merge;
    let verb = if outcome.meta.dry_run { "would remove" } else { "removed" };

    if let Some(ref work) = outcome.work_list {
        eprintln!(
            "work list: {} driver(s), {} repeated row(s) ignored",
            work.ids.len(),
            work.skipped.len(),
        );
    }
    eprintln!(
        "sync: {} roster record(s); cleanup {verb} {} duplicate row(s); {} updated, {} appended",
        outcome.authoritative_records,
        cleanup.plan.len(),
        merge.updated,
        merge.appended,
    );

    let missing = &merge.report.missing_in_authority;
    if !missing.is_empty() {
        eprintln!("WARNING: Drivers missing in master ({}):", missing.len());
        for id in missing {
            eprintln!("  - {id}");
        }
    }
}
