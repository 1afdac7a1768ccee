use crate::config::SyncConfig;
use crate::dedupe::resolve_duplicates;
use crate::error::ReconError;
use crate::merge::{reconcile, MergeMode, MergeOptions};
use crate::model::{SyncMeta, SyncOutcome};
use crate::roster::build_index;
use crate::workbook::Workbook;
use crate::worklist::extract_work_list;

/// Where the identifiers to reconcile come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkListSource {
    /// The data sheet of the target workbook.
    #[default]
    DataSheet,
    /// Every identifier in the master roster.
    AllAuthoritative,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub source: WorkListSource,
}

/// Run one sync: index the master, clean the lookup table, merge.
///
/// Every fatal condition surfaces before `run` returns, so a caller that
/// only saves on `Ok` never persists a half-finished workbook. In dry run
/// the target workbook is left exactly as it was passed in.
pub fn run(
    config: &SyncConfig,
    master: &Workbook,
    target: &mut Workbook,
    options: RunOptions,
) -> Result<SyncOutcome, ReconError> {
    let sheets = &config.sheets;

    let index = build_index(&sheets.master, master.sheet(&sheets.master)?, &config.master)?;

    let work_list = match options.source {
        WorkListSource::DataSheet => Some(extract_work_list(
            &sheets.data,
            target.sheet(&sheets.data)?,
            &config.data.identifier,
        )?),
        WorkListSource::AllAuthoritative => None,
    };

    let lookup = target.sheet_mut(&sheets.lookup)?;
    let cleanup = resolve_duplicates(&sheets.lookup, &mut *lookup, &config.lookup, options.dry_run)?;

    let mode = match &work_list {
        Some(list) => MergeMode::WorkList(&list.ids),
        None => MergeMode::AllAuthoritative,
    };
    // Safe duplicates only still exist when the cleanup was not applied.
    let pending_removal: &[usize] = if options.dry_run { &cleanup.plan.rows_to_remove } else { &[] };
    let merge = reconcile(
        &sheets.lookup,
        lookup,
        &config.lookup,
        &index,
        mode,
        MergeOptions { dry_run: options.dry_run, pending_removal },
    )?;
    let mode_label = mode.label().to_string();

    Ok(SyncOutcome {
        meta: SyncMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            dry_run: options.dry_run,
            mode: mode_label,
        },
        authoritative_records: index.len(),
        work_list,
        cleanup,
        merge,
    })
}
