use serde::Serialize;

// ---------------------------------------------------------------------------
// Master roster
// ---------------------------------------------------------------------------

/// One authoritative roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorRecord {
    pub identifier: String,
    pub display_name: String,
    pub supervisor_name: String,
}

// ---------------------------------------------------------------------------
// Work list
// ---------------------------------------------------------------------------

/// A repeated identifier in the work-list source that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDuplicate {
    pub identifier: String,
    /// 1-based row of the skipped occurrence.
    pub row: usize,
}

/// Unique identifiers in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkList {
    pub ids: Vec<String>,
    pub skipped: Vec<SkippedDuplicate>,
}

// ---------------------------------------------------------------------------
// Duplicate cleanup
// ---------------------------------------------------------------------------

/// Safe duplicates found in the lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupPlan {
    /// 1-based row numbers, highest first so removals never shift a pending row.
    pub rows_to_remove: Vec<usize>,
}

impl CleanupPlan {
    pub fn len(&self) -> usize {
        self.rows_to_remove.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows_to_remove.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    pub plan: CleanupPlan,
    /// Rows physically removed. Zero in dry run.
    pub removed: usize,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Identifiers that could not be reconciled. Non-fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub missing_in_authority: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing_in_authority.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Existing rows whose supervisor cell was (or would be) overwritten.
    pub updated: usize,
    /// Rows appended (or that would be appended).
    pub appended: usize,
    pub report: ValidationReport,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SyncMeta {
    pub engine_version: String,
    pub run_at: String,
    pub dry_run: bool,
    pub mode: String,
}

/// Everything one run decided, returned alongside (never instead of) success.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub meta: SyncMeta,
    pub authoritative_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_list: Option<WorkList>,
    pub cleanup: CleanupOutcome,
    pub merge: MergeOutcome,
}
