//! End-to-end orchestration of a reconciliation run.

use crate::config::ReconConfig;
use crate::error::{ReconError, Result};
use crate::ledger::load_ledger;
use crate::reconcile::reconcile;
use crate::report::{write_reports, ReportPaths};
use crate::workbook::load_workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub fact_rows: usize,
    pub ledger_entries: usize,
    pub collapsed_duplicates: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub duplicate_ids: usize,
    pub outputs: ReportPaths,
}

/// Fail with [`ReconError::MissingInput`] unless both input files exist.
///
/// Called before any side effect; callers take their backup copy only
/// after this passes.
pub fn ensure_inputs(workbook: &Path, ledger: &Path) -> Result<()> {
    for path in [workbook, ledger] {
        if !path.exists() {
            return Err(ReconError::MissingInput(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Validate both inputs, then copy the workbook to `<workbook>.bak`.
///
/// The copy happens only after validation passes, so a run aborted on a
/// missing input leaves the filesystem untouched. Returns the backup path.
pub fn prepare_run(workbook: &Path, ledger: &Path) -> Result<PathBuf> {
    ensure_inputs(workbook, ledger)?;

    let mut backup = workbook.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    fs::copy(workbook, &backup)?;
    info!(backup = %backup.display(), "workbook backed up");
    Ok(backup)
}

/// Run the full pipeline: load both sources, reconcile, write outputs.
pub fn run(
    workbook: &Path,
    ledger: &Path,
    output_dir: &Path,
    cfg: &ReconConfig,
) -> Result<RunSummary> {
    ensure_inputs(workbook, ledger)?;

    let data = load_workbook(workbook, cfg)?;
    let ledger_table = load_ledger(ledger, cfg)?;
    let recon = reconcile(&data.facts, &ledger_table);
    let outputs = write_reports(&data, &recon, cfg, workbook, output_dir)?;

    Ok(RunSummary {
        fact_rows: data.facts.len(),
        ledger_entries: ledger_table.len(),
        collapsed_duplicates: ledger_table.collapsed,
        matched: recon.matched,
        unmatched: recon.unmatched,
        duplicate_ids: recon.duplicate_ids,
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_workbook_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("ledger.csv");
        std::fs::write(&ledger, "ITEM SALES\nPos Id,Count,Total\n1,1,1\n").unwrap();
        let out = dir.path().join("out");

        let err = run(
            &dir.path().join("nope.xlsx"),
            &ledger,
            &out,
            &ReconConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReconError::MissingInput(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_workbook_leaves_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("ledger.csv");
        std::fs::write(&ledger, "ITEM SALES\nPos Id,Count,Total\n1,1,1\n").unwrap();
        let workbook = dir.path().join("nope.xlsx");

        let err = prepare_run(&workbook, &ledger).unwrap_err();
        assert!(matches!(err, ReconError::MissingInput(_)));
        assert!(!dir.path().join("nope.xlsx.bak").exists());
    }

    #[test]
    fn test_backup_copies_workbook_contents() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = dir.path().join("aisles.xlsx");
        std::fs::write(&workbook, b"not really xlsx").unwrap();
        let ledger = dir.path().join("ledger.csv");
        std::fs::write(&ledger, "ITEM SALES\nPos Id,Count,Total\n1,1,1\n").unwrap();

        let backup = prepare_run(&workbook, &ledger).unwrap();
        assert_eq!(backup, dir.path().join("aisles.xlsx.bak"));
        assert_eq!(std::fs::read(&backup).unwrap(), b"not really xlsx");
    }
}
