//! Output artifacts: the updated workbook and the flat report.

use crate::config::ReconConfig;
use crate::error::Result;
use crate::normalize::ItemId;
use crate::reconcile::Reconciliation;
use crate::section::find_sections;
use crate::workbook::{WorkbookData, HEADER_ROW};
use chrono::Local;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tally_sheet::{CellValue, Sheet};
use tracing::{debug, info};

/// Where the two output files ended up.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub workbook: PathBuf,
    pub report: PathBuf,
}

/// Write both output artifacts into `output_dir`.
///
/// The updated workbook is rebuilt from the retained in-memory model:
/// every sheet is carried over, and each selected sheet has its section
/// amount columns overwritten with reconciled totals. Re-serialization
/// drops merged-region declarations, which is what the per-cell
/// overwrite requires. Both files are written to a temporary sibling
/// path and renamed into place, so a crash mid-write never leaves a
/// half-written output.
pub fn write_reports(
    data: &WorkbookData,
    recon: &Reconciliation,
    cfg: &ReconConfig,
    workbook_path: &Path,
    output_dir: &Path,
) -> Result<ReportPaths> {
    fs::create_dir_all(output_dir)?;
    let totals = recon.totals_by_id();

    let mut book = data.book.clone();
    for name in &data.selected {
        let sheet = book.get_sheet_mut(name)?;
        let sections = project_totals(sheet, &totals, cfg)?;
        debug!(sheet = %name, sections, "rewrote amount columns");
    }

    let basename = workbook_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook.xlsx".to_string());
    let updated_path = output_dir.join(format!("updated_{basename}"));
    persist(&updated_path, |tmp| book.save_as_xlsx(tmp))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let report_path = output_dir.join(format!("report_{timestamp}.xlsx"));
    let report_sheet = recon.to_sheet();
    persist(&report_path, |tmp| report_sheet.save_as_xlsx(tmp))?;

    info!(
        workbook = %updated_path.display(),
        report = %report_path.display(),
        "outputs written"
    );
    Ok(ReportPaths {
        workbook: updated_path,
        report: report_path,
    })
}

/// Relocate each section in the sheet and overwrite its amount column
/// with the resolved totals. Identifiers without a total get a blank
/// cell, never zero. Returns the number of sections rewritten.
fn project_totals(
    sheet: &mut Sheet,
    totals: &HashMap<ItemId, f64>,
    cfg: &ReconConfig,
) -> Result<usize> {
    let headers: Vec<String> = sheet.row(HEADER_ROW)?.iter().map(CellValue::as_str).collect();
    let sections = find_sections(&headers, cfg);

    for section in &sections {
        for row_idx in (HEADER_ROW + 1)..sheet.row_count() {
            let id = ItemId::from_cell(&sheet.get_or_null(row_idx, section.id_col));
            let value = totals
                .get(&id)
                .map_or(CellValue::Null, |total| CellValue::Float(*total));
            sheet.set(row_idx, section.amount_col, value);
        }
    }
    Ok(sections.len())
}

/// Write through a temporary sibling path, then rename into place.
fn persist<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> tally_sheet::Result<()>,
{
    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    write(&tmp)?;
    fs::rename(&tmp, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, f64)]) -> HashMap<ItemId, f64> {
        pairs
            .iter()
            .map(|(id, total)| (ItemId::from(*id), *total))
            .collect()
    }

    #[test]
    fn test_project_totals_overwrites_in_place() {
        let mut sheet = Sheet::from_data(vec![
            vec![CellValue::from("decorative"), CellValue::Null, CellValue::Null],
            vec![
                CellValue::from("Region"),
                CellValue::from("Mashgin ID #"),
                CellValue::from("Sales $"),
            ],
            vec![CellValue::from("east"), CellValue::Int(1), CellValue::Float(1.0)],
            vec![CellValue::from("east"), CellValue::Int(9), CellValue::Float(9.0)],
        ]);

        let n = project_totals(&mut sheet, &totals(&[("1", 100.0)]), &ReconConfig::default())
            .unwrap();
        assert_eq!(n, 1);
        // matched id gets the ledger total
        assert_eq!(sheet.get(2, 2).unwrap(), &CellValue::Float(100.0));
        // an id absent from the mapping is blanked, not zeroed
        assert_eq!(sheet.get(3, 2).unwrap(), &CellValue::Null);
        // identifier column and unrelated columns untouched
        assert_eq!(sheet.get(2, 1).unwrap(), &CellValue::Int(1));
        assert_eq!(sheet.get(3, 0).unwrap().as_str(), "east");
    }

    #[test]
    fn test_project_totals_without_sections_is_noop() {
        let mut sheet = Sheet::from_data(vec![
            vec![CellValue::from("x")],
            vec![CellValue::from("Notes")],
            vec![CellValue::from("keep me")],
        ]);
        let before = sheet.clone();
        let n = project_totals(&mut sheet, &totals(&[]), &ReconConfig::default()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(sheet.data(), before.data());
    }

    #[test]
    fn test_persist_renames_over_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.xlsx");
        persist(&target, |tmp| {
            Sheet::from_data(vec![vec!["x"]]).save_as_xlsx(tmp)
        })
        .unwrap();
        assert!(target.exists());
        assert!(!dir.path().join("out.xlsx.tmp").exists());
    }
}
