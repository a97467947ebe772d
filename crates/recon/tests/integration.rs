//! End-to-end pipeline tests against real files on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tally_recon::{run, ReconConfig};
use tally_sheet::{Book, CellValue, Sheet};
use tempfile::tempdir;

fn aisle_workbook(path: &Path) {
    let aisle = Sheet::from_data(vec![
        vec![
            CellValue::from("Aisle overview"),
            CellValue::Null,
            CellValue::Null,
            CellValue::Null,
        ],
        vec![
            CellValue::from("Mashgin ID #"),
            CellValue::from("Sales $"),
            CellValue::from("Mashgin ID # (snacks)"),
            CellValue::from("Sales $ (snacks)"),
        ],
        vec![
            CellValue::Int(1),
            CellValue::Float(10.0),
            CellValue::Int(2),
            CellValue::Float(20.0),
        ],
        vec![
            CellValue::Int(2),
            CellValue::Float(20.0),
            CellValue::Int(3),
            CellValue::Float(30.0),
        ],
    ]);
    let notes = Sheet::from_data(vec![vec!["untouched"]]);

    let mut book = Book::new();
    book.add_sheet("Aisle 1", aisle).unwrap();
    book.add_sheet("Notes", notes).unwrap();
    book.save_as_xlsx(path).unwrap();
}

fn ledger_csv(path: &Path) {
    fs::write(
        path,
        "Store,Front\n\
         ITEM SALES\n\
         Pos Id,Name,Count,Total\n\
         1,Apple,1,100\n\
         2,Pear,2,200\n\
         3,Fig,3,300\n",
    )
    .unwrap();
}

fn find_report(dir: &Path) -> PathBuf {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("report_") && n.ends_with(".xlsx"))
        })
        .expect("flat report written")
}

#[test]
fn test_overlapping_sections_reconcile_end_to_end() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("aisles.xlsx");
    let ledger = dir.path().join("export.csv");
    let out = dir.path().join("out");
    aisle_workbook(&workbook);
    ledger_csv(&ledger);

    let summary = run(&workbook, &ledger, &out, &ReconConfig::default()).unwrap();

    // two sections, two data rows each; id 2 appears in both sections
    assert_eq!(summary.fact_rows, 4);
    assert_eq!(summary.ledger_entries, 3);
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.unmatched, 0);
    assert_eq!(summary.duplicate_ids, 1);

    // updated workbook keeps original positions, amounts replaced
    let updated = Book::from_xlsx(&summary.outputs.workbook).unwrap();
    let aisle = updated.get_sheet("Aisle 1").unwrap();
    assert_eq!(aisle.get(0, 0).unwrap().as_str(), "Aisle overview");
    assert_eq!(aisle.get(1, 0).unwrap().as_str(), "Mashgin ID #");
    assert_eq!(aisle.get(2, 1).unwrap().as_float(), Some(100.0));
    assert_eq!(aisle.get(2, 3).unwrap().as_float(), Some(200.0));
    assert_eq!(aisle.get(3, 1).unwrap().as_float(), Some(200.0));
    assert_eq!(aisle.get(3, 3).unwrap().as_float(), Some(300.0));
    // identifier columns untouched
    assert_eq!(aisle.get(3, 0).unwrap().as_float(), Some(2.0));
    // unrelated sheet carried over
    assert_eq!(
        updated.get_sheet("Notes").unwrap().get(0, 0).unwrap().as_str(),
        "untouched"
    );

    // flat report: header plus one row per fact occurrence
    let report_path = find_report(&out);
    let name = report_path.file_name().unwrap().to_str().unwrap();
    // report_YYYYMMDD_HHMMSS.xlsx
    assert_eq!(name.len(), "report_00000000_000000.xlsx".len());
    let report = Sheet::from_xlsx_sheet(&report_path, "Report").unwrap();
    assert_eq!(report.row_count(), 5);
    assert_eq!(report.get(0, 0).unwrap().as_str(), "Mashgin ID");
    let ids: Vec<String> = (1..5).map(|r| report.get(r, 0).unwrap().as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "2", "3"]);
    let totals: Vec<f64> = (1..5)
        .map(|r| report.get(r, 2).unwrap().as_float().unwrap())
        .collect();
    assert_eq!(totals, vec![100.0, 200.0, 200.0, 300.0]);
}

#[test]
fn test_unmatched_ids_keep_original_amounts() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("aisles.xlsx");
    let ledger = dir.path().join("export.csv");
    let out = dir.path().join("out");
    aisle_workbook(&workbook);
    // ledger covers only id 1
    fs::write(&ledger, "ITEM SALES\nPos Id,Name,Count,Total\n1,Apple,1,100\n").unwrap();

    let summary = run(&workbook, &ledger, &out, &ReconConfig::default()).unwrap();
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.unmatched, 3);

    let updated = Book::from_xlsx(&summary.outputs.workbook).unwrap();
    let aisle = updated.get_sheet("Aisle 1").unwrap();
    assert_eq!(aisle.get(2, 1).unwrap().as_float(), Some(100.0));
    // unmatched ids fall back to their original amounts, never blank or zero
    assert_eq!(aisle.get(2, 3).unwrap().as_float(), Some(20.0));
    assert_eq!(aisle.get(3, 3).unwrap().as_float(), Some(30.0));
    let report = Sheet::from_xlsx_sheet(&find_report(&out), "Report").unwrap();
    assert_eq!(report.get(2, 2).unwrap().as_float(), Some(20.0));
}
