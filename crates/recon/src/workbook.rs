//! Workbook loading: selected sheets to the canonical fact table.

use crate::config::ReconConfig;
use crate::error::Result;
use crate::normalize::{parse_amount, ItemId};
use crate::section::find_sections;
use std::path::Path;
use tally_sheet::{Book, CellValue, Sheet};
use tracing::{debug, info, warn};

/// 0-based index of the real header row. Sheet row 1 is a decorative
/// super-header and carries no column names.
pub const HEADER_ROW: usize = 1;

/// One (identifier, amount) occurrence extracted from a section.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub id: ItemId,
    pub amount: f64,
}

/// The concatenation of all section rows from all selected sheets.
///
/// Occurrences are kept as-is; an id appearing in several sections shows
/// up once per section.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    pub rows: Vec<FactRow>,
}

impl FactTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the rest of the run needs from the workbook: the canonical
/// fact table, the untouched full workbook model, and which sheets were
/// selected (the report writer rewrites only those).
#[derive(Debug, Clone)]
pub struct WorkbookData {
    pub facts: FactTable,
    pub book: Book,
    pub selected: Vec<String>,
}

/// Load the workbook and extract every section of every selected sheet.
///
/// Sheets that fail extraction are skipped with a warning; rows with an
/// unparseable amount are dropped from the fact table (never from the
/// retained workbook model).
pub fn load_workbook(path: &Path, cfg: &ReconConfig) -> Result<WorkbookData> {
    let book = Book::from_xlsx(path)?;

    let mut facts = FactTable::default();
    let mut selected = Vec::new();

    for (name, sheet) in book.sheets() {
        if !cfg.selector.matches(name) {
            continue;
        }
        match extract_sheet(sheet, cfg, &mut facts) {
            Ok(appended) => {
                info!(sheet = %name, rows = appended, "loaded sheet");
                selected.push(name.clone());
            }
            Err(e) => {
                warn!(sheet = %name, error = %e, "skipping sheet");
            }
        }
    }

    info!(
        sheets = selected.len(),
        facts = facts.len(),
        "workbook loaded"
    );
    Ok(WorkbookData {
        facts,
        book,
        selected,
    })
}

/// Append one sheet's section rows to the fact table. Returns the number
/// of rows appended.
fn extract_sheet(sheet: &Sheet, cfg: &ReconConfig, facts: &mut FactTable) -> Result<usize> {
    let headers: Vec<String> = sheet.row(HEADER_ROW)?.iter().map(CellValue::as_str).collect();
    let sections = find_sections(&headers, cfg);
    debug!(sheet = %sheet.name(), sections = sections.len(), "scanned headers");

    let mut appended = 0;
    for section in &sections {
        for row_idx in (HEADER_ROW + 1)..sheet.row_count() {
            let id_cell = sheet.get_or_null(row_idx, section.id_col);
            let amount_cell = sheet.get_or_null(row_idx, section.amount_col);
            if id_cell.is_blank() && amount_cell.is_blank() {
                continue;
            }

            let id = ItemId::from_cell(&id_cell);
            if id.is_empty() {
                debug!(
                    sheet = %sheet.name(),
                    row = row_idx + 1,
                    "dropping row without identifier"
                );
                continue;
            }

            match parse_amount(&amount_cell) {
                Ok(amount) => {
                    facts.rows.push(FactRow { id, amount });
                    appended += 1;
                }
                Err(e) => {
                    warn!(
                        sheet = %sheet.name(),
                        row = row_idx + 1,
                        error = %e,
                        "dropping row with unparseable amount"
                    );
                }
            }
        }
    }
    Ok(appended)
}
