//! Ledger export loading: the authoritative totals table.

use crate::config::ReconConfig;
use crate::error::{ReconError, Result};
use crate::normalize::{parse_amount, ItemId};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Authoritative amount and sale count for one identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry {
    pub amount: f64,
    pub count: i64,
}

/// One row per distinct identifier, duplicates collapsed by summation.
#[derive(Debug, Clone, Default)]
pub struct LedgerTable {
    entries: IndexMap<ItemId, LedgerEntry>,
    /// How many export rows were folded into an earlier row with the
    /// same identifier.
    pub collapsed: usize,
}

impl LedgerTable {
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LedgerEntry> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &LedgerEntry)> {
        self.entries.iter()
    }
}

/// Load the delimited ledger export.
///
/// Everything up to and including the first line containing the marker
/// ("ITEM SALES") is preamble and discarded; the next line is the header
/// row. Malformed rows are logged and skipped; duplicate identifiers are
/// collapsed by summing amount and count.
pub fn load_ledger(path: &Path, cfg: &ReconConfig) -> Result<LedgerTable> {
    let content = fs::read_to_string(path)?;
    let table = parse_ledger(&content, cfg)?;
    info!(
        entries = table.len(),
        collapsed = table.collapsed,
        "ledger export loaded"
    );
    Ok(table)
}

/// Parse ledger export content. Split out from the file read for tests.
pub fn parse_ledger(content: &str, cfg: &ReconConfig) -> Result<LedgerTable> {
    let marker_line = content
        .lines()
        .position(|line| line.contains(&cfg.ledger_marker))
        .ok_or_else(|| ReconError::LedgerMarker {
            marker: cfg.ledger_marker.clone(),
        })?;

    let body = content
        .lines()
        .skip(marker_line + 1)
        .collect::<Vec<_>>()
        .join("\n");
    let sheet = tally_sheet::Sheet::from_csv_str(&body)?;
    if sheet.row_count() < 2 {
        return Err(ReconError::EmptyLedger);
    }

    let headers: Vec<String> = sheet
        .row(0)?
        .iter()
        .map(|c| c.as_str().trim().to_string())
        .collect();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                name: name.to_string(),
            })
    };
    let id_col = column(&cfg.ledger_id_col)?;
    let total_col = column(&cfg.ledger_total_col)?;
    let count_col = column(&cfg.ledger_count_col)?;

    let mut table = LedgerTable::default();
    let mut saw_rows = false;
    for row_idx in 1..sheet.row_count() {
        let id_cell = sheet.get_or_null(row_idx, id_col);
        let total_cell = sheet.get_or_null(row_idx, total_col);
        if id_cell.is_blank() && total_cell.is_blank() {
            continue;
        }
        saw_rows = true;

        let id = ItemId::from_ledger_cell(&id_cell);
        let amount = match parse_amount(&total_cell) {
            Ok(a) => a,
            Err(e) => {
                warn!(row = row_idx + 1, error = %e, "skipping ledger row");
                continue;
            }
        };
        let count = sheet.get_or_null(row_idx, count_col).as_int().unwrap_or(0);

        match table.entries.entry(id) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.amount += amount;
                entry.count += count;
                table.collapsed += 1;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(LedgerEntry { amount, count });
            }
        }
    }

    if table.collapsed > 0 {
        warn!(
            collapsed = table.collapsed,
            "duplicate identifiers in ledger export; summed amounts and counts"
        );
    }
    if table.is_empty() {
        if !saw_rows {
            return Err(ReconError::EmptyLedger);
        }
        // Rows existed but none parsed. Keep going with an empty table;
        // every workbook row will come out unmatched.
        warn!("no ledger rows parsed; all workbook rows will be unmatched");
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Generated,2025-04-01
Store,Front
ITEM SALES
Pos Id,Name,Count,Total
101,Apple,3,\"$1,234.50\"
102.0,Pear,1,$5
101,Apple,2,10
,,,
";

    #[test]
    fn test_preamble_skipped_and_columns_renormalized() {
        let table = parse_ledger(EXPORT, &ReconConfig::default()).unwrap();
        assert_eq!(table.len(), 2);
        let apple = table.get(&ItemId::from("101")).unwrap();
        assert_eq!(apple.amount, 1244.50);
        assert_eq!(apple.count, 5);
        // "102.0" collapses to "102" through the integer round-trip
        let pear = table.get(&ItemId::from("102")).unwrap();
        assert_eq!(pear.amount, 5.0);
        assert_eq!(pear.count, 1);
    }

    #[test]
    fn test_duplicate_collapse_reported() {
        let table = parse_ledger(EXPORT, &ReconConfig::default()).unwrap();
        assert_eq!(table.collapsed, 1);
    }

    #[test]
    fn test_duplicate_collapse_sums_amount_and_count() {
        let content = "ITEM SALES\nPos Id,Count,Total\n7,1,10\n7,2,5\n";
        let table = parse_ledger(content, &ReconConfig::default()).unwrap();
        assert_eq!(table.len(), 1);
        let entry = table.get(&ItemId::from("7")).unwrap();
        assert_eq!(entry.amount, 15.0);
        assert_eq!(entry.count, 3);
    }

    #[test]
    fn test_missing_marker() {
        let err = parse_ledger("Pos Id,Count,Total\n7,1,10\n", &ReconConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReconError::LedgerMarker { .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_ledger("ITEM SALES\nPos Id,Count\n7,1\n", &ReconConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { name } if name == "Total"));
    }

    #[test]
    fn test_malformed_row_skipped() {
        let content = "ITEM SALES\nPos Id,Count,Total\n7,1,n/a\n8,1,20\n";
        let table = parse_ledger(content, &ReconConfig::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(&ItemId::from("8")).is_some());
    }

    #[test]
    fn test_all_rows_malformed_yields_empty_table() {
        let content = "ITEM SALES\nPos Id,Count,Total\n7,1,n/a\n8,1,bad\n";
        let table = parse_ledger(content, &ReconConfig::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_data_rows_is_empty_ledger() {
        let content = "ITEM SALES\nPos Id,Count,Total\n,,\n";
        let err = parse_ledger(content, &ReconConfig::default()).unwrap_err();
        assert!(matches!(err, ReconError::EmptyLedger));
    }

    #[test]
    fn test_header_whitespace_tolerated() {
        let content = "ITEM SALES\n Pos Id , Count , Total \n7,1,20\n";
        let table = parse_ledger(content, &ReconConfig::default()).unwrap();
        assert_eq!(table.len(), 1);
    }
}
