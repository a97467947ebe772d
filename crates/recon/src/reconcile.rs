//! The join: canonical fact table against the ledger table.

use crate::config::{AMOUNT_COLUMN, ID_COLUMN, TOTAL_COLUMN};
use crate::ledger::LedgerTable;
use crate::normalize::ItemId;
use crate::workbook::FactTable;
use std::collections::{HashMap, HashSet};
use tally_sheet::{CellValue, Sheet};
use tracing::{info, warn};

/// One fact row after reconciliation.
///
/// `total_sales` always equals the resolved amount; it is carried as a
/// separately named attribute because the report writer keys on the
/// column name, not its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRow {
    pub id: ItemId,
    pub amount: f64,
    pub total_sales: f64,
}

/// The reconciled table plus join diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub rows: Vec<ReconciledRow>,
    /// Fact rows whose id was found in the ledger.
    pub matched: usize,
    /// Fact rows that kept their original amount.
    pub unmatched: usize,
    /// Fact rows whose id already appeared earlier in the fact table
    /// (sections overlapped).
    pub duplicate_ids: usize,
}

impl Reconciliation {
    /// Resolved total per identifier. Duplicate occurrences of an id all
    /// resolve to the same total, so the first one wins.
    #[must_use]
    pub fn totals_by_id(&self) -> HashMap<ItemId, f64> {
        let mut totals = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            totals.entry(row.id.clone()).or_insert(row.total_sales);
        }
        totals
    }

    /// Render the full table as a flat sheet (header plus one row per
    /// fact occurrence), for the standalone report file.
    #[must_use]
    pub fn to_sheet(&self) -> Sheet {
        let mut sheet = Sheet::with_name("Report");
        sheet.row_append(vec![
            CellValue::from(ID_COLUMN),
            CellValue::from(AMOUNT_COLUMN),
            CellValue::from(TOTAL_COLUMN),
        ]);
        for row in &self.rows {
            sheet.row_append(vec![
                CellValue::from(row.id.as_str()),
                CellValue::Float(row.amount),
                CellValue::Float(row.total_sales),
            ]);
        }
        sheet
    }
}

/// Left-join the fact table against the ledger table by identifier.
///
/// Every fact row survives exactly once: matched rows take the ledger
/// amount, unmatched rows keep their original amount. The ledger table
/// is never mutated; this is the only place the two sources meet.
#[must_use]
pub fn reconcile(facts: &FactTable, ledger: &LedgerTable) -> Reconciliation {
    let mut out = Reconciliation::default();
    let mut seen: HashSet<&ItemId> = HashSet::with_capacity(facts.len());

    for fact in &facts.rows {
        let resolved = ledger.get(&fact.id).map(|entry| entry.amount);
        match resolved {
            Some(_) => out.matched += 1,
            None => out.unmatched += 1,
        }
        let amount = resolved.unwrap_or(fact.amount);
        out.rows.push(ReconciledRow {
            id: fact.id.clone(),
            amount,
            total_sales: amount,
        });
        if !seen.insert(&fact.id) {
            out.duplicate_ids += 1;
        }
    }

    if out.unmatched > 0 {
        warn!(
            unmatched = out.unmatched,
            "fact rows without a ledger match keep their original amount"
        );
    }
    if out.duplicate_ids > 0 {
        warn!(
            duplicates = out.duplicate_ids,
            "identifiers appear in more than one section"
        );
    }
    info!(
        rows = out.rows.len(),
        matched = out.matched,
        "reconciliation complete"
    );
    out
}
