/// Canonical name for the identifier column in derived tables.
pub const ID_COLUMN: &str = "Mashgin ID";
/// Canonical name for the amount column in derived tables.
pub const AMOUNT_COLUMN: &str = "Sales $";
/// Canonical name for the resolved-total column in derived tables.
pub const TOTAL_COLUMN: &str = "Total Sales $";

/// How workbook sheets are chosen for processing.
#[derive(Debug, Clone)]
pub enum SheetSelector {
    /// Sheet name equals the label, case-insensitively.
    Equals(String),
    /// Sheet name starts with the prefix, case-insensitively.
    Prefix(String),
}

impl SheetSelector {
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            SheetSelector::Equals(label) => name == label.to_lowercase(),
            SheetSelector::Prefix(prefix) => name.starts_with(&prefix.to_lowercase()),
        }
    }
}

/// Markers and column names driving a reconciliation run.
///
/// The defaults reflect the Mashgin point-of-sale export and the aisle
/// workbook layout. The id marker is a substring match, so it covers the
/// header variants "Mashgin ID #" and "Mashgin ID#" alike.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Substring identifying an identifier header (case-sensitive).
    pub id_marker: String,
    /// Substring identifying the amount header paired with it.
    pub amount_marker: String,
    /// Line marking the end of the ledger export preamble.
    pub ledger_marker: String,
    /// Ledger column holding item identifiers.
    pub ledger_id_col: String,
    /// Ledger column holding authoritative totals.
    pub ledger_total_col: String,
    /// Ledger column holding sale counts.
    pub ledger_count_col: String,
    /// Which workbook sheets to process.
    pub selector: SheetSelector,
}

impl Default for ReconConfig {
    fn default() -> Self {
        ReconConfig {
            id_marker: "Mashgin ID".to_string(),
            amount_marker: "Sales $".to_string(),
            ledger_marker: "ITEM SALES".to_string(),
            ledger_id_col: "Pos Id".to_string(),
            ledger_total_col: "Total".to_string(),
            ledger_count_col: "Count".to_string(),
            selector: SheetSelector::Equals("aisle 1".to_string()),
        }
    }
}
