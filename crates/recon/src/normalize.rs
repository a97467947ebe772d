//! Identifier normalization and money parsing.
//!
//! Workbook cells and ledger fields carry item identifiers in whatever
//! shape the exporting tool felt like: integers, floats with a spurious
//! fraction, padded strings. [`ItemId`] is the single comparable form;
//! two identifiers are equal iff their normalized strings are byte-equal.

use crate::error::{ReconError, Result};
use std::fmt;
use tally_sheet::CellValue;

/// A normalized item identifier, the cross-source join key.
///
/// The empty id stands for a missing value and never matches a real key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Normalize a workbook cell into an identifier.
    ///
    /// Numeric cells become their decimal integer representation when the
    /// value is integral; strings are trimmed and otherwise left alone.
    /// Idempotent: normalizing an already-normalized id is the identity.
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> ItemId {
        let raw = match cell {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                format!("{f:.0}")
            }
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.trim().to_string(),
        };
        ItemId(raw)
    }

    /// Normalize a ledger cell into an identifier.
    ///
    /// Like [`ItemId::from_cell`], but non-empty values are additionally
    /// round-tripped through integer parsing ("123.0" becomes "123") to
    /// drop floating-point artifacts of numeric POS exports.
    #[must_use]
    pub fn from_ledger_cell(cell: &CellValue) -> ItemId {
        let id = Self::from_cell(cell);
        if id.0.is_empty() {
            return id;
        }
        if let Ok(f) = id.0.parse::<f64>() {
            if f.is_finite() && f.fract() == 0.0 {
                return ItemId(format!("{f:.0}"));
            }
        }
        id
    }

    /// Whether this is the missing-value identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::from_cell(&CellValue::String(s.to_string()))
    }
}

/// Convert a cell to a money amount.
///
/// Numeric cells pass through unchanged. Strings may carry one leading
/// currency symbol and comma thousands separators; anything else fails
/// with [`ReconError::ParseAmount`], which callers isolate to the row.
pub fn parse_amount(cell: &CellValue) -> Result<f64> {
    match cell {
        CellValue::Int(i) => Ok(*i as f64),
        CellValue::Float(f) => Ok(*f),
        CellValue::String(s) => {
            let trimmed = s.trim();
            let stripped = trimmed.strip_prefix('$').unwrap_or(trimmed);
            let cleaned: String = stripped.chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return Err(ReconError::ParseAmount { value: s.clone() });
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| ReconError::ParseAmount { value: s.clone() })
        }
        CellValue::Null | CellValue::Bool(_) => Err(ReconError::ParseAmount {
            value: cell.as_str(),
        }),
    }
}
