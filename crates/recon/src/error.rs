use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a reconciliation run
#[derive(Error, Debug)]
pub enum ReconError {
    /// A required input path does not exist. Fatal, raised before any
    /// side effect.
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    /// A cell failed amount parsing. Loaders isolate this to the
    /// offending row and continue.
    #[error("Cannot parse amount from {value:?}")]
    ParseAmount { value: String },

    #[error("Ledger marker {marker:?} not found in export")]
    LedgerMarker { marker: String },

    #[error("Ledger column not found: {name}")]
    MissingColumn { name: String },

    #[error("Ledger export contains no data rows")]
    EmptyLedger,

    #[error("Sheet error: {0}")]
    Sheet(#[from] tally_sheet::SheetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconError>;
