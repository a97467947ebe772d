//! Workbook/ledger reconciliation engine for tally
//!
//! Reconciles per-item sales figures scattered across repeating
//! (identifier, amount) column pairs in a spreadsheet workbook against
//! authoritative totals from a point-of-sale ledger export, then writes
//! an updated workbook plus a standalone flat report.
//!
//! The pipeline, leaves first:
//!
//! - [`normalize`]: one comparable [`ItemId`] key type and a total money
//!   parser over currency-formatted strings.
//! - [`section`]: header scanning for adjacent (identifier, amount)
//!   column pairs.
//! - [`workbook`]: selected sheets to the canonical fact table, with the
//!   full workbook model retained for rewriting.
//! - [`ledger`]: preamble skipping, column renormalization, duplicate
//!   collapse by summation.
//! - [`reconcile`]: the left join, the only cross-source fusion site.
//! - [`report`]: totals projected back onto each sheet's sections, both
//!   output files written atomically.
//! - [`pipeline`]: end-to-end orchestration and the pre-flight input
//!   check.
//!
//! Per-row and per-sheet problems degrade to `tracing` warnings; only
//! missing inputs and write failures abort a run.

pub mod config;
pub mod error;
pub mod ledger;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod section;
pub mod workbook;

pub use config::{ReconConfig, SheetSelector};
pub use error::{ReconError, Result};
pub use ledger::{LedgerEntry, LedgerTable};
pub use normalize::{parse_amount, ItemId};
pub use pipeline::{ensure_inputs, prepare_run, run, RunSummary};
pub use reconcile::{reconcile, Reconciliation, ReconciledRow};
pub use report::ReportPaths;
pub use section::{find_sections, Section};
pub use workbook::{FactRow, FactTable, WorkbookData};
