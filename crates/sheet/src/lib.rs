//! Sheet/Book tabular substrate for tally
//!
//! A small API over row-major cell grids, with CSV and XLSX
//! readers and writers. XLSX reading goes through `calamine`, writing
//! through `rust_xlsxwriter`; re-serializing a book therefore keeps cell
//! values but not styling or merged-region metadata.
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use tally_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Item", "Sales $"],
//!     vec!["apple", "12.50"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.col_count(), 2);
//! ```
//!
//! ## Named column access
//!
//! ```
//! use tally_sheet::Sheet;
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["Pos Id", "Total"],
//!     vec!["101", "12.50"],
//! ]);
//!
//! sheet.name_columns_by_row(0).unwrap();
//! let totals = sheet.column_by_name("Total").unwrap();
//! assert_eq!(totals.len(), 2);
//! ```
//!
//! ## Working with books
//!
//! ```
//! use tally_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Aisle 1", Sheet::new()).unwrap();
//! book.add_sheet("Summary", Sheet::new()).unwrap();
//!
//! assert_eq!(book.sheet_count(), 2);
//! ```

mod book;
mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
