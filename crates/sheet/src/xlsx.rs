use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn read_err(e: calamine::XlsxError) -> SheetError {
    SheetError::Workbook(e.to_string())
}

fn write_err(e: rust_xlsxwriter::XlsxError) -> SheetError {
    SheetError::Workbook(e.to_string())
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as serial day numbers; keep the raw number
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Write sheet data into a rust_xlsxwriter worksheet
fn write_to_worksheet(sheet: &Sheet, worksheet: &mut Worksheet) -> Result<()> {
    for (row_idx, row) in sheet.data().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::Workbook("Row index overflow".to_string()))?;
            let col_num = u16::try_from(col_idx)
                .map_err(|_| SheetError::Workbook("Column index overflow".to_string()))?;

            match cell {
                CellValue::Null => {} // Leave empty
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row_num, col_num, *b)
                        .map_err(write_err)?;
                }
                // Excel numbers are always f64; integers > 2^53 may lose precision
                CellValue::Int(i) => {
                    worksheet
                        .write_number(row_num, col_num, *i as f64)
                        .map_err(write_err)?;
                }
                CellValue::Float(f) => {
                    worksheet
                        .write_number(row_num, col_num, *f)
                        .map_err(write_err)?;
                }
                CellValue::String(s) => {
                    worksheet
                        .write_string(row_num, col_num, s)
                        .map_err(write_err)?;
                }
            }
        }
    }

    Ok(())
}

impl Sheet {
    /// Load a specific sheet from an Excel file by name
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened, sheet not found, or read fails.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(read_err)?;

        let range = workbook.worksheet_range(sheet_name).map_err(read_err)?;

        let mut data: Vec<Vec<CellValue>> = Vec::new();
        for row in range.rows() {
            data.push(row.iter().map(data_to_cell_value).collect());
        }

        let mut sheet = Sheet::with_name(sheet_name);
        *sheet.data_mut() = data;
        Ok(sheet)
    }

    /// Save the sheet to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.name()).map_err(write_err)?;

        write_to_worksheet(self, worksheet)?;

        workbook.save(path.as_ref()).map_err(write_err)?;
        Ok(())
    }
}

impl Book {
    /// Load a book from an Excel file (all sheets, all cells)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(read_err)?;

        let sheet_names: Vec<String> =
            workbook.sheet_names().iter().map(|s| s.to_string()).collect();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name).map_err(read_err)?;

            let mut data: Vec<Vec<CellValue>> = Vec::new();
            for row in range.rows() {
                data.push(row.iter().map(data_to_cell_value).collect());
            }

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = data;
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name).map_err(write_err)?;
            write_to_worksheet(sheet, worksheet)?;
        }

        workbook.save(path.as_ref()).map_err(write_err)?;
        Ok(())
    }

    /// Get sheet names from an Excel file without loading data
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened.
    pub fn xlsx_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref()).map_err(read_err)?;
        Ok(workbook.sheet_names().iter().map(|s| s.to_string()).collect())
    }
}
