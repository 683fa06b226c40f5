//! Decoding of spreadsheet sources into plain rows of cell text.
//!
//! The schedule parser only ever sees `Grid`s, so the remote CSV export and
//! an uploaded workbook go through the same code path.

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use std::fmt;
use std::io::Cursor;

pub type Grid = Vec<Vec<String>>;

#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
    Workbook(calamine::XlsxError),
    NoWorksheet,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Csv(err) => write!(f, "csv error: {err}"),
            ImportError::Workbook(err) => write!(f, "workbook error: {err}"),
            ImportError::NoWorksheet => write!(f, "workbook contains no worksheet"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(value: calamine::XlsxError) -> Self {
        Self::Workbook(value)
    }
}

/// Rows may have different lengths; the header row is returned like any other row.
pub fn grid_from_csv(text: &str) -> Result<Grid, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Reads the first worksheet of an `.xlsx` workbook.
pub fn grid_from_xlsx(bytes: &[u8]) -> Result<Grid, ImportError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)??;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Falsy cells (`false`, zero, NaN) come out empty, the same as a blank
/// cell. Dates keep their Excel serial number.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if *f == 0.0 || f.is_nan() => String::new(),
        Data::Float(f) => f.to_string(),
        Data::Int(0) => String::new(),
        Data::Int(i) => i.to_string(),
        Data::Bool(false) => String::new(),
        Data::Bool(true) => "true".to_string(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
