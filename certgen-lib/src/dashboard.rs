use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::utils::normalize_string;
use crate::validator::ValidationError;

/// Sheet carrying the dashboard metadata (selected test level).
pub const BACKEND_SHEET: &str = "Backend";

/// Sheet carrying the per-student raw results.
pub const TABLE_SHEET: &str = "Table";

/// Cell of the `Backend` sheet holding the test level (0-based, i.e. A2).
pub const LEVEL_CELL: (u32, u32) = (1, 0);

/// Absolute 0-based row of the `Table` sheet holding the column labels.
/// The 19 rows above it are dashboard chrome (title, legend, filter widgets).
pub const TABLE_HEADER_ROW: u32 = 19;

/// An uploaded mock test dashboard, read once and held in memory.
///
/// The workbook is read-only input: nothing here mutates it, and all
/// downstream computation works off the cached sheet ranges.
pub struct Dashboard {
    sheet_names: Vec<String>,
    backend: Option<Range<Data>>,
    table: Option<Range<Data>>,
}

/// The student table's header labels and data rows.
///
/// Rows carry their absolute 0-based sheet row so diagnostics and output
/// naming can point back at the spreadsheet the operator is looking at.
pub struct DataRegion<'a> {
    pub header: Vec<String>,
    pub rows: Vec<(u32, &'a [Data])>,
}

impl Dashboard {
    /// Open an XLSX dashboard from disk.
    ///
    /// Missing sheets are recorded as absent rather than rejected here; the
    /// validator decides what their absence means. Any lower-level read
    /// failure surfaces as [`ValidationError::Unreadable`] with the
    /// underlying message attached.
    pub fn open(path: &str) -> Result<Dashboard, ValidationError> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(ValidationError::unreadable)?;
        let sheet_names = workbook.sheet_names().to_vec();

        let backend = if sheet_names.iter().any(|name| name == BACKEND_SHEET) {
            Some(
                workbook
                    .worksheet_range(BACKEND_SHEET)
                    .map_err(ValidationError::unreadable)?,
            )
        } else {
            None
        };

        let table = if sheet_names.iter().any(|name| name == TABLE_SHEET) {
            Some(
                workbook
                    .worksheet_range(TABLE_SHEET)
                    .map_err(ValidationError::unreadable)?,
            )
        } else {
            None
        };

        Ok(Dashboard {
            sheet_names,
            backend,
            table,
        })
    }

    /// Build a dashboard from in-memory sheet ranges (for testing only).
    #[cfg(any(test, feature = "test"))]
    pub fn from_sheets(backend: Option<Range<Data>>, table: Option<Range<Data>>) -> Dashboard {
        let mut sheet_names = Vec::new();
        if backend.is_some() {
            sheet_names.push(BACKEND_SHEET.to_string());
        }
        if table.is_some() {
            sheet_names.push(TABLE_SHEET.to_string());
        }
        Dashboard {
            sheet_names,
            backend,
            table,
        }
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn backend(&self) -> Option<&Range<Data>> {
        self.backend.as_ref()
    }

    /// The level cell of the `Backend` sheet, if the sheet and cell exist.
    pub fn level_cell(&self) -> Option<&Data> {
        self.backend.as_ref().and_then(|range| range.get_value(LEVEL_CELL))
    }

    /// Extract the student table's header and data rows.
    ///
    /// `None` when the `Table` sheet is absent. Calamine ranges start at the
    /// first used cell rather than A1, so the header is located by absolute
    /// sheet row. Fully empty rows inside the used range (blank padding left
    /// by hand-edited dashboards) are not part of the data region.
    pub fn data_region(&self) -> Option<DataRegion<'_>> {
        let table = self.table.as_ref()?;
        let start_row = table.start().map(|(row, _)| row).unwrap_or(0);

        let mut header = Vec::new();
        let mut rows = Vec::new();
        for (index, row) in table.rows().enumerate() {
            let sheet_row = start_row + index as u32;
            if sheet_row < TABLE_HEADER_ROW {
                continue;
            }
            if sheet_row == TABLE_HEADER_ROW {
                header = row
                    .iter()
                    .map(|cell| normalize_string(&cell.to_string()))
                    .collect();
                continue;
            }
            if is_empty_row(row) {
                continue;
            }
            rows.push((sheet_row, row));
        }

        Some(DataRegion { header, rows })
    }
}

fn is_empty_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        Data::Error(_) => true,
        _ => false,
    })
}
