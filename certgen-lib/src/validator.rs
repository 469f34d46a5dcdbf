use calamine::Data;
use thiserror::Error;

use crate::dashboard::{Dashboard, TABLE_SHEET};
use crate::scoring::Level;

/// Reasons an uploaded file is rejected as a dashboard.
///
/// These are user-correctable conditions; the display text is surfaced
/// verbatim to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "The uploaded file was not recognized as a PMB dashboard: sheet 'Backend' not found. Check that the correct file was uploaded."
    )]
    StructureMissing,

    #[error(
        "The uploaded file was not recognized as a valid dashboard: check that the uploaded dashboard is up to date."
    )]
    StaleOrInvalidTemplate,

    #[error("The student table is blank!")]
    EmptyStudentTable,

    #[error("Error processing the file: {message}")]
    Unreadable { message: String },
}

impl ValidationError {
    pub(crate) fn unreadable(err: impl std::fmt::Display) -> ValidationError {
        ValidationError::Unreadable {
            message: err.to_string(),
        }
    }
}

/// Decide whether an uploaded workbook is a legitimate dashboard.
///
/// Checks run in order and stop at the first failure:
/// 1. a sheet literally named `Backend` exists,
/// 2. its A2 cell names one of the three test levels,
/// 3. the `Table` sheet has at least one student row below the header.
///
/// The level comparison is exact: byte-for-byte, case-sensitive, untrimmed.
/// Dashboards regenerated from outdated templates leave the cell blank or
/// carry a stray value, and those must be rejected rather than guessed at.
/// (A level typed by hand in the wrong case is rejected too; known quirk.)
///
/// Pure inspection: no side effects, and failures are returned, never raised.
pub fn validate(dashboard: &Dashboard) -> Result<(), ValidationError> {
    let backend = dashboard
        .backend()
        .ok_or(ValidationError::StructureMissing)?;

    match backend.get_value(crate::dashboard::LEVEL_CELL) {
        Some(Data::String(name)) if Level::from_name(name).is_some() => {}
        _ => return Err(ValidationError::StaleOrInvalidTemplate),
    }

    let region = dashboard
        .data_region()
        .ok_or_else(|| ValidationError::Unreadable {
            message: format!("worksheet '{TABLE_SHEET}' not found"),
        })?;
    if region.rows.is_empty() {
        return Err(ValidationError::EmptyStudentTable);
    }

    Ok(())
}
