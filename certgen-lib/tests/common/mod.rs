// Re-export shared test utilities from src/test_utils.rs
// These are the core builders used by most tests
pub use certgen_lib::test_utils::{
    StubRenderer, backend_range, dashboard_with_rows, sample_dashboard, student_row, table_range,
};

use calamine::Data;
use certgen_lib::{ScoreSheet, compute_scores};

/// Compute scores for an in-memory dashboard, panicking on pipeline errors.
#[allow(dead_code)]
pub fn scores_for(level: &str, rows: &[Vec<Data>]) -> ScoreSheet {
    compute_scores(&dashboard_with_rows(level, rows)).expect("score computation should succeed")
}
