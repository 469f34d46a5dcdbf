#![allow(clippy::needless_return)]

mod archive;
mod dashboard;
mod export;
mod render;
mod scoring;
mod session;
mod validator;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use archive::{ArchiveError, assemble};
pub use dashboard::{BACKEND_SHEET, Dashboard, DataRegion, LEVEL_CELL, TABLE_HEADER_ROW, TABLE_SHEET};
pub use export::{export_scores_csv, scores_to_json};
pub use render::{
    BatchOutcome, BatchProgress, CertificateRenderer, RenderedDocument, render_batch,
};
pub use scoring::{
    Level, SKILLS, ScoreError, ScoreSheet, Skill, SkillScore, StudentRecord, compute_scores,
    star_rating,
};
pub use session::{Session, SessionError};
pub use validator::{ValidationError, validate};

pub const ERRORS_LOG_FILE: &str = "errors.log";
