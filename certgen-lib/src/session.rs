use thiserror::Error;

use crate::archive::{self, ArchiveError};
use crate::dashboard::Dashboard;
use crate::render::{BatchProgress, CertificateRenderer, render_batch};
use crate::scoring::{self, ScoreError, ScoreSheet};
use crate::validator::{self, ValidationError};

/// Explicit state of one upload-to-download run.
///
/// One workbook is processed start to finish before the next interaction;
/// there is no cross-run state and no cancellation of an in-flight batch.
/// Rendered documents exist only inside [`Session::generate`] and are
/// dropped once the archive is assembled.
pub enum Session {
    Idle,
    Validated {
        dashboard: Dashboard,
        scores: ScoreSheet,
    },
    Rendering {
        completed: usize,
        total: usize,
    },
    Done {
        archive: Vec<u8>,
        skipped: usize,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("certificate generation requires a validated dashboard (current state: {state})")]
    InvalidTransition { state: &'static str },
}

impl Session {
    pub fn new() -> Session {
        Session::Idle
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Session::Idle => "Idle",
            Session::Validated { .. } => "Validated",
            Session::Rendering { .. } => "Rendering",
            Session::Done { .. } => "Done",
        }
    }

    /// Idle → Validated: validate an uploaded dashboard and compute scores.
    ///
    /// On failure the upload is discarded; start over with a fresh session,
    /// exactly as the operator re-uploads a corrected file.
    pub fn ingest(self, dashboard: Dashboard) -> Result<Session, SessionError> {
        if !matches!(self, Session::Idle) {
            return Err(SessionError::InvalidTransition {
                state: self.state_name(),
            });
        }
        validator::validate(&dashboard)?;
        let scores = scoring::compute_scores(&dashboard)?;
        Ok(Session::Validated { dashboard, scores })
    }

    /// Validated → Rendering → Done: run the sequential certificate loop and
    /// package the results.
    pub fn generate<R, F>(self, renderer: &R, mut progress: F) -> Result<Session, SessionError>
    where
        R: CertificateRenderer + ?Sized,
        F: FnMut(BatchProgress<'_>),
    {
        let state = self.state_name();
        let Session::Validated { scores, .. } = self else {
            return Err(SessionError::InvalidTransition { state });
        };

        let total = scores.students.len();
        let mut session = Session::Rendering { completed: 0, total };
        let outcome = render_batch(&scores, renderer, |update| {
            if let Session::Rendering { completed, .. } = &mut session {
                *completed = update.completed;
            }
            progress(update);
        });

        let archive = archive::assemble(&outcome.documents)?;
        session = Session::Done {
            archive,
            skipped: outcome.skipped,
        };
        Ok(session)
    }

    pub fn scores(&self) -> Option<&ScoreSheet> {
        match self {
            Session::Validated { scores, .. } => Some(scores),
            _ => None,
        }
    }

    pub fn archive(&self) -> Option<&[u8]> {
        match self {
            Session::Done { archive, .. } => Some(archive),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
