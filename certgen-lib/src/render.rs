use std::collections::HashSet;

use crate::scoring::{Level, ScoreSheet};

/// One rendered two-page certificate, named and ready for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub base_name: String,
    pub bytes: Vec<u8>,
}

/// The document compositor, consumed as an interface.
///
/// Implementations select level-specific background assets and overlay the
/// student name and star glyphs. `None` means a required asset (background,
/// font, star glyph) was unavailable; the batch skips that student and
/// carries on rather than aborting.
pub trait CertificateRenderer {
    fn render(
        &self,
        name: &str,
        listening_stars: u8,
        reading_writing_stars: u8,
        speaking_stars: u8,
        level: Level,
    ) -> Option<RenderedDocument>;
}

/// Observational progress for the rendering loop. Reported once per student,
/// before their certificate is rendered; it must not affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress<'a> {
    pub completed: usize,
    pub total: usize,
    pub current_student: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub documents: Vec<RenderedDocument>,
    /// Students whose certificate could not be rendered and were left out of
    /// the batch.
    pub skipped: usize,
}

/// Render one certificate per student, strictly sequentially, in sheet order.
///
/// Students whose render fails are skipped without aborting the batch.
/// Colliding output names (same-named students) are disambiguated by
/// appending the later student's sheet row number before the extension.
pub fn render_batch<R, F>(scores: &ScoreSheet, renderer: &R, mut progress: F) -> BatchOutcome
where
    R: CertificateRenderer + ?Sized,
    F: FnMut(BatchProgress<'_>),
{
    let total = scores.students.len();
    let mut documents: Vec<RenderedDocument> = Vec::with_capacity(total);
    let mut taken_names: HashSet<String> = HashSet::with_capacity(total);
    let mut skipped = 0;

    for (index, student) in scores.students.iter().enumerate() {
        progress(BatchProgress {
            completed: index + 1,
            total,
            current_student: &student.name,
        });

        match renderer.render(
            &student.name,
            student.listening.stars,
            student.reading_writing.stars,
            student.speaking.stars,
            scores.level,
        ) {
            Some(mut document) => {
                if !taken_names.insert(document.base_name.clone()) {
                    document.base_name = disambiguate(&document.base_name, student.row_number);
                    taken_names.insert(document.base_name.clone());
                }
                documents.push(document);
            }
            None => skipped += 1,
        }
    }

    BatchOutcome { documents, skipped }
}

fn disambiguate(base_name: &str, row_number: u32) -> String {
    match base_name.rsplit_once('.') {
        Some((stem, extension)) => format!("{stem}_{row_number}.{extension}"),
        None => format!("{base_name}_{row_number}"),
    }
}
