use calamine::Data;
use serde::Serialize;
use thiserror::Error;

use crate::dashboard::{Dashboard, LEVEL_CELL};

/// Test difficulty tier. Read once from `Backend` A2 and never inferred
/// any other way; every scoring table is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    Starters,
    Movers,
    Flyers,
}

/// One of the three examined skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Skill {
    Listening,
    ReadingWriting,
    Speaking,
}

pub const SKILLS: [Skill; 3] = [Skill::Listening, Skill::ReadingWriting, Skill::Speaking];

impl Level {
    /// Exact, case-sensitive match against the three level names.
    pub fn from_name(name: &str) -> Option<Level> {
        match name {
            "Starters" => Some(Level::Starters),
            "Movers" => Some(Level::Movers),
            "Flyers" => Some(Level::Flyers),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Starters => "Starters",
            Level::Movers => "Movers",
            Level::Flyers => "Flyers",
        }
    }

    /// Ceiling points per skill. Raw results arrive as fractions of this.
    pub fn max_score(self, skill: Skill) -> f64 {
        match (self, skill) {
            (Level::Starters, Skill::Listening) => 20.0,
            (Level::Starters, Skill::ReadingWriting) => 30.0,
            (Level::Starters, Skill::Speaking) => 10.0,
            (Level::Movers, Skill::Listening) => 25.0,
            (Level::Movers, Skill::ReadingWriting) => 35.0,
            (Level::Movers, Skill::Speaking) => 15.0,
            (Level::Flyers, Skill::Listening) => 30.0,
            (Level::Flyers, Skill::ReadingWriting) => 40.0,
            (Level::Flyers, Skill::Speaking) => 20.0,
        }
    }

    /// Minimum points for star counts 1..=5, indexed by star count - 1.
    ///
    /// Strictly increasing, and star 1 always requires 0 points: any present
    /// score earns at least one star.
    pub fn star_thresholds(self, skill: Skill) -> [f64; 5] {
        match (self, skill) {
            (Level::Starters, Skill::Listening) => [0.0, 11.0, 13.0, 16.0, 18.0],
            (Level::Starters, Skill::ReadingWriting) => [0.0, 13.0, 16.0, 19.0, 21.0],
            (Level::Movers, Skill::Listening) => [0.0, 11.0, 14.0, 18.0, 21.0],
            (Level::Movers, Skill::ReadingWriting) => [0.0, 18.0, 24.0, 29.0, 33.0],
            (Level::Flyers, Skill::Listening) => [0.0, 14.0, 17.0, 20.0, 23.0],
            (Level::Flyers, Skill::ReadingWriting) => [0.0, 24.0, 30.0, 36.0, 42.0],
            // Speaking thresholds are shared by all three levels.
            (_, Skill::Speaking) => [0.0, 3.0, 7.0, 10.0, 12.0],
        }
    }
}

impl Skill {
    /// Column label carrying this skill's raw result fraction in the `Table`
    /// sheet. The dashboards are produced in Portuguese; the labels are part
    /// of the file format.
    pub fn column_label(self) -> &'static str {
        match self {
            Skill::Listening => "Resultado do Estudante Listening",
            Skill::ReadingWriting => "Resultado do Estudante RW",
            Skill::Speaking => "Resultado do Estudante Speaking",
        }
    }
}

/// A student's computed result for a single skill.
///
/// `fraction` is `None` when the cell was absent or not numeric; the star
/// count is then 0 by definition, not by threshold lookup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SkillScore {
    pub fraction: Option<f64>,
    pub points: Option<f64>,
    pub stars: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    /// 1-based sheet row, as the operator sees it in Excel.
    pub row_number: u32,
    pub name: String,
    pub year: String,
    pub class_group: String,
    pub listening: SkillScore,
    pub reading_writing: SkillScore,
    pub speaking: SkillScore,
}

impl StudentRecord {
    pub fn skill(&self, skill: Skill) -> &SkillScore {
        match skill {
            Skill::Listening => &self.listening,
            Skill::ReadingWriting => &self.reading_writing,
            Skill::Speaking => &self.speaking,
        }
    }

    fn skill_mut(&mut self, skill: Skill) -> &mut SkillScore {
        match skill {
            Skill::Listening => &mut self.listening,
            Skill::ReadingWriting => &mut self.reading_writing,
            Skill::Speaking => &mut self.speaking,
        }
    }
}

/// The computed scores for one dashboard, in sheet row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSheet {
    pub level: Level,
    pub students: Vec<StudentRecord>,
    /// Result cells that failed numeric coercion and defaulted to 0 stars.
    /// Not an error, but worth surfacing: a typo in a result cell is
    /// indistinguishable from a legitimately absent score.
    pub missing_results: usize,
}

/// Defensive failures of the score calculator.
///
/// Callers are expected to run [`crate::validate`] first; these guards make
/// the skipped-validation path fail fast instead of producing garbage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("worksheet 'Backend' not found in the workbook")]
    MissingBackend,

    #[error("cell A2 of worksheet 'Backend' does not name a known test level (found \"{value}\")")]
    InvalidLevel { value: String },

    #[error("worksheet 'Table' not found in the workbook")]
    MissingTable,

    #[error("column \"{label}\" not found in the student table header")]
    MissingColumn { label: String },

    #[error("the student table has no data rows")]
    EmptyTable,
}

/// Star count for a point value against one threshold table.
///
/// Highest qualifying tier wins: the result is the largest star count whose
/// minimum the points meet. This is not a range lookup; a score above the
/// 5-star minimum must not fall into a lower band.
pub fn star_rating(points: Option<f64>, thresholds: &[f64; 5]) -> u8 {
    let Some(points) = points else {
        return 0;
    };
    for stars in (1..=5u8).rev() {
        if points >= thresholds[usize::from(stars - 1)] {
            return stars;
        }
    }
    0
}

/// Convert a validated dashboard into per-student star ratings.
///
/// Every row of the table's data region produces exactly one record, even if
/// all of its results are missing (all-zero stars). Recomputing on the same
/// workbook yields identical records; nothing here mutates the input.
pub fn compute_scores(dashboard: &Dashboard) -> Result<ScoreSheet, ScoreError> {
    let backend = dashboard.backend().ok_or(ScoreError::MissingBackend)?;
    let level = match backend.get_value(LEVEL_CELL) {
        Some(Data::String(name)) => {
            Level::from_name(name).ok_or_else(|| ScoreError::InvalidLevel {
                value: name.clone(),
            })?
        }
        other => {
            return Err(ScoreError::InvalidLevel {
                value: other.map(|cell| cell.to_string()).unwrap_or_default(),
            });
        }
    };

    let region = dashboard.data_region().ok_or(ScoreError::MissingTable)?;
    if region.rows.is_empty() {
        return Err(ScoreError::EmptyTable);
    }
    let columns = SkillColumns::locate(&region.header)?;

    let mut students = Vec::with_capacity(region.rows.len());
    let mut missing_results = 0;
    for &(sheet_row, cells) in &region.rows {
        let mut record = StudentRecord {
            row_number: sheet_row + 1,
            name: cell_text(cells.first()),
            year: cell_text(cells.get(1)),
            class_group: cell_text(cells.get(2)),
            listening: SkillScore::default(),
            reading_writing: SkillScore::default(),
            speaking: SkillScore::default(),
        };

        for skill in SKILLS {
            let fraction = cells.get(columns.index(skill)).and_then(coerce_fraction);
            if fraction.is_none() {
                missing_results += 1;
            }
            let points = fraction.map(|f| f * level.max_score(skill));
            let stars = star_rating(points, &level.star_thresholds(skill));
            *record.skill_mut(skill) = SkillScore {
                fraction,
                points,
                stars,
            };
        }

        students.push(record);
    }

    Ok(ScoreSheet {
        level,
        students,
        missing_results,
    })
}

struct SkillColumns {
    listening: usize,
    reading_writing: usize,
    speaking: usize,
}

impl SkillColumns {
    fn locate(header: &[String]) -> Result<SkillColumns, ScoreError> {
        let find = |skill: Skill| {
            let label = skill.column_label();
            header
                .iter()
                .position(|h| h == label)
                .ok_or_else(|| ScoreError::MissingColumn {
                    label: label.to_string(),
                })
        };
        Ok(SkillColumns {
            listening: find(Skill::Listening)?,
            reading_writing: find(Skill::ReadingWriting)?,
            speaking: find(Skill::Speaking)?,
        })
    }

    fn index(&self, skill: Skill) -> usize {
        match skill {
            Skill::Listening => self.listening,
            Skill::ReadingWriting => self.reading_writing,
            Skill::Speaking => self.speaking,
        }
    }
}

/// Lenient numeric coercion for result cells, mirroring how the dashboards
/// are actually filled in: plain numbers, numbers typed as text, or junk.
/// Junk (and non-finite floats) becomes a missing result, not an error.
fn coerce_fraction(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
