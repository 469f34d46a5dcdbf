use anyhow::Result;

use crate::scoring::{ScoreSheet, SkillScore};

/// Export a computed score sheet to CSV, one row per student.
///
/// Fields are quoted only when necessary (names with commas survive intact).
/// Missing results export as empty point fields next to their 0-star rating.
pub fn export_scores_csv(scores: &ScoreSheet, csv_path: &str) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(csv_path)?;

    wtr.write_record([
        "Student",
        "Year",
        "Class",
        "Level",
        "Listening Points",
        "Listening Stars",
        "Reading & Writing Points",
        "Reading & Writing Stars",
        "Speaking Points",
        "Speaking Stars",
    ])?;

    for student in &scores.students {
        wtr.write_record([
            student.name.clone(),
            student.year.clone(),
            student.class_group.clone(),
            scores.level.name().to_string(),
            points_field(&student.listening),
            student.listening.stars.to_string(),
            points_field(&student.reading_writing),
            student.reading_writing.stars.to_string(),
            points_field(&student.speaking),
            student.speaking.stars.to_string(),
        ])?;
    }

    wtr.flush()?;

    Ok(())
}

/// Pretty-printed JSON rendition of the score sheet, for machine consumers.
pub fn scores_to_json(scores: &ScoreSheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(scores)?)
}

fn points_field(score: &SkillScore) -> String {
    score.points.map(|p| p.to_string()).unwrap_or_default()
}
