// Test utilities available to both unit and integration tests
// Only compiled when testing

use calamine::{Data, Range};

use crate::dashboard::{Dashboard, TABLE_HEADER_ROW};
use crate::render::{CertificateRenderer, RenderedDocument};
use crate::scoring::{Level, Skill};

/// A `Backend` sheet whose A2 cell holds the given value.
#[allow(dead_code)]
pub fn backend_range(level_cell: Data) -> Range<Data> {
    let mut range = Range::new((0, 0), (1, 0));
    range.set_value((0, 0), Data::String("Mock Test Level".to_string()));
    range.set_value((1, 0), level_cell);
    range
}

/// One student data row in `Table` column order.
#[allow(dead_code)]
pub fn student_row(
    name: &str,
    year: &str,
    class_group: &str,
    listening: Data,
    reading_writing: Data,
    speaking: Data,
) -> Vec<Data> {
    vec![
        Data::String(name.to_string()),
        Data::String(year.to_string()),
        Data::String(class_group.to_string()),
        listening,
        reading_writing,
        speaking,
    ]
}

/// A `Table` sheet: 19 rows of dashboard chrome (left empty), the header row,
/// then the given data rows.
#[allow(dead_code)]
pub fn table_range(rows: &[Vec<Data>]) -> Range<Data> {
    let last_row = TABLE_HEADER_ROW + rows.len() as u32;
    let mut range = Range::new((0, 0), (last_row, 5));

    let labels = [
        "Aluno",
        "Ano",
        "Turma",
        Skill::Listening.column_label(),
        Skill::ReadingWriting.column_label(),
        Skill::Speaking.column_label(),
    ];
    for (col, label) in labels.iter().enumerate() {
        range.set_value((TABLE_HEADER_ROW, col as u32), Data::String(label.to_string()));
    }

    for (index, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            range.set_value(
                (TABLE_HEADER_ROW + 1 + index as u32, col as u32),
                cell.clone(),
            );
        }
    }

    range
}

/// A complete, valid dashboard with one fully-scored student.
#[allow(dead_code)]
pub fn sample_dashboard(level: &str) -> Dashboard {
    dashboard_with_rows(
        level,
        &[student_row(
            "Ana Souza",
            "5",
            "5A",
            Data::Float(0.95),
            Data::Float(0.80),
            Data::Float(0.70),
        )],
    )
}

#[allow(dead_code)]
pub fn dashboard_with_rows(level: &str, rows: &[Vec<Data>]) -> Dashboard {
    Dashboard::from_sheets(
        Some(backend_range(Data::String(level.to_string()))),
        Some(table_range(rows)),
    )
}

/// Scriptable stand-in for the document compositor: renders a tiny synthetic
/// document, or nothing for students listed in `fail_for` (simulating a
/// missing asset).
#[allow(dead_code)]
#[derive(Default)]
pub struct StubRenderer {
    pub fail_for: Vec<String>,
}

impl StubRenderer {
    #[allow(dead_code)]
    pub fn failing_for(names: &[&str]) -> StubRenderer {
        StubRenderer {
            fail_for: names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl CertificateRenderer for StubRenderer {
    fn render(
        &self,
        name: &str,
        listening_stars: u8,
        reading_writing_stars: u8,
        speaking_stars: u8,
        level: Level,
    ) -> Option<RenderedDocument> {
        if self.fail_for.iter().any(|failing| failing == name) {
            return None;
        }
        Some(RenderedDocument {
            base_name: format!("Certificado_{name}.pdf"),
            bytes: format!(
                "{}|{name}|{listening_stars}{reading_writing_stars}{speaking_stars}",
                level.name()
            )
            .into_bytes(),
        })
    }
}
