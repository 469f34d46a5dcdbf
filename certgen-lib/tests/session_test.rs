//! The explicit run state machine: Idle → Validated → Done, with invalid
//! transitions rejected instead of silently tolerated.

use std::io::Cursor;

use calamine::Data;
use certgen_lib::{Dashboard, Session, SessionError, ValidationError};
use zip::ZipArchive;

mod common;

#[test]
fn a_valid_upload_moves_the_session_to_validated() {
    let session = Session::new()
        .ingest(common::sample_dashboard("Movers"))
        .unwrap();

    assert_eq!(session.state_name(), "Validated");
    let scores = session.scores().unwrap();
    assert_eq!(scores.students.len(), 1);
    assert_eq!(scores.students[0].name, "Ana Souza");
}

#[test]
fn an_invalid_upload_surfaces_the_validation_reason() {
    let result = Session::new().ingest(Dashboard::from_sheets(None, None));
    match result {
        Err(SessionError::Validation(ValidationError::StructureMissing)) => {}
        other => panic!("expected a validation failure, got {:?}", other.map(|s| s.state_name())),
    }
}

#[test]
fn generate_produces_a_downloadable_archive() {
    let rows = vec![
        common::student_row("Ana", "5", "5A", Data::Float(0.9), Data::Float(0.9), Data::Float(0.9)),
        common::student_row("Bia", "5", "5B", Data::Float(0.4), Data::Float(0.4), Data::Float(0.4)),
    ];
    let session = Session::new()
        .ingest(common::dashboard_with_rows("Starters", &rows))
        .unwrap()
        .generate(&common::StubRenderer::default(), |_| {})
        .unwrap();

    assert_eq!(session.state_name(), "Done");
    let archive_bytes = session.archive().unwrap().to_vec();
    let archive = ZipArchive::new(Cursor::new(archive_bytes)).unwrap();
    assert_eq!(archive.len(), 2);
}

#[test]
fn skipped_students_are_counted_but_do_not_abort_generation() {
    let rows = vec![
        common::student_row("Ana", "5", "5A", Data::Float(0.9), Data::Float(0.9), Data::Float(0.9)),
        common::student_row("Bia", "5", "5B", Data::Float(0.4), Data::Float(0.4), Data::Float(0.4)),
    ];
    let session = Session::new()
        .ingest(common::dashboard_with_rows("Starters", &rows))
        .unwrap()
        .generate(&common::StubRenderer::failing_for(&["Bia"]), |_| {})
        .unwrap();

    match session {
        Session::Done { skipped, .. } => assert_eq!(skipped, 1),
        other => panic!("expected Done, got {}", other.state_name()),
    }
}

#[test]
fn generating_twice_is_an_invalid_transition() {
    let done = Session::new()
        .ingest(common::sample_dashboard("Flyers"))
        .unwrap()
        .generate(&common::StubRenderer::default(), |_| {})
        .unwrap();

    match done.generate(&common::StubRenderer::default(), |_| {}) {
        Err(SessionError::InvalidTransition { state }) => assert_eq!(state, "Done"),
        other => panic!("expected InvalidTransition, got {:?}", other.map(|s| s.state_name())),
    }
}

#[test]
fn generating_from_idle_is_an_invalid_transition() {
    match Session::new().generate(&common::StubRenderer::default(), |_| {}) {
        Err(SessionError::InvalidTransition { state }) => assert_eq!(state, "Idle"),
        other => panic!("expected InvalidTransition, got {:?}", other.map(|s| s.state_name())),
    }
}

#[test]
fn ingesting_into_a_validated_session_is_rejected() {
    let session = Session::new()
        .ingest(common::sample_dashboard("Movers"))
        .unwrap();

    match session.ingest(common::sample_dashboard("Movers")) {
        Err(SessionError::InvalidTransition { state }) => assert_eq!(state, "Validated"),
        other => panic!("expected InvalidTransition, got {:?}", other.map(|s| s.state_name())),
    }
}
