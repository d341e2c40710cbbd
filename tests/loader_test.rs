//! Tests for parsing catalog lines into courses

use rstest::rstest;

use coursecat::domain::{parse_line, CatalogLoader, DomainError, MalformedLinePolicy};

#[test]
fn given_lines_with_trailing_empty_fields_when_producing_then_prerequisites_are_dropped() {
    let loader = CatalogLoader::default();
    let loaded = loader
        .produce("CS101,Intro to CS,,\nCS201,Data Structures,CS101,\n")
        .unwrap();

    assert_eq!(loaded.courses.len(), 2);
    assert!(loaded.skipped.is_empty());

    let cs201 = &loaded.courses[1];
    assert_eq!(cs201.id(), "CS201");
    assert_eq!(cs201.title(), "Data Structures");
    assert_eq!(cs201.prerequisites(), ["CS101".to_string()]);
    assert!(loaded.courses[0].prerequisites().is_empty());
}

#[test]
fn given_two_prerequisites_when_parsing_then_both_kept_in_order() {
    let course = parse_line("CSCI300,Introduction to Algorithms,CSCI200,MATH201", 1).unwrap();
    assert_eq!(
        course.prerequisites(),
        ["CSCI200".to_string(), "MATH201".to_string()]
    );
}

#[test]
fn given_crlf_and_padding_when_parsing_then_fields_are_trimmed() {
    let course = parse_line(" CS201 , Data Structures , CS101 \r", 4).unwrap();
    assert_eq!(course.id(), "CS201");
    assert_eq!(course.title(), "Data Structures");
    assert_eq!(course.prerequisites(), ["CS101".to_string()]);
}

#[rstest]
#[case::single_field("CS150", "expected at least 2 fields")]
#[case::empty_id(",Missing Id", "empty course identifier")]
#[case::empty_title("CS150,  ,CS101", "empty title")]
#[case::too_many_prerequisites("CS300,Too Many,A,B,C", "at most 2")]
fn given_malformed_line_when_parsing_then_reports_line_and_reason(
    #[case] line: &str,
    #[case] expected_reason: &str,
) {
    let err = parse_line(line, 7).unwrap_err();
    match err {
        DomainError::MalformedLine { line, reason } => {
            assert_eq!(line, 7);
            assert!(reason.contains(expected_reason), "reason was: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_skip_policy_when_producing_then_bad_lines_are_reported_with_numbers() {
    let source = std::fs::read_to_string("tests/resources/malformed.csv").unwrap();
    let loader = CatalogLoader::new(MalformedLinePolicy::Skip);

    let loaded = loader.produce(&source).unwrap();

    let ids: Vec<&str> = loaded.courses.iter().map(|c| c.id()).collect();
    assert_eq!(ids, ["CS101", "CS201"]);
    let lines: Vec<usize> = loaded.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, [2, 5, 6]);
}

#[test]
fn given_fail_policy_when_producing_then_first_bad_line_aborts() {
    let source = std::fs::read_to_string("tests/resources/malformed.csv").unwrap();
    let loader = CatalogLoader::new(MalformedLinePolicy::Fail);

    let err = loader.produce(&source).unwrap_err();

    assert!(matches!(err, DomainError::MalformedLine { line: 2, .. }));
    assert_eq!(
        err.to_string(),
        "malformed line 2: expected at least 2 fields, found 1"
    );
}

#[test]
fn given_blank_source_when_producing_then_nothing_is_returned() {
    let loaded = CatalogLoader::default().produce("\n   \n\r\n").unwrap();
    assert!(loaded.courses.is_empty());
    assert!(loaded.skipped.is_empty());
}

#[test]
fn given_duplicate_ids_when_producing_then_all_lines_are_kept_in_order() {
    let source = std::fs::read_to_string("tests/resources/duplicates.csv").unwrap();
    let loaded = CatalogLoader::default().produce(&source).unwrap();
    let titles: Vec<&str> = loaded.courses.iter().map(|c| c.title()).collect();
    assert_eq!(
        titles,
        ["Intro to CS", "Data Structures", "Introduction to Computer Science"]
    );
}
