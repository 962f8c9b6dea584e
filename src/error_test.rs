use super::*;

#[test]
fn display_is_message_only_without_extras() {
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "bad line");
    assert_eq!(err.to_string(), "bad line");
}

#[test]
fn display_includes_line_and_suggestion() {
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "bad line")
        .with_line(7)
        .with_suggestion("fix it");
    assert_eq!(err.to_string(), "bad line (line 7). fix it");
}

#[test]
fn with_input_keeps_short_snippets() {
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "x").with_input("A --> B");
    assert_eq!(err.input.as_deref(), Some("A --> B"));
}

#[test]
fn with_input_truncates_long_snippets() {
    let long = "x".repeat(80);
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "x").with_input(&long);
    let snippet = err.input.unwrap();
    assert_eq!(snippet.chars().count(), 50);
    assert!(snippet.ends_with("..."));
}

#[test]
fn with_input_exactly_at_limit_is_untouched() {
    let exact = "y".repeat(50);
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "x").with_input(&exact);
    assert_eq!(err.input.as_deref(), Some(exact.as_str()));
}

#[test]
fn with_input_truncates_on_char_boundaries() {
    let long = "é".repeat(60);
    let err = DiagramError::new(ErrorKind::InvalidSyntax, "x").with_input(&long);
    assert_eq!(err.input.unwrap().chars().count(), 50);
}

#[test]
fn codes_are_stable() {
    assert_eq!(ErrorKind::EmptyDiagram.code(), "EMPTY_DIAGRAM");
    assert_eq!(ErrorKind::MissingHeader.code(), "MISSING_HEADER");
    assert_eq!(ErrorKind::NoNodes.code(), "NO_NODES");
    assert_eq!(ErrorKind::NoParticipants.code(), "NO_PARTICIPANTS");
    assert_eq!(ErrorKind::TooManyNodes.code(), "TOO_MANY_NODES");
    assert_eq!(ErrorKind::InputTooLarge.code(), "INPUT_TOO_LARGE");
    assert_eq!(ErrorKind::TooManyLines.code(), "TOO_MANY_LINES");
    assert_eq!(ErrorKind::LineTooLong.code(), "LINE_TOO_LONG");
}

#[test]
fn too_many_nodes_reports_count_and_limit() {
    let err = DiagramError::too_many_nodes(150, 100);
    assert_eq!(err.kind, ErrorKind::TooManyNodes);
    assert!(err.message.contains("150"));
    assert!(err.message.contains("100"));
    assert!(!err.suggestion.is_empty());
}

#[test]
fn line_too_long_carries_line_number() {
    let err = DiagramError::line_too_long(3, 2500);
    assert_eq!(err.line, Some(3));
    assert!(err.message.contains("2500"));
}

#[test]
fn every_constructor_has_a_suggestion() {
    let errors = [
        DiagramError::empty_diagram(),
        DiagramError::missing_header("A"),
        DiagramError::missing_sequence_header(),
        DiagramError::no_nodes(),
        DiagramError::no_participants(),
        DiagramError::too_many_nodes(2, 1),
        DiagramError::input_too_large(60_000),
        DiagramError::too_many_lines(600),
        DiagramError::line_too_long(1, 3000),
        DiagramError::invalid_shape(1, "A<x>"),
        DiagramError::invalid_edge(1, "A -->"),
        DiagramError::invalid_syntax(1, "???", "unrecognized line"),
    ];
    for err in errors {
        assert!(!err.suggestion.is_empty(), "{} has no suggestion", err.code());
    }
}

#[test]
fn hint_flags_single_arrow_in_flowchart() {
    assert_eq!(type_hint("A -> B"), Some("Flowcharts use '-->': A --> B"));
}

#[test]
fn hint_flags_single_arrow_in_sequence() {
    assert_eq!(type_hint("sequenceDiagram\nA -> B: hi"), Some("Sequence diagrams use '->>': A->>B: message"));
}

#[test]
fn hint_flags_participant_without_header() {
    assert_eq!(type_hint("participant Alice"), Some("Sequence diagrams must start with 'sequenceDiagram'"));
}

#[test]
fn hint_flags_subgraph_without_header() {
    assert_eq!(
        type_hint("subgraph G\nA --> B\nend"),
        Some("Flowcharts with subgraphs must start with 'flowchart TB' or 'graph TD'")
    );
}

#[test]
fn hint_is_none_for_valid_syntax() {
    assert_eq!(type_hint("flowchart TB\nA --> B"), None);
    assert_eq!(type_hint(""), None);
}

#[test]
fn missing_header_appends_hint() {
    let err = DiagramError::missing_header("A -> B");
    assert!(err.suggestion.ends_with(". Flowcharts use '-->': A --> B"));
}
