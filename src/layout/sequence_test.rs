use super::*;
use crate::parse::parse;

fn laid(text: &str) -> LaidOut {
    layout_sequence(parse(text).unwrap(), &LayoutConfig::default())
}

#[test]
fn participants_fill_columns_in_order() {
    let out = laid("sequenceDiagram\nAlice->>Bob: Hi\nBob-->>Alice: Hello");
    let alice = out.rect("Alice").unwrap();
    let bob = out.rect("Bob").unwrap();
    assert_eq!(alice, Rect::new(0.0, TOP_MARGIN, PARTICIPANT_WIDTH, PARTICIPANT_HEIGHT));
    assert_eq!(bob.x, PARTICIPANT_SPACING);
    assert_eq!(bob.y, alice.y);
}

#[test]
fn messages_get_increasing_offsets() {
    let out = laid("sequenceDiagram\nA->>B: one\nB->>A: two\nA->>B: three");
    let ys: Vec<f64> = out.diagram().edges.iter().map(crate::ir::Edge::timeline_y).collect();
    let first = TOP_MARGIN + PARTICIPANT_HEIGHT + MESSAGE_GAP;
    assert_eq!(ys, vec![first, first + MESSAGE_SPACING, first + 2.0 * MESSAGE_SPACING]);
}

#[test]
fn actor_is_centered_in_its_column() {
    let out = laid("sequenceDiagram\nactor U\nparticipant S\nU->>S: go");
    let u = out.rect("U").unwrap();
    assert_eq!((u.width, u.height), (ACTOR_SIZE, ACTOR_SIZE));
    assert_eq!(u.center_x(), PARTICIPANT_WIDTH / 2.0);
    assert_eq!(out.rect("S").unwrap().center_x(), PARTICIPANT_SPACING + PARTICIPANT_WIDTH / 2.0);
}

#[test]
fn bounds_cover_columns_and_last_message() {
    let out = laid("sequenceDiagram\nA->>B: one\nB->>C: two");
    assert_eq!(out.width(), 2.0 * PARTICIPANT_SPACING + PARTICIPANT_WIDTH);
    let last = TOP_MARGIN + PARTICIPANT_HEIGHT + MESSAGE_GAP + MESSAGE_SPACING;
    assert_eq!(out.height(), last + MESSAGE_SPACING);
}

#[test]
fn no_messages_gives_minimum_height() {
    let out = laid("sequenceDiagram\nparticipant A");
    assert_eq!(out.width(), PARTICIPANT_WIDTH);
    assert_eq!(out.height(), TOP_MARGIN + PARTICIPANT_HEIGHT + 50.0);
}

#[test]
fn origin_shifts_boxes_and_rows_but_not_bounds() {
    let config = LayoutConfig::default().with_origin(500.0, 300.0);
    let out = layout_sequence(parse("sequenceDiagram\nA->>B: hi").unwrap(), &config);
    assert_eq!(out.rect("A").unwrap().x, 500.0);
    assert_eq!(out.rect("A").unwrap().y, 300.0 + TOP_MARGIN);
    assert_eq!(out.diagram().edges[0].timeline_y(), 300.0 + TOP_MARGIN + PARTICIPANT_HEIGHT + MESSAGE_GAP);
    assert_eq!(out.height(), TOP_MARGIN + PARTICIPANT_HEIGHT + MESSAGE_GAP + MESSAGE_SPACING);
}

#[test]
fn sequence_has_no_layers() {
    let out = laid("sequenceDiagram\nA->>B: hi");
    assert!(out.layers().is_empty());
    assert_eq!(out.layer("A"), None);
}
