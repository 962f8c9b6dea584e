use super::*;
use rstest::rstest;

// =============================================================================
// ARROWS
// =============================================================================

#[rstest]
#[case("A --> B", EdgeStyle::Solid, ArrowCap::Arrow)]
#[case("A ---> B", EdgeStyle::Solid, ArrowCap::Arrow)]
#[case("A --- B", EdgeStyle::Solid, ArrowCap::None)]
#[case("A -.-> B", EdgeStyle::Dotted, ArrowCap::Arrow)]
#[case("A -.- B", EdgeStyle::Dotted, ArrowCap::None)]
#[case("A ==> B", EdgeStyle::Thick, ArrowCap::Arrow)]
#[case("A === B", EdgeStyle::Thick, ArrowCap::None)]
#[case("A --o B", EdgeStyle::Solid, ArrowCap::FilledCircle)]
#[case("A --x B", EdgeStyle::Solid, ArrowCap::DiamondCross)]
#[case("A-->B", EdgeStyle::Solid, ArrowCap::Arrow)]
fn arrow_operators(#[case] line: &str, #[case] style: EdgeStyle, #[case] end_cap: ArrowCap) {
    let chain = split_chain(line);
    assert_eq!(chain.groups, vec![vec!["A"], vec!["B"]]);
    assert_eq!(chain.links.len(), 1);
    assert_eq!(chain.links[0].style, style);
    assert_eq!(chain.links[0].end_cap, end_cap);
    assert_eq!(chain.links[0].start_cap, ArrowCap::None);
    assert_eq!(chain.links[0].label, None);
}

#[test]
fn circle_cap_needs_a_token_break() {
    // `--oB` is not a circle cap followed by B; nothing splits.
    let chain = split_chain("A --oB");
    assert!(chain.links.is_empty());
}

#[test]
fn single_dash_is_not_an_arrow() {
    let chain = split_chain("A - B");
    assert!(chain.links.is_empty());
    assert_eq!(chain.groups, vec![vec!["A - B"]]);
}

#[test]
fn pipe_label_after_arrow() {
    let chain = split_chain("A -->|Yes| B");
    assert_eq!(chain.groups, vec![vec!["A"], vec!["B"]]);
    assert_eq!(chain.links[0].label.as_deref(), Some("Yes"));
}

#[test]
fn pipe_label_with_spaces() {
    let chain = split_chain("A -.->| maybe later | B");
    assert_eq!(chain.links[0].style, EdgeStyle::Dotted);
    assert_eq!(chain.links[0].label.as_deref(), Some("maybe later"));
    assert_eq!(chain.groups[1], vec!["B"]);
}

#[rstest]
#[case("A -- go --> B", EdgeStyle::Solid, ArrowCap::Arrow, "go")]
#[case("A -- two words --- B", EdgeStyle::Solid, ArrowCap::None, "two words")]
#[case("A == heavy ==> B", EdgeStyle::Thick, ArrowCap::Arrow, "heavy")]
#[case("A -. soft .-> B", EdgeStyle::Dotted, ArrowCap::Arrow, "soft")]
fn inline_label_arrows(#[case] line: &str, #[case] style: EdgeStyle, #[case] end_cap: ArrowCap, #[case] label: &str) {
    let chain = split_chain(line);
    assert_eq!(chain.groups, vec![vec!["A"], vec!["B"]]);
    assert_eq!(chain.links[0].style, style);
    assert_eq!(chain.links[0].end_cap, end_cap);
    assert_eq!(chain.links[0].label.as_deref(), Some(label));
}

#[test]
fn arrows_inside_labels_do_not_split() {
    let chain = split_chain("A[a --> b] --> B{x -.- y}");
    assert_eq!(chain.groups, vec![vec!["A[a --> b]"], vec!["B{x -.- y}"]]);
    assert_eq!(chain.links.len(), 1);
}

#[test]
fn arrows_inside_flag_label_do_not_split() {
    let chain = split_chain("A>flag --> x] --> B");
    assert_eq!(chain.groups, vec![vec!["A>flag --> x]"], vec!["B"]]);
    assert_eq!(chain.links.len(), 1);
    let node = parse_node_ref(chain.groups[0][0]).unwrap();
    assert_eq!(node.label, "flag --> x");
    assert_eq!(node.shape, NodeShape::Parallelogram);
}

#[test]
fn arrow_heads_are_not_flag_openers() {
    let chain = split_chain("A-->B==>C");
    assert_eq!(chain.groups, vec![vec!["A"], vec!["B"], vec!["C"]]);
}

#[test]
fn arrows_inside_quotes_do_not_split() {
    let chain = split_chain(r#"A["x --> y"] --> B"#);
    assert_eq!(chain.groups.len(), 2);
    assert_eq!(chain.groups[0], vec![r#"A["x --> y"]"#]);
}

#[test]
fn chains_split_into_many_groups() {
    let chain = split_chain("A --> B --> C -.-> D");
    assert_eq!(chain.groups.len(), 4);
    assert_eq!(chain.links.len(), 3);
    assert_eq!(chain.links[2].style, EdgeStyle::Dotted);
}

#[test]
fn ampersand_joins_nodes_in_a_group() {
    let chain = split_chain("A & B --> C & D");
    assert_eq!(chain.groups, vec![vec!["A", "B"], vec!["C", "D"]]);
}

#[test]
fn ampersand_inside_label_is_text() {
    let chain = split_chain("A[Tom & Jerry] --> B");
    assert_eq!(chain.groups[0], vec!["A[Tom & Jerry]"]);
}

#[test]
fn dangling_arrow_leaves_empty_group() {
    let chain = split_chain("A -->");
    assert_eq!(chain.groups, vec![vec!["A"], vec![""]]);
}

#[test]
fn non_ascii_text_is_scanned_safely() {
    let chain = split_chain("A[café ü] --> B((naïve))");
    assert_eq!(chain.groups.len(), 2);
    assert_eq!(chain.groups[1], vec!["B((naïve))"]);
}

// =============================================================================
// NODE REFERENCES
// =============================================================================

#[rstest]
#[case("A[Start]", "Start", NodeShape::Rectangle)]
#[case("A{Decide}", "Decide", NodeShape::Diamond)]
#[case("A((Hub))", "Hub", NodeShape::Circle)]
#[case("A(Soft)", "Soft", NodeShape::Stadium)]
#[case("A([Pill])", "Pill", NodeShape::Stadium)]
#[case("A[(Store)]", "Store", NodeShape::Cylinder)]
#[case("A{{Prep}}", "Prep", NodeShape::Hexagon)]
#[case("A[/Input/]", "Input", NodeShape::Parallelogram)]
#[case("A[\\Alt\\]", "Alt", NodeShape::Trapezoid)]
#[case("A[/Manual\\]", "Manual", NodeShape::Trapezoid)]
#[case("A[\\Skew/]", "Skew", NodeShape::Parallelogram)]
#[case("A>Flag]", "Flag", NodeShape::Parallelogram)]
fn shape_delimiters(#[case] text: &str, #[case] label: &str, #[case] shape: NodeShape) {
    let node = parse_node_ref(text).unwrap();
    assert_eq!(node.id, "A");
    assert_eq!(node.label, label);
    assert_eq!(node.shape, shape);
}

#[test]
fn bare_id_is_rectangle_labelled_with_id() {
    let node = parse_node_ref("  node_1 ").unwrap();
    assert_eq!(node, NodeRef { id: "node_1".into(), label: "node_1".into(), shape: NodeShape::Rectangle });
}

#[test]
fn quoted_labels_are_unquoted() {
    assert_eq!(parse_node_ref(r#"A["Hello world"]"#).unwrap().label, "Hello world");
    assert_eq!(parse_node_ref("B('single')").unwrap().label, "single");
}

#[test]
fn empty_label_is_an_unknown_shape() {
    assert_eq!(parse_node_ref("A[]"), Err(NodeRefError::UnknownShape));
    assert_eq!(parse_node_ref("A[\"\"]"), Err(NodeRefError::UnknownShape));
}

#[test]
fn unclosed_delimiter_is_an_unknown_shape() {
    assert_eq!(parse_node_ref("A[oops"), Err(NodeRefError::UnknownShape));
    assert_eq!(parse_node_ref("A<weird>"), Err(NodeRefError::UnknownShape));
}

#[test]
fn missing_identifier_is_not_a_node() {
    assert_eq!(parse_node_ref("[Label]"), Err(NodeRefError::NotANode));
    assert_eq!(parse_node_ref(""), Err(NodeRefError::NotANode));
    assert_eq!(parse_node_ref("-->"), Err(NodeRefError::NotANode));
}

#[test]
fn unquote_strips_one_pair() {
    assert_eq!(unquote(r#" "a" "#), "a");
    assert_eq!(unquote("'b'"), "b");
    assert_eq!(unquote("\"mismatch'"), "\"mismatch'");
    assert_eq!(unquote("\""), "\"");
}
