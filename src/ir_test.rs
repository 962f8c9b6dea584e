use super::*;

fn chain(ids: &[&str]) -> Diagram {
    let mut d = Diagram::new(DiagramKind::Flowchart);
    for id in ids {
        d.add_node(Node::new(*id, *id, NodeShape::Rectangle));
    }
    for pair in ids.windows(2) {
        d.add_edge(Edge::new(format!("{}_{}", pair[0], pair[1]), pair[0], pair[1]));
    }
    d
}

#[test]
fn add_node_keeps_first_definition() {
    let mut d = Diagram::new(DiagramKind::Flowchart);
    assert!(d.add_node(Node::new("A", "First", NodeShape::Diamond)));
    assert!(!d.add_node(Node::new("A", "Second", NodeShape::Circle)));
    assert_eq!(d.nodes.len(), 1);
    assert_eq!(d.nodes["A"].label, "First");
    assert_eq!(d.nodes["A"].shape, NodeShape::Diamond);
}

#[test]
fn add_node_assigns_order_by_insertion() {
    let d = chain(&["X", "Y", "Z"]);
    assert_eq!(d.nodes["X"].order, 0);
    assert_eq!(d.nodes["Y"].order, 1);
    assert_eq!(d.nodes["Z"].order, 2);
}

#[test]
fn geometry_is_zero_before_layout() {
    let d = chain(&["A", "B"]);
    assert_eq!(d.nodes["A"].rect(), Rect::default());
    assert!(d.width().abs() < f64::EPSILON);
    assert!(d.height().abs() < f64::EPSILON);
}

#[test]
fn resolves_detects_dangling_edges() {
    let mut d = chain(&["A", "B"]);
    d.add_edge(Edge::new("dangling", "A", "Missing"));
    assert!(d.resolves(&d.edges[0]));
    assert!(!d.resolves(&d.edges[1]));
}

#[test]
fn topological_order_follows_edges() {
    let d = chain(&["A", "B", "C"]);
    assert_eq!(d.topological_order(), vec!["A", "B", "C"]);
}

#[test]
fn topological_order_includes_disconnected_nodes() {
    let mut d = chain(&["A", "B"]);
    d.add_node(Node::new("Lonely", "Lonely", NodeShape::Rectangle));
    let order = d.topological_order();
    assert_eq!(order.len(), 3);
    assert!(order.contains(&"Lonely".to_owned()));
}

#[test]
fn topological_order_appends_cycle_members() {
    let mut d = chain(&["A", "B", "C"]);
    d.add_edge(Edge::new("back", "C", "B"));
    let order = d.topological_order();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn direction_keywords() {
    assert_eq!(Direction::from_keyword("TD"), Some(Direction::TB));
    assert_eq!(Direction::from_keyword("lr"), Some(Direction::LR));
    assert_eq!(Direction::from_keyword("XX"), None);
    assert!(Direction::RL.is_horizontal());
    assert!(Direction::RL.is_reversed());
    assert!(!Direction::TB.is_reversed());
}

#[test]
fn rect_union_and_contains() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, 5.0, 10.0, 10.0);
    let u = a.union(&b);
    assert_eq!(u, Rect::new(0.0, 0.0, 30.0, 15.0));
    assert!(u.contains(&a));
    assert!(u.contains(&b));
    assert!(!a.contains(&b));
    assert_eq!(a.inflate(5.0), Rect::new(-5.0, -5.0, 20.0, 20.0));
}
