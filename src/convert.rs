//! Primitive converter — laid-out diagram to board shapes, connectors, frames.
//!
//! DESIGN
//! ======
//! Board connectors join shapes, never free points, and shapes are placed by
//! center. Flowcharts map one node to one shape and one resolvable edge to
//! one connector; subgraphs become frames around their members. Sequence
//! diagrams add a lifeline under every participant and two small anchor
//! shapes per message, so each message connector has shapes to attach to at
//! its timeline offset.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ir::{ArrowCap, Diagram, DiagramKind, EdgeStyle, Node, NodeShape, Rect};
use crate::layout::LaidOut;
use crate::layout::sequence::{MESSAGE_GAP, PARTICIPANT_HEIGHT};

/// Height reserved above frame members for the frame title.
pub const FRAME_TITLE_BAND: f64 = 30.0;
pub const FRAME_COLOR: &str = "#F5F5F5";

const PARTICIPANT_COLOR: &str = "#E3F2FD";
const ACTOR_COLOR: &str = "#FFF9C4";
const LIFELINE_WIDTH: f64 = 10.0;
const LIFELINE_COLOR: &str = "#90CAF9";
/// Space between a participant box and the top of its lifeline.
const LIFELINE_OFFSET: f64 = 10.0;
const MIN_LIFELINE_HEIGHT: f64 = 50.0;
const FALLBACK_LIFELINE_HEIGHT: f64 = 100.0;
const ANCHOR_SIZE: f64 = 8.0;
const ANCHOR_COLOR: &str = LIFELINE_COLOR;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Board shape vocabulary: basic shapes plus flowchart stencils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    RoundRectangle,
    Rhombus,
    Circle,
    Pill,
    Can,
    Parallelogram,
    Hexagon,
    Trapezoid,
    FlowChartTerminator,
    FlowChartProcess,
    FlowChartDecision,
    FlowChartInputOutput,
    FlowChartPreparation,
    FlowChartDatabase,
    FlowChartManualOperation,
}

/// What a shape stands for in the source diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeRole {
    /// Flowchart node.
    Node,
    /// Sequence participant or actor header.
    Participant,
    /// Vertical bar under a participant.
    Lifeline,
    /// Connector endpoint on a lifeline.
    Anchor,
}

/// How a connector is drawn between its shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Elbowed,
    Straight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub role: ShapeRole,
    pub text: String,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Kind is a flowchart stencil.
    pub stencil: bool,
}

impl Shape {
    fn new(kind: ShapeKind, role: ShapeRole, text: impl Into<String>, rect: Rect, color: impl Into<String>) -> Self {
        Self {
            kind,
            role,
            text: text.into(),
            center_x: rect.center_x(),
            center_y: rect.center_y(),
            width: rect.width,
            height: rect.height,
            color: color.into(),
            border_color: None,
            stencil: false,
        }
    }

    /// Top-left box of the shape.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.center_x - self.width / 2.0, self.center_y - self.height / 2.0, self.width, self.height)
    }
}

/// Link between two shapes, by index into [`Output::shapes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connector {
    pub start_index: usize,
    pub end_index: usize,
    pub caption: String,
    pub line_style: EdgeStyle,
    pub route: Route,
    pub start_cap: ArrowCap,
    pub end_cap: ArrowCap,
}

/// Titled box around a subgraph; `x`/`y` are the center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl Frame {
    fn around(title: &str, outer: Rect) -> Self {
        Self {
            title: title.to_owned(),
            x: outer.center_x(),
            y: outer.center_y(),
            width: outer.width,
            height: outer.height,
            color: FRAME_COLOR.to_owned(),
        }
    }

    /// Top-left box of the frame, title band included.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.width / 2.0, self.y - self.height / 2.0, self.width, self.height)
    }
}

/// Everything a board client needs to draw one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Output {
    pub shapes: Vec<Shape>,
    pub connectors: Vec<Connector>,
    pub frames: Vec<Frame>,
}

impl Output {
    /// Shapes playing `role`, in output order.
    pub fn shapes_with_role(&self, role: ShapeRole) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |s| s.role == role)
    }

    /// One-line count of drawn diagram elements.
    #[must_use]
    pub fn summary(&self) -> String {
        let nodes = self
            .shapes
            .iter()
            .filter(|s| matches!(s.role, ShapeRole::Node | ShapeRole::Participant))
            .count();
        format!(
            "Created diagram with {nodes} nodes, {} connectors, {} frames",
            self.connectors.len(),
            self.frames.len()
        )
    }
}

/// Converter switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Draw flowchart nodes with stencil shapes and stencil colors.
    pub use_stencils: bool,
}

// =============================================================================
// SHAPE TABLES
// =============================================================================

fn basic_kind(shape: NodeShape) -> ShapeKind {
    match shape {
        NodeShape::Rectangle => ShapeKind::Rectangle,
        NodeShape::RoundedRectangle => ShapeKind::RoundRectangle,
        NodeShape::Diamond => ShapeKind::Rhombus,
        NodeShape::Circle => ShapeKind::Circle,
        NodeShape::Stadium => ShapeKind::Pill,
        NodeShape::Cylinder => ShapeKind::Can,
        NodeShape::Parallelogram => ShapeKind::Parallelogram,
        NodeShape::Hexagon => ShapeKind::Hexagon,
        NodeShape::Trapezoid => ShapeKind::Trapezoid,
    }
}

fn basic_color(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Diamond => "#FFE066",
        NodeShape::Circle => "#B8E986",
        NodeShape::Stadium => "#B3E5FC",
        NodeShape::Parallelogram => "#E1BEE7",
        NodeShape::Hexagon => "#FFCCBC",
        NodeShape::Rectangle | NodeShape::RoundedRectangle | NodeShape::Cylinder | NodeShape::Trapezoid => "#E3F2FD",
    }
}

/// Stencil kind, fill, and border per node shape.
fn stencil(shape: NodeShape) -> (ShapeKind, &'static str, &'static str) {
    match shape {
        NodeShape::Circle | NodeShape::Stadium => (ShapeKind::FlowChartTerminator, "#C8E6C9", "#4CAF50"),
        NodeShape::Diamond => (ShapeKind::FlowChartDecision, "#FFF9C4", "#FFC107"),
        NodeShape::Rectangle | NodeShape::RoundedRectangle => (ShapeKind::FlowChartProcess, "#BBDEFB", "#2196F3"),
        NodeShape::Parallelogram => (ShapeKind::FlowChartInputOutput, "#E1BEE7", "#9C27B0"),
        NodeShape::Hexagon => (ShapeKind::FlowChartPreparation, "#FFE0B2", "#FF9800"),
        NodeShape::Cylinder => (ShapeKind::FlowChartDatabase, "#B3E5FC", "#00BCD4"),
        NodeShape::Trapezoid => (ShapeKind::FlowChartManualOperation, "#FFCCBC", "#FF5722"),
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a laid-out diagram into drawable primitives.
#[must_use]
pub fn convert(laid: &LaidOut, options: &ConvertOptions) -> Output {
    let output = match laid.diagram().kind {
        DiagramKind::Sequence => convert_sequence(laid.diagram()),
        DiagramKind::Flowchart | DiagramKind::Mindmap => convert_flowchart(laid.diagram(), laid.padding(), options),
    };
    debug!(
        shapes = output.shapes.len(),
        connectors = output.connectors.len(),
        frames = output.frames.len(),
        "diagram converted"
    );
    output
}

fn node_shape(node: &Node, options: &ConvertOptions) -> Shape {
    let mut shape = if options.use_stencils {
        let (kind, fill, border) = stencil(node.shape);
        let mut shape = Shape::new(kind, ShapeRole::Node, &node.label, node.rect(), fill);
        shape.border_color = Some(border.to_owned());
        shape.stencil = true;
        shape
    } else {
        Shape::new(basic_kind(node.shape), ShapeRole::Node, &node.label, node.rect(), basic_color(node.shape))
    };
    if let Some(color) = &node.color {
        shape.color.clone_from(color);
    }
    shape
}

fn convert_flowchart(diagram: &Diagram, padding: f64, options: &ConvertOptions) -> Output {
    let mut output = Output::default();
    let mut index_of: IndexMap<&str, usize> = IndexMap::with_capacity(diagram.nodes.len());

    for node in diagram.nodes.values() {
        index_of.insert(node.id.as_str(), output.shapes.len());
        output.shapes.push(node_shape(node, options));
    }

    for edge in &diagram.edges {
        let (Some(&start_index), Some(&end_index)) =
            (index_of.get(edge.from_id.as_str()), index_of.get(edge.to_id.as_str()))
        else {
            debug!(edge = %edge.id, "connector dropped: endpoint missing");
            continue;
        };
        output.connectors.push(Connector {
            start_index,
            end_index,
            caption: edge.label.clone(),
            line_style: edge.style,
            route: Route::Elbowed,
            start_cap: edge.start_cap,
            end_cap: edge.end_cap,
        });
    }

    let mut frames = FrameBuilder { diagram, padding, boxes: IndexMap::new() };
    for (id, subgraph) in &diagram.subgraphs {
        match frames.outer_box(id, &mut HashSet::new()) {
            Some(outer) => output.frames.push(Frame::around(&subgraph.label, outer)),
            None => debug!(subgraph = %id, "frame skipped: no members resolve"),
        }
    }
    output
}

/// Computes frame boxes, nesting child frames inside their parents.
struct FrameBuilder<'a> {
    diagram: &'a Diagram,
    padding: f64,
    /// Memoized outer box per subgraph (`None`: nothing to enclose).
    boxes: IndexMap<String, Option<Rect>>,
}

impl FrameBuilder<'_> {
    /// Frame box: members and child frames, padded, plus the title band.
    fn outer_box(&mut self, id: &str, visiting: &mut HashSet<String>) -> Option<Rect> {
        if let Some(cached) = self.boxes.get(id) {
            return *cached;
        }
        if !visiting.insert(id.to_owned()) {
            return None;
        }

        let diagram = self.diagram;
        let mut content = diagram
            .subgraphs
            .get(id)
            .into_iter()
            .flat_map(|sg| sg.node_ids.iter())
            .filter_map(|member| diagram.nodes.get(member))
            .map(Node::rect)
            .reduce(|acc, r| acc.union(&r));

        let children: Vec<&str> = diagram
            .subgraphs
            .values()
            .filter(|sg| sg.parent_id.as_deref() == Some(id))
            .map(|sg| sg.id.as_str())
            .collect();
        for child in children {
            if let Some(child_box) = self.outer_box(child, visiting) {
                content = Some(content.map_or(child_box, |c| c.union(&child_box)));
            }
        }

        let outer = content.map(|c| {
            let padded = c.inflate(self.padding);
            Rect::new(padded.x, padded.y - FRAME_TITLE_BAND, padded.width, padded.height + FRAME_TITLE_BAND)
        });
        self.boxes.insert(id.to_owned(), outer);
        outer
    }
}

fn convert_sequence(diagram: &Diagram) -> Output {
    let mut output = Output::default();
    let mut participants: Vec<&Node> = diagram.nodes.values().collect();
    participants.sort_by_key(|node| node.order);

    for node in &participants {
        let (kind, color) = if node.shape == NodeShape::Circle {
            (ShapeKind::Circle, ACTOR_COLOR)
        } else {
            (ShapeKind::Rectangle, PARTICIPANT_COLOR)
        };
        output.shapes.push(Shape::new(kind, ShapeRole::Participant, &node.label, node.rect(), color));
    }

    let mut lifeline_height = diagram.height() - PARTICIPANT_HEIGHT - MESSAGE_GAP;
    if lifeline_height < MIN_LIFELINE_HEIGHT {
        lifeline_height = FALLBACK_LIFELINE_HEIGHT;
    }
    for node in &participants {
        let rect = node.rect();
        let lifeline = Rect::new(
            rect.center_x() - LIFELINE_WIDTH / 2.0,
            rect.bottom() + LIFELINE_OFFSET,
            LIFELINE_WIDTH,
            lifeline_height,
        );
        output.shapes.push(Shape::new(ShapeKind::Rectangle, ShapeRole::Lifeline, "", lifeline, LIFELINE_COLOR));
    }

    for edge in &diagram.edges {
        let (Some(from), Some(to)) = (diagram.nodes.get(&edge.from_id), diagram.nodes.get(&edge.to_id)) else {
            debug!(message = %edge.id, "message dropped: participant missing");
            continue;
        };
        let y = edge.timeline_y();
        let start_index = output.shapes.len();
        output.shapes.push(anchor(from.rect().center_x(), y));
        output.shapes.push(anchor(to.rect().center_x(), y));
        output.connectors.push(Connector {
            start_index,
            end_index: start_index + 1,
            caption: edge.label.clone(),
            line_style: edge.style,
            route: Route::Straight,
            start_cap: edge.start_cap,
            end_cap: edge.end_cap,
        });
    }
    output
}

fn anchor(center_x: f64, center_y: f64) -> Shape {
    let rect = Rect::new(center_x - ANCHOR_SIZE / 2.0, center_y - ANCHOR_SIZE / 2.0, ANCHOR_SIZE, ANCHOR_SIZE);
    Shape::new(ShapeKind::Circle, ShapeRole::Anchor, "", rect, ANCHOR_COLOR)
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
