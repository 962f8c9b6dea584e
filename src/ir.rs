//! Diagram IR — the node/edge/subgraph graph shared by parse, layout, convert.
//!
//! DESIGN
//! ======
//! Nodes and subgraphs live in insertion-ordered tables keyed by ID; edges and
//! subgraph members store IDs, not references. A dangling reference is just a
//! failed lookup, which layout and conversion skip. Geometry fields are
//! crate-private: only the layout stage writes them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Dialect a diagram was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    /// Reserved; no grammar produces it yet. Converted like a flowchart.
    Mindmap,
}

/// Flow direction of the layer axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    /// Parse a direction keyword; `TD` aliases `TB`.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Some(Self::TB),
            "BT" => Some(Self::BT),
            "LR" => Some(Self::LR),
            "RL" => Some(Self::RL),
            _ => None,
        }
    }

    /// Layers advance along the x axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }

    /// Layers are drawn from the far edge back toward the origin.
    #[must_use]
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BT | Self::RL)
    }
}

/// Visual shape of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    #[default]
    Rectangle,
    RoundedRectangle,
    Diamond,
    Circle,
    Stadium,
    Cylinder,
    Parallelogram,
    Hexagon,
    Trapezoid,
}

/// Line style of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dotted,
    Thick,
}

/// Decoration at either end of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowCap {
    #[default]
    None,
    Arrow,
    FilledCircle,
    DiamondCross,
}

/// Activation modifier on a sequence message (`->>+` / `->>-`).
///
/// Recorded but not drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    None,
    Activate,
    Deactivate,
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Axis-aligned box; `x`/`y` are the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// `other` lies fully inside `self` (edges inclusive).
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }

    /// Smallest box covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Grow outward by `pad` on every side.
    #[must_use]
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect::new(self.x - pad, self.y - pad, self.width + 2.0 * pad, self.height + 2.0 * pad)
    }
}

// =============================================================================
// NODES, EDGES, SUBGRAPHS
// =============================================================================

/// A flowchart node or a sequence participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    /// Owning subgraph, if declared inside one.
    pub subgraph_id: Option<String>,
    /// Declaration / first-appearance index; column order for participants.
    pub order: usize,
    /// Explicit fill color, overriding the palette.
    pub color: Option<String>,
    pub(crate) rect: Rect,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape,
            subgraph_id: None,
            order: 0,
            color: None,
            rect: Rect::default(),
        }
    }

    /// Computed box; all zero before layout.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// A directed connection. Endpoints may not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub label: String,
    pub style: EdgeStyle,
    pub start_cap: ArrowCap,
    pub end_cap: ArrowCap,
    /// Sequence messages only.
    pub activation: Activation,
    pub(crate) timeline_y: f64,
}

impl Edge {
    #[must_use]
    pub fn new(id: impl Into<String>, from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            label: String::new(),
            style: EdgeStyle::Solid,
            start_cap: ArrowCap::None,
            end_cap: ArrowCap::Arrow,
            activation: Activation::None,
            timeline_y: 0.0,
        }
    }

    /// Vertical offset of a sequence message; zero before layout.
    #[must_use]
    pub fn timeline_y(&self) -> f64 {
        self.timeline_y
    }
}

/// A named grouping of flowchart nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SubGraph {
    pub id: String,
    pub label: String,
    /// Member IDs in declaration order; may not resolve.
    pub node_ids: Vec<String>,
    pub parent_id: Option<String>,
}

impl SubGraph {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), node_ids: Vec::new(), parent_id: None }
    }
}

// =============================================================================
// DIAGRAM
// =============================================================================

/// Root aggregate produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub kind: DiagramKind,
    pub direction: Direction,
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
    pub subgraphs: IndexMap<String, SubGraph>,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Diagram {
    #[must_use]
    pub fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            direction: Direction::TB,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            subgraphs: IndexMap::new(),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Insert `node` unless its ID already exists. First definition wins.
    ///
    /// Returns `true` when the node was inserted.
    pub fn add_node(&mut self, mut node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        node.order = self.nodes.len();
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Insert `subgraph` unless its ID already exists.
    pub fn add_subgraph(&mut self, subgraph: SubGraph) {
        self.subgraphs.entry(subgraph.id.clone()).or_insert(subgraph);
    }

    /// Both endpoints of `edge` resolve to nodes.
    #[must_use]
    pub fn resolves(&self, edge: &Edge) -> bool {
        self.nodes.contains_key(&edge.from_id) && self.nodes.contains_key(&edge.to_id)
    }

    /// Bounding-box width; zero before layout.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bounding-box height; zero before layout.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Node IDs in topological order (Kahn's algorithm over resolvable edges).
    ///
    /// Nodes left over by cycles are appended in insertion order.
    #[must_use]
    pub fn topological_order(&self) -> Vec<String> {
        let mut indegree: IndexMap<&str, usize> = self.nodes.keys().map(|id| (id.as_str(), 0)).collect();
        let mut outgoing: IndexMap<&str, Vec<&str>> = self.nodes.keys().map(|id| (id.as_str(), Vec::new())).collect();

        for edge in self.edges.iter().filter(|e| self.resolves(e)) {
            if let Some(count) = indegree.get_mut(edge.to_id.as_str()) {
                *count += 1;
            }
            if let Some(targets) = outgoing.get_mut(edge.from_id.as_str()) {
                targets.push(edge.to_id.as_str());
            }
        }

        let mut queue: std::collections::VecDeque<&str> =
            indegree.iter().filter(|(_, count)| **count == 0).map(|(id, _)| *id).collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut placed = std::collections::HashSet::new();

        while let Some(id) = queue.pop_front() {
            order.push(id.to_owned());
            placed.insert(id);
            for target in outgoing.get(id).into_iter().flatten() {
                if let Some(count) = indegree.get_mut(target) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(*target);
                    }
                }
            }
        }

        for id in self.nodes.keys() {
            if !placed.contains(id.as_str()) {
                order.push(id.clone());
            }
        }
        order
    }
}

#[cfg(test)]
#[path = "ir_test.rs"]
mod tests;
