//! Layout stage — consumes a parsed [`Diagram`], produces a positioned one.
//!
//! DESIGN
//! ======
//! Layout is a one-way transformation: [`layout`] takes the diagram by value
//! and returns a [`LaidOut`], which only this module can construct. Holding a
//! `LaidOut` therefore proves every node box, message offset, and the
//! diagram bounds have been computed, and the converter accepts nothing else.
//! Flowcharts use layered (Sugiyama-style) placement; sequence diagrams use
//! fixed columns and rows.

pub mod flowchart;
pub mod sequence;

use indexmap::IndexMap;

use crate::config::LayoutConfig;
use crate::ir::{Diagram, DiagramKind, Rect};

/// A diagram whose geometry has been computed.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOut {
    diagram: Diagram,
    layers: IndexMap<String, usize>,
    padding: f64,
}

impl LaidOut {
    fn new(diagram: Diagram, layers: IndexMap<String, usize>, config: &LayoutConfig) -> Self {
        Self { diagram, layers, padding: config.padding }
    }

    /// The positioned diagram.
    #[must_use]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Give up the layout guarantee and take the diagram back.
    #[must_use]
    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    /// Layer of a flowchart node; `None` for unknown IDs and sequence diagrams.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<usize> {
        self.layers.get(id).copied()
    }

    /// Every node's layer in node insertion order (empty for sequence diagrams).
    #[must_use]
    pub fn layers(&self) -> &IndexMap<String, usize> {
        &self.layers
    }

    /// Computed box of a node.
    #[must_use]
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.diagram.nodes.get(id).map(crate::ir::Node::rect)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.diagram.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.diagram.height
    }

    /// Frame padding around subgraph members.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }
}

/// Position every node (and, for sequence diagrams, every message).
///
/// Never fails: dangling references are skipped, cycles are broken, and an
/// empty diagram yields zero bounds.
#[must_use]
pub fn layout(diagram: Diagram, config: &LayoutConfig) -> LaidOut {
    let config = config.normalized();
    match diagram.kind {
        DiagramKind::Sequence => sequence::layout_sequence(diagram, &config),
        DiagramKind::Flowchart | DiagramKind::Mindmap => flowchart::layout_flowchart(diagram, &config),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
