//! Flowchart grammar — header, node/edge statements, subgraphs, styles.
//!
//! DESIGN
//! ======
//! Each significant line is classified into a [`FlowLine`]; statements are
//! then split by the lexer into `&`-joined node groups and arrow links. Nodes
//! are created on first appearance (first definition wins) and join the
//! innermost open subgraph only at creation. A group that fails to parse
//! breaks the chain: links touching it produce no edges.

use tracing::debug;

use super::lexer::{self, NodeRefError};
use super::{ParseMode, significant_lines, strip_keyword};
use crate::error::{DiagramError, MAX_EDGES, MAX_NODES};
use crate::ir::{Diagram, DiagramKind, Direction, Edge, Node, NodeShape, SubGraph};

/// A classified flowchart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FlowLine<'a> {
    /// `subgraph ...`
    SubgraphStart { id: String, label: String },
    /// `end`
    End,
    /// `style id fill:#hex,...`
    Style { id: &'a str, color: Option<&'a str> },
    /// `classDef`, `class`, `click`, `linkStyle`, `direction`, a repeated header.
    Ignored,
    /// A keyword line missing its required argument.
    Malformed(&'a str),
    /// Anything else: node declarations and edge chains.
    Statement(&'a str),
}

/// Keywords whose lines carry styling or interaction only.
const IGNORED_KEYWORDS: &[&str] = &["classdef", "class", "click", "linkstyle", "direction"];

/// Classify one trimmed, non-header line.
pub(crate) fn classify(line: &str) -> FlowLine<'_> {
    if line.eq_ignore_ascii_case("end") {
        return FlowLine::End;
    }
    if let Some(rest) = strip_keyword(line, "subgraph") {
        if let Some((id, label)) = parse_subgraph_header(rest) {
            return FlowLine::SubgraphStart { id, label };
        }
        return FlowLine::Malformed(line);
    }
    if let Some(rest) = strip_keyword(line, "style") {
        let (id, props) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if !id.is_empty() {
            let color = props
                .split(',')
                .map(str::trim)
                .find_map(|prop| prop.strip_prefix("fill:"))
                .map(str::trim)
                .filter(|c| !c.is_empty());
            return FlowLine::Style { id, color };
        }
        return FlowLine::Malformed(line);
    }
    if IGNORED_KEYWORDS.iter().any(|kw| strip_keyword(line, kw).is_some()) || is_repeated_header(line) {
        return FlowLine::Ignored;
    }
    FlowLine::Statement(line)
}

/// `flowchart`/`graph` alone or followed by a direction word.
fn is_repeated_header(line: &str) -> bool {
    ["flowchart", "graph"].iter().filter_map(|kw| strip_keyword(line, kw)).any(|rest| {
        rest.is_empty() || Direction::from_keyword(rest).is_some()
    })
}

/// `id`, `id[label]`, `id [label]`, `"Title"`, or `Multi word title`.
fn parse_subgraph_header(rest: &str) -> Option<(String, String)> {
    if rest.is_empty() {
        return None;
    }
    if rest.starts_with('"') {
        let title = lexer::unquote(rest);
        return Some((words_to_id(title), title.to_owned()));
    }
    if let Some((head, tail)) = rest.split_once('[') {
        let id = head.trim();
        if !id.is_empty() && !id.contains(char::is_whitespace) && tail.ends_with(']') {
            let label = lexer::unquote(&tail[..tail.len() - 1]);
            let label = if label.is_empty() { id } else { label };
            return Some((id.to_owned(), label.to_owned()));
        }
    }
    if rest.contains(char::is_whitespace) {
        return Some((words_to_id(rest), rest.to_owned()));
    }
    Some((rest.to_owned(), rest.to_owned()))
}

fn words_to_id(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_")
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse flowchart text into a [`Diagram`] of kind `Flowchart`.
///
/// # Errors
///
/// `NoNodes` when no node was produced, `TooManyNodes` above [`MAX_NODES`];
/// in strict mode also `InvalidSyntax`, `InvalidShape` and `InvalidEdge`.
pub fn parse_flowchart(text: &str, mode: ParseMode) -> Result<Diagram, DiagramError> {
    let mut parser = FlowchartParser::new(mode);
    let mut lines = significant_lines(text).peekable();

    if let Some((_, first)) = lines.peek() {
        if let Some(direction) = header_direction(first) {
            parser.diagram.direction = direction.unwrap_or_default();
            lines.next();
        }
    }

    for (line_no, raw) in lines {
        let line = raw.trim_end_matches(';').trim_end();
        if line.is_empty() {
            continue;
        }
        parser.line(line_no, line)?;
    }

    parser.finish()
}

/// `Some(direction)` when `line` is a `flowchart`/`graph` header.
///
/// The inner option is `None` when the direction word is absent or unknown.
fn header_direction(line: &str) -> Option<Option<Direction>> {
    let lower = line.to_ascii_lowercase();
    let keyword_len = if lower.starts_with("flowchart") {
        "flowchart".len()
    } else if lower.starts_with("graph") {
        "graph".len()
    } else {
        return None;
    };
    let word = line[keyword_len..].split_whitespace().next();
    Some(word.and_then(|w| Direction::from_keyword(w.trim_end_matches(';'))))
}

struct FlowchartParser {
    diagram: Diagram,
    mode: ParseMode,
    current: Option<String>,
    stack: Vec<Option<String>>,
}

impl FlowchartParser {
    fn new(mode: ParseMode) -> Self {
        Self { diagram: Diagram::new(DiagramKind::Flowchart), mode, current: None, stack: Vec::new() }
    }

    fn line(&mut self, line_no: usize, line: &str) -> Result<(), DiagramError> {
        match classify(line) {
            FlowLine::SubgraphStart { id, label } => self.open_subgraph(id, label),
            FlowLine::End => match self.stack.pop() {
                Some(parent) => self.current = parent,
                None => debug!(line = line_no, "unmatched end ignored"),
            },
            FlowLine::Style { id, color } => {
                self.ensure_node(id, id, NodeShape::Rectangle);
                if let (Some(node), Some(color)) = (self.diagram.nodes.get_mut(id), color) {
                    node.color = Some(color.to_owned());
                }
            }
            FlowLine::Ignored => debug!(line = line_no, "styling line ignored"),
            FlowLine::Malformed(text) if self.mode == ParseMode::Strict => {
                return Err(DiagramError::invalid_syntax(line_no, text, "keyword is missing its argument"));
            }
            FlowLine::Malformed(text) => debug!(line = line_no, text, "malformed keyword line skipped"),
            FlowLine::Statement(statement) => self.statement(line_no, statement)?,
        }
        Ok(())
    }

    fn open_subgraph(&mut self, id: String, label: String) {
        if !self.diagram.subgraphs.contains_key(&id) {
            let mut subgraph = SubGraph::new(id.clone(), label);
            subgraph.parent_id.clone_from(&self.current);
            self.diagram.add_subgraph(subgraph);
        }
        self.stack.push(self.current.take());
        self.current = Some(id);
    }

    /// Insert a node unless it exists; returns its ID either way.
    fn ensure_node(&mut self, id: &str, label: &str, shape: NodeShape) -> String {
        let mut node = Node::new(id, label, shape);
        node.subgraph_id.clone_from(&self.current);
        if self.diagram.add_node(node) {
            if let Some(subgraph) = self.current.as_ref().and_then(|sg| self.diagram.subgraphs.get_mut(sg)) {
                subgraph.node_ids.push(id.to_owned());
            }
        }
        id.to_owned()
    }

    fn statement(&mut self, line_no: usize, statement: &str) -> Result<(), DiagramError> {
        let chain = lexer::split_chain(statement);
        let in_chain = !chain.links.is_empty();

        let mut groups: Vec<Vec<String>> = Vec::with_capacity(chain.groups.len());
        for group in &chain.groups {
            let mut ids = Vec::with_capacity(group.len());
            for text in group {
                match self.node_ref(line_no, text, in_chain)? {
                    Some(id) => ids.push(id),
                    None => debug!(line = line_no, text = %text, "unparsable node reference skipped"),
                }
            }
            groups.push(ids);
        }

        for (idx, link) in chain.links.iter().enumerate() {
            let (Some(sources), Some(targets)) = (groups.get(idx), groups.get(idx + 1)) else {
                continue;
            };
            for from in sources {
                for to in targets {
                    if self.diagram.edges.len() >= MAX_EDGES {
                        return Err(DiagramError::too_many_edges(line_no, MAX_EDGES));
                    }
                    let mut edge = Edge::new(format!("edge_{}", self.diagram.edges.len()), from, to);
                    edge.label = link.label.clone().unwrap_or_default();
                    edge.style = link.style;
                    edge.start_cap = link.start_cap;
                    edge.end_cap = link.end_cap;
                    self.diagram.add_edge(edge);
                }
            }
        }
        Ok(())
    }

    /// Resolve one node reference, creating the node when new.
    ///
    /// `Ok(None)` means tolerated garbage; strict mode turns it into an error.
    fn node_ref(&mut self, line_no: usize, text: &str, in_chain: bool) -> Result<Option<String>, DiagramError> {
        match lexer::parse_node_ref(text) {
            Ok(node) => Ok(Some(self.ensure_node(&node.id, &node.label, node.shape))),
            Err(_) if self.mode == ParseMode::Tolerant => Ok(None),
            Err(NodeRefError::UnknownShape) => Err(DiagramError::invalid_shape(line_no, text)),
            Err(NodeRefError::NotANode) if in_chain => Err(DiagramError::invalid_edge(line_no, text)),
            Err(NodeRefError::NotANode) => {
                Err(DiagramError::invalid_syntax(line_no, text, "not a node, edge or keyword"))
            }
        }
    }

    fn finish(self) -> Result<Diagram, DiagramError> {
        let count = self.diagram.nodes.len();
        if count == 0 {
            return Err(DiagramError::no_nodes());
        }
        if count > MAX_NODES {
            return Err(DiagramError::too_many_nodes(count, MAX_NODES));
        }
        debug!(
            nodes = count,
            edges = self.diagram.edges.len(),
            subgraphs = self.diagram.subgraphs.len(),
            "flowchart parsed"
        );
        Ok(self.diagram)
    }
}

#[cfg(test)]
#[path = "flowchart_test.rs"]
mod tests;
