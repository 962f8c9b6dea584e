//! Sequence grammar — participants, messages, and block structure.
//!
//! Participants become nodes (actors get the circle shape) in declaration or
//! first-mention order; messages become edges `msg_0`, `msg_1`, ... in source
//! order. Block keywords (`loop`, `alt`, ...) are tracked on a stack only so
//! their `end` lines are consumed; they add nothing to the IR.

use tracing::debug;

use super::lexer::unquote;
use super::{ParseMode, significant_lines, strip_keyword};
use crate::error::{DiagramError, MAX_NODES};
use crate::ir::{Activation, ArrowCap, Diagram, DiagramKind, Edge, EdgeStyle, Node, NodeShape};

// =============================================================================
// MESSAGE ARROWS
// =============================================================================

/// Message arrow family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    /// `->>`, `->`
    Sync,
    /// `-->>`, `-->`
    Async,
    /// `-)`, `--)`
    AsyncOpen,
    /// `-x`, `--x`
    Cross,
}

impl MessageKind {
    fn style(self) -> (EdgeStyle, ArrowCap) {
        match self {
            Self::Sync => (EdgeStyle::Solid, ArrowCap::Arrow),
            Self::Async | Self::AsyncOpen => (EdgeStyle::Dotted, ArrowCap::Arrow),
            Self::Cross => (EdgeStyle::Solid, ArrowCap::DiamondCross),
        }
    }
}

/// Arrow operators, longest first to avoid prefix conflicts.
const ARROWS: &[(&str, MessageKind)] = &[
    ("-->>", MessageKind::Async),
    ("->>", MessageKind::Sync),
    ("--)", MessageKind::AsyncOpen),
    ("-)", MessageKind::AsyncOpen),
    ("--x", MessageKind::Cross),
    ("-x", MessageKind::Cross),
    ("-->", MessageKind::Async),
    ("->", MessageKind::Sync),
];

/// A parsed message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Message<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: MessageKind,
    pub activation: Activation,
    pub text: &'a str,
}

/// Parse `From <arrow>[+|-] To[: text]`.
///
/// The arrow is the leftmost position where any operator matches; both
/// participant names must be non-empty and free of whitespace.
pub(crate) fn parse_message(line: &str) -> Option<Message<'_>> {
    let (idx, op, kind) = line.char_indices().skip(1).find_map(|(idx, c)| {
        if c != '-' {
            return None;
        }
        ARROWS
            .iter()
            .find(|(op, _)| line[idx..].starts_with(op))
            .map(|(op, kind)| (idx, *op, *kind))
    })?;

    let from = line[..idx].trim();
    let mut rest = &line[idx + op.len()..];
    let activation = if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
        Activation::Activate
    } else if let Some(stripped) = rest.strip_prefix('-') {
        rest = stripped;
        Activation::Deactivate
    } else {
        Activation::None
    };

    let (to, text) = rest.split_once(':').unwrap_or((rest, ""));
    let to = to.trim();
    if from.is_empty() || to.is_empty() || from.contains(char::is_whitespace) || to.contains(char::is_whitespace) {
        return None;
    }
    Some(Message { from, to, kind, activation, text: text.trim() })
}

// =============================================================================
// LINE CLASSIFICATION
// =============================================================================

/// A classified sequence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SeqLine<'a> {
    Header,
    Participant { actor: bool, id: &'a str, alias: Option<&'a str> },
    Message(Message<'a>),
    BlockStart(&'a str),
    BlockSection,
    End,
    /// Notes, activations, `autonumber`, `title`.
    Ignored,
    Unknown,
}

const BLOCK_KEYWORDS: &[&str] = &["loop", "rect", "opt", "alt", "par", "critical", "break"];
const SECTION_KEYWORDS: &[&str] = &["else", "and", "option"];
const IGNORED_KEYWORDS: &[&str] = &["note", "activate", "deactivate", "autonumber", "title"];

/// Classify one trimmed line.
pub(crate) fn classify(line: &str) -> SeqLine<'_> {
    if line.eq_ignore_ascii_case("sequencediagram") {
        return SeqLine::Header;
    }
    for (keyword, actor) in [("participant", false), ("actor", true)] {
        if let Some(rest) = strip_keyword(line, keyword) {
            if rest.is_empty() {
                return SeqLine::Unknown;
            }
            let (id, alias) = match split_alias(rest) {
                Some((id, alias)) => (id, Some(unquote(alias))),
                None => (rest, None),
            };
            // Message endpoints never contain whitespace, so neither may IDs.
            if id.contains(char::is_whitespace) {
                return SeqLine::Unknown;
            }
            return SeqLine::Participant { actor, id: unquote(id), alias };
        }
    }
    if IGNORED_KEYWORDS.iter().any(|kw| strip_keyword(line, kw).is_some()) {
        return SeqLine::Ignored;
    }
    if let Some(keyword) = BLOCK_KEYWORDS.iter().find(|kw| strip_keyword(line, kw).is_some()) {
        return SeqLine::BlockStart(*keyword);
    }
    if SECTION_KEYWORDS.iter().any(|kw| strip_keyword(line, kw).is_some()) {
        return SeqLine::BlockSection;
    }
    if line.eq_ignore_ascii_case("end") {
        return SeqLine::End;
    }
    match parse_message(line) {
        Some(message) => SeqLine::Message(message),
        None => SeqLine::Unknown,
    }
}

/// Split `id as alias` on the first ` as ` (case-insensitive).
fn split_alias(rest: &str) -> Option<(&str, &str)> {
    let lower = rest.to_ascii_lowercase();
    let idx = lower.find(" as ")?;
    let (id, alias) = (rest[..idx].trim(), rest[idx + 4..].trim());
    if id.is_empty() || alias.is_empty() {
        return None;
    }
    Some((id, alias))
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse sequence text into a [`Diagram`] of kind `Sequence`.
///
/// # Errors
///
/// `MissingHeader` when no `sequenceDiagram` line was seen, `NoParticipants`
/// when nothing declared or mentioned a participant, `TooManyNodes` above
/// [`MAX_NODES`]; in strict mode `InvalidSyntax` for unrecognized lines.
pub fn parse_sequence(text: &str, mode: ParseMode) -> Result<Diagram, DiagramError> {
    let mut diagram = Diagram::new(DiagramKind::Sequence);
    let mut found_header = false;
    let mut blocks: Vec<&str> = Vec::new();

    for (line_no, line) in significant_lines(text) {
        match classify(line) {
            SeqLine::Header => found_header = true,
            SeqLine::Participant { actor, id, alias } => {
                register_participant(&mut diagram, id, alias.unwrap_or(id), actor);
            }
            SeqLine::Message(message) => {
                ensure_participant(&mut diagram, message.from);
                ensure_participant(&mut diagram, message.to);
                let (style, end_cap) = message.kind.style();
                let mut edge = Edge::new(format!("msg_{}", diagram.edges.len()), message.from, message.to);
                edge.label = message.text.to_owned();
                edge.style = style;
                edge.end_cap = end_cap;
                edge.activation = message.activation;
                diagram.add_edge(edge);
            }
            SeqLine::BlockStart(keyword) => blocks.push(keyword),
            SeqLine::BlockSection | SeqLine::Ignored => {}
            SeqLine::End => {
                if blocks.pop().is_none() {
                    debug!(line = line_no, "unmatched end ignored");
                }
            }
            SeqLine::Unknown if mode == ParseMode::Strict => {
                return Err(DiagramError::invalid_syntax(line_no, line, "not a participant, message or block"));
            }
            SeqLine::Unknown => debug!(line = line_no, line_text = line, "unrecognized sequence line skipped"),
        }
    }

    if !found_header {
        return Err(DiagramError::missing_sequence_header());
    }
    let count = diagram.nodes.len();
    if count == 0 {
        return Err(DiagramError::no_participants());
    }
    if count > MAX_NODES {
        return Err(DiagramError::too_many_nodes(count, MAX_NODES));
    }
    if !blocks.is_empty() {
        debug!(open = blocks.len(), "unclosed blocks at end of input");
    }
    debug!(participants = count, messages = diagram.edges.len(), "sequence parsed");
    Ok(diagram)
}

/// Declare a participant; a later declaration of a known ID is ignored.
fn register_participant(diagram: &mut Diagram, id: &str, label: &str, actor: bool) {
    let shape = if actor { NodeShape::Circle } else { NodeShape::Rectangle };
    if !diagram.add_node(Node::new(id, label, shape)) {
        debug!(participant = id, "participant already declared");
    }
}

/// Create a participant on first mention in a message.
fn ensure_participant(diagram: &mut Diagram, id: &str) {
    if !diagram.nodes.contains_key(id) {
        diagram.add_node(Node::new(id, id, NodeShape::Rectangle));
    }
}

#[cfg(test)]
#[path = "sequence_test.rs"]
mod tests;
