//! Diagram errors — structured, value-level failures with fix suggestions.
//!
//! DESIGN
//! ======
//! Every failure the pipeline can report is a [`DiagramError`] value: a stable
//! machine code ([`ErrorKind::code`]), a human message, an optional 1-based
//! line number, a truncated snippet of the offending input, and a suggestion
//! the caller (usually an LLM agent) can act on. Validation and parsing are
//! the only stages that fail; layout and conversion drop dangling references
//! silently.

use std::fmt;

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum accepted input size in bytes.
pub const MAX_INPUT_BYTES: usize = 50 * 1024;

/// Maximum number of lines in a diagram.
pub const MAX_LINES: usize = 500;

/// Maximum length of a single line, in characters.
pub const MAX_LINE_LENGTH: usize = 2000;

/// Maximum number of nodes (or participants) a parsed diagram may hold.
pub const MAX_NODES: usize = 500;

/// Maximum number of edges a parsed flowchart may hold.
///
/// `&` groups multiply edges, so this bounds parse cost independently of
/// the line limits.
pub const MAX_EDGES: usize = 2000;

/// Snippets longer than this are truncated to `MAX_SNIPPET - 3` chars plus `...`.
const MAX_SNIPPET: usize = 50;

// =============================================================================
// KIND
// =============================================================================

/// Closed taxonomy of diagram failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyDiagram,
    MissingHeader,
    NoNodes,
    NoParticipants,
    InvalidSyntax,
    InvalidShape,
    InvalidEdge,
    TooManyNodes,
    InputTooLarge,
    TooManyLines,
    LineTooLong,
}

impl ErrorKind {
    /// Stable machine-readable code for programmatic handling.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyDiagram => "EMPTY_DIAGRAM",
            Self::MissingHeader => "MISSING_HEADER",
            Self::NoNodes => "NO_NODES",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::InvalidSyntax => "INVALID_SYNTAX",
            Self::InvalidShape => "INVALID_SHAPE",
            Self::InvalidEdge => "INVALID_EDGE",
            Self::TooManyNodes => "TOO_MANY_NODES",
            Self::InputTooLarge => "INPUT_TOO_LARGE",
            Self::TooManyLines => "TOO_MANY_LINES",
            Self::LineTooLong => "LINE_TOO_LONG",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// A diagram validation or parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", display_tail(.line, .suggestion))]
pub struct DiagramError {
    /// Failure category.
    pub kind: ErrorKind,
    /// User-facing description.
    pub message: String,
    /// Actionable fix, possibly empty.
    pub suggestion: String,
    /// 1-based line number, when the failure is tied to one line.
    pub line: Option<usize>,
    /// Offending input, truncated to at most 50 characters.
    pub input: Option<String>,
}

impl DiagramError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), suggestion: String::new(), line: None, input: None }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the offending input, truncating long snippets.
    #[must_use]
    pub fn with_input(mut self, input: &str) -> Self {
        self.input = Some(truncate_snippet(input));
        self
    }

    /// Machine-readable code of this error's kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    // -------------------------------------------------------------------------
    // Constructors for the common cases
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn empty_diagram() -> Self {
        Self::new(ErrorKind::EmptyDiagram, "diagram input is empty")
            .with_suggestion("Provide Mermaid diagram code starting with 'flowchart TB' or 'sequenceDiagram'")
    }

    /// Missing or unrecognized header on the first significant line.
    #[must_use]
    pub fn missing_header(text: &str) -> Self {
        let mut suggestion = String::from("Use 'flowchart TB', 'flowchart LR', 'graph TD', or 'sequenceDiagram'");
        if let Some(hint) = type_hint(text) {
            suggestion.push_str(". ");
            suggestion.push_str(hint);
        }
        Self::new(ErrorKind::MissingHeader, "diagram must start with a valid header").with_suggestion(suggestion)
    }

    #[must_use]
    pub fn missing_sequence_header() -> Self {
        Self::new(ErrorKind::MissingHeader, "not a sequence diagram: missing 'sequenceDiagram' header")
            .with_suggestion("Start your sequence diagram with 'sequenceDiagram' on the first line")
    }

    #[must_use]
    pub fn no_nodes() -> Self {
        Self::new(ErrorKind::NoNodes, "no nodes found in diagram").with_suggestion(
            "Add node definitions like 'A[Label]' or edges like 'A --> B'. Example: flowchart TB\\n    A[Start] --> B[End]",
        )
    }

    #[must_use]
    pub fn no_participants() -> Self {
        Self::new(ErrorKind::NoParticipants, "no participants found in sequence diagram")
            .with_suggestion("Add participants using 'participant A' or messages like 'A->>B: Hello'")
    }

    #[must_use]
    pub fn too_many_nodes(count: usize, limit: usize) -> Self {
        Self::new(ErrorKind::TooManyNodes, format!("diagram has {count} nodes, exceeding limit of {limit}"))
            .with_suggestion("Split the diagram into smaller subgraphs or reduce the number of nodes")
    }

    /// Edge expansion went past [`MAX_EDGES`]; shares the `TooManyNodes` kind.
    #[must_use]
    pub fn too_many_edges(line: usize, limit: usize) -> Self {
        Self::new(ErrorKind::TooManyNodes, format!("diagram has more than {limit} edges"))
            .with_line(line)
            .with_suggestion("Split large '&' groups or the diagram itself into smaller pieces")
    }

    #[must_use]
    pub fn input_too_large(len: usize) -> Self {
        Self::new(
            ErrorKind::InputTooLarge,
            format!("diagram input is {len} bytes, exceeding maximum size of {MAX_INPUT_BYTES} bytes"),
        )
        .with_suggestion("Reduce diagram size or split into multiple smaller diagrams")
    }

    #[must_use]
    pub fn too_many_lines(count: usize) -> Self {
        Self::new(ErrorKind::TooManyLines, format!("diagram has {count} lines, exceeding limit of {MAX_LINES}"))
            .with_suggestion("Reduce the number of lines or split into multiple diagrams")
    }

    #[must_use]
    pub fn line_too_long(line: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::LineTooLong,
            format!("line {line} has {len} characters, exceeding limit of {MAX_LINE_LENGTH}"),
        )
        .with_line(line)
        .with_suggestion("Split long labels or node names into shorter segments")
    }

    #[must_use]
    pub fn invalid_shape(line: usize, text: &str) -> Self {
        Self::new(ErrorKind::InvalidShape, format!("unrecognized node shape: {text}"))
            .with_line(line)
            .with_input(text)
            .with_suggestion(
                "Use valid shapes: [text] for rectangle, (text) for rounded, {text} for diamond, ((text)) for circle, {{text}} for hexagon",
            )
    }

    #[must_use]
    pub fn invalid_edge(line: usize, text: &str) -> Self {
        Self::new(ErrorKind::InvalidEdge, "edge is missing a source or target node")
            .with_line(line)
            .with_input(text)
            .with_suggestion("Write edges as 'A --> B'; both sides of an arrow need a node")
    }

    #[must_use]
    pub fn invalid_syntax(line: usize, text: &str, reason: &str) -> Self {
        Self::new(ErrorKind::InvalidSyntax, format!("syntax error: {reason}"))
            .with_line(line)
            .with_input(text)
            .with_suggestion("Check Mermaid syntax at https://mermaid.js.org/syntax/flowchart.html")
    }
}

// =============================================================================
// HINTS
// =============================================================================

/// Inspect raw text for tell-tale dialect mistakes.
///
/// Returns `None` when nothing suspicious is found.
#[must_use]
pub fn type_hint(text: &str) -> Option<&'static str> {
    let lower = text.trim().to_lowercase();

    if lower.contains("->") && !lower.contains("-->") {
        if lower.contains("sequencediagram") {
            return Some("Sequence diagrams use '->>': A->>B: message");
        }
        return Some("Flowcharts use '-->': A --> B");
    }

    if lower.contains("participant") && !lower.starts_with("sequencediagram") {
        return Some("Sequence diagrams must start with 'sequenceDiagram'");
    }

    if lower.contains("subgraph") && !lower.starts_with("flowchart") && !lower.starts_with("graph") {
        return Some("Flowcharts with subgraphs must start with 'flowchart TB' or 'graph TD'");
    }

    None
}

/// Renders ` (line N)` and `. suggestion` after the message, when present.
#[allow(clippy::ref_option)]
fn display_tail(line: &Option<usize>, suggestion: &str) -> String {
    let mut tail = String::new();
    if let Some(line) = line {
        tail.push_str(&format!(" (line {line})"));
    }
    if !suggestion.is_empty() {
        tail.push_str(". ");
        tail.push_str(suggestion);
    }
    tail
}

fn truncate_snippet(input: &str) -> String {
    if input.chars().count() <= MAX_SNIPPET {
        return input.to_owned();
    }
    let head: String = input.chars().take(MAX_SNIPPET - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
