//! Flowchart statement lexer — arrow chains and node references.
//!
//! A statement like `A[Start] -->|go| B & C -.-> D` is split, outside any
//! brackets or quotes, into node groups joined by links. Arrow-looking text
//! inside a label (`A[a --> b]`) never splits the statement.

use crate::ir::{ArrowCap, EdgeStyle, NodeShape};

// =============================================================================
// TYPES
// =============================================================================

/// Arrow operator between two node groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Link {
    pub style: EdgeStyle,
    pub start_cap: ArrowCap,
    pub end_cap: ArrowCap,
    /// From `-->|label|` or `-- label -->`.
    pub label: Option<String>,
}

impl Link {
    fn new(style: EdgeStyle, end_cap: ArrowCap) -> Self {
        Self { style, start_cap: ArrowCap::None, end_cap, label: None }
    }
}

/// A statement split into `groups.len() - 1` links.
///
/// Each group is one or more `&`-joined node reference texts, untrimmed of
/// nothing but surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chain<'a> {
    pub groups: Vec<Vec<&'a str>>,
    pub links: Vec<Link>,
}

/// A node reference: `id`, `id[label]`, `id((label))`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeRef {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

/// Why a text is not a node reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeRefError {
    /// No identifier at the start.
    NotANode,
    /// Identifier followed by an unknown or empty delimiter.
    UnknownShape,
}

// =============================================================================
// CHAIN SPLITTING
// =============================================================================

/// Split a statement on arrow operators and `&` separators.
pub(crate) fn split_chain(line: &str) -> Chain<'_> {
    let bytes = line.as_bytes();
    let mut groups = Vec::new();
    let mut group = Vec::new();
    let mut links = Vec::new();
    let mut seg_start = 0;
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if in_quote {
            if c == b'"' {
                in_quote = false;
            }
            i += 1;
            continue;
        }
        match c {
            b'"' => in_quote = true,
            b'[' | b'(' | b'{' => depth += 1,
            // Flag opener `id>label]`.
            b'>' if depth == 0 && i > 0 && is_id_byte(bytes[i - 1]) => depth += 1,
            b']' | b')' | b'}' => depth = depth.saturating_sub(1),
            b'&' if depth == 0 => {
                group.push(line[seg_start..i].trim());
                i += 1;
                seg_start = i;
                continue;
            }
            b'-' | b'=' if depth == 0 => {
                if let Some((mut link, consumed)) = match_arrow(&line[i..]) {
                    group.push(line[seg_start..i].trim());
                    groups.push(std::mem::take(&mut group));
                    i += consumed;
                    if let Some((label, used)) = pipe_label(&line[i..]) {
                        link.label = Some(label);
                        i += used;
                    }
                    links.push(link);
                    seg_start = i;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    group.push(line[seg_start..].trim());
    groups.push(group);
    Chain { groups, links }
}

/// `|label|` right after an arrow, allowing leading whitespace.
fn pipe_label(rest: &str) -> Option<(String, usize)> {
    let trimmed = rest.trim_start();
    let lead = rest.len() - trimmed.len();
    let body = trimmed.strip_prefix('|')?;
    let close = body.find('|')?;
    Some((body[..close].trim().to_owned(), lead + 1 + close + 1))
}

/// Match an arrow (plain or inline-label form) at the start of `s`.
fn match_arrow(s: &str) -> Option<(Link, usize)> {
    if let Some(found) = match_plain_arrow(s) {
        return Some(found);
    }
    match_label_arrow(s)
}

/// `-->`, `---`, `--o`, `--x`, `-.->`, `-.-`, `==>`, `===`, with longer runs.
fn match_plain_arrow(s: &str) -> Option<(Link, usize)> {
    let bytes = s.as_bytes();
    match bytes.first()? {
        b'-' if bytes.get(1) == Some(&b'.') => {
            let mut j = 1;
            while bytes.get(j) == Some(&b'.') {
                j += 1;
            }
            if bytes.get(j) != Some(&b'-') {
                return None;
            }
            j += 1;
            if bytes.get(j) == Some(&b'>') {
                return Some((Link::new(EdgeStyle::Dotted, ArrowCap::Arrow), j + 1));
            }
            Some((Link::new(EdgeStyle::Dotted, ArrowCap::None), j))
        }
        b'-' => {
            let run = run_length(bytes, b'-');
            if run < 2 {
                return None;
            }
            match bytes.get(run) {
                Some(b'>') => Some((Link::new(EdgeStyle::Solid, ArrowCap::Arrow), run + 1)),
                Some(b'o') if ends_token(bytes, run + 1) => {
                    Some((Link::new(EdgeStyle::Solid, ArrowCap::FilledCircle), run + 1))
                }
                Some(b'x') if ends_token(bytes, run + 1) => {
                    Some((Link::new(EdgeStyle::Solid, ArrowCap::DiamondCross), run + 1))
                }
                _ if run >= 3 => Some((Link::new(EdgeStyle::Solid, ArrowCap::None), run)),
                _ => None,
            }
        }
        b'=' => {
            let run = run_length(bytes, b'=');
            if run < 2 {
                return None;
            }
            match bytes.get(run) {
                Some(b'>') => Some((Link::new(EdgeStyle::Thick, ArrowCap::Arrow), run + 1)),
                _ if run >= 3 => Some((Link::new(EdgeStyle::Thick, ArrowCap::None), run)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `-- text -->`, `== text ==>`, `-. text .->`.
fn match_label_arrow(s: &str) -> Option<(Link, usize)> {
    let opener = if s.starts_with("-.") {
        "-."
    } else if s.starts_with("--") {
        "--"
    } else if s.starts_with("==") {
        "=="
    } else {
        return None;
    };
    let after = &s[opener.len()..];
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    for (offset, c) in after.char_indices() {
        let closing = match (opener, c) {
            ("-.", '.') => match_dotted_close(&after[offset..]),
            ("--", '-') => match_plain_arrow(&after[offset..]).filter(|(l, _)| l.style == EdgeStyle::Solid),
            ("==", '=') => match_plain_arrow(&after[offset..]).filter(|(l, _)| l.style == EdgeStyle::Thick),
            _ => None,
        };
        if let Some((mut link, used)) = closing {
            let label = after[..offset].trim();
            if label.is_empty() {
                return None;
            }
            link.label = Some(label.to_owned());
            return Some((link, opener.len() + offset + used));
        }
    }
    None
}

/// `.->` or `.-` closing a dotted inline label.
fn match_dotted_close(s: &str) -> Option<(Link, usize)> {
    let bytes = s.as_bytes();
    let dots = run_length(bytes, b'.');
    if dots == 0 || bytes.get(dots) != Some(&b'-') {
        return None;
    }
    if bytes.get(dots + 1) == Some(&b'>') {
        return Some((Link::new(EdgeStyle::Dotted, ArrowCap::Arrow), dots + 2));
    }
    Some((Link::new(EdgeStyle::Dotted, ArrowCap::None), dots + 1))
}

fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn run_length(bytes: &[u8], c: u8) -> usize {
    bytes.iter().take_while(|b| **b == c).count()
}

/// Position `at` is end of input or whitespace.
fn ends_token(bytes: &[u8], at: usize) -> bool {
    bytes.get(at).map_or(true, u8::is_ascii_whitespace)
}

// =============================================================================
// NODE REFERENCES
// =============================================================================

/// Shape delimiters, longest openers first so `((` wins over `(`.
const DELIMITERS: &[(&str, &str, NodeShape)] = &[
    ("((", "))", NodeShape::Circle),
    ("{{", "}}", NodeShape::Hexagon),
    ("([", "])", NodeShape::Stadium),
    ("[(", ")]", NodeShape::Cylinder),
    ("[/", "/]", NodeShape::Parallelogram),
    ("[\\", "\\]", NodeShape::Trapezoid),
    ("[/", "\\]", NodeShape::Trapezoid),
    ("[\\", "/]", NodeShape::Parallelogram),
    ("{", "}", NodeShape::Diamond),
    ("(", ")", NodeShape::Stadium),
    (">", "]", NodeShape::Parallelogram),
    ("[", "]", NodeShape::Rectangle),
];

/// Parse `id` optionally followed by a shape delimiter wrapping a label.
///
/// A bare identifier is a rectangle labelled with its own ID.
pub(crate) fn parse_node_ref(text: &str) -> Result<NodeRef, NodeRefError> {
    let text = text.trim();
    let id_len = text
        .bytes()
        .take_while(|b| is_id_byte(*b))
        .count();
    if id_len == 0 {
        return Err(NodeRefError::NotANode);
    }
    let (id, rest) = text.split_at(id_len);

    if rest.is_empty() {
        return Ok(NodeRef { id: id.to_owned(), label: id.to_owned(), shape: NodeShape::Rectangle });
    }

    for (open, close, shape) in DELIMITERS {
        if rest.len() < open.len() + close.len() || !rest.starts_with(open) || !rest.ends_with(close) {
            continue;
        }
        let label = unquote(&rest[open.len()..rest.len() - close.len()]);
        if label.is_empty() {
            return Err(NodeRefError::UnknownShape);
        }
        return Ok(NodeRef { id: id.to_owned(), label: label.to_owned(), shape: *shape });
    }

    Err(NodeRefError::UnknownShape)
}

/// Trim and strip one pair of matching `"` or `'` quotes.
pub(crate) fn unquote(text: &str) -> &str {
    let text = text.trim();
    for q in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(q) && text.ends_with(q) {
            return text[1..text.len() - 1].trim();
        }
    }
    text
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
