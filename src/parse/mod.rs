//! Parser — turns validated diagram text into the [`Diagram`] IR.
//!
//! DESIGN
//! ======
//! Dialect detection looks only at the first significant line: a
//! case-insensitive `sequenceDiagram` selects the sequence grammar, anything
//! else goes to the flowchart grammar. Both grammars are line-oriented:
//! each line is classified, then handled. In [`ParseMode::Tolerant`] lines
//! that classify as nothing are skipped with a `debug!` trace; in
//! [`ParseMode::Strict`] they are errors carrying the line number.

pub mod flowchart;
pub(crate) mod lexer;
pub mod sequence;

use crate::error::DiagramError;
use crate::ir::Diagram;
use crate::validate::first_significant_line;

/// How unrecognized lines are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Skip lines that match no rule.
    #[default]
    Tolerant,
    /// Reject the first line that matches no rule.
    Strict,
}

/// Parse text in tolerant mode, picking the grammar from the header.
///
/// # Errors
///
/// Returns the grammar's structural errors (`NoNodes`, `NoParticipants`,
/// `MissingHeader`, `TooManyNodes`).
pub fn parse(text: &str) -> Result<Diagram, DiagramError> {
    parse_with(text, ParseMode::Tolerant)
}

/// Parse text with an explicit [`ParseMode`].
///
/// # Errors
///
/// As [`parse`], plus `InvalidSyntax`, `InvalidShape` and `InvalidEdge` in
/// strict mode.
pub fn parse_with(text: &str, mode: ParseMode) -> Result<Diagram, DiagramError> {
    if is_sequence(text) {
        sequence::parse_sequence(text, mode)
    } else {
        flowchart::parse_flowchart(text, mode)
    }
}

/// The first significant line is a `sequenceDiagram` header.
#[must_use]
pub fn is_sequence(text: &str) -> bool {
    first_significant_line(text).is_some_and(|line| line.eq_ignore_ascii_case("sequencediagram"))
}

/// Trimmed, non-blank, non-comment lines with 1-based line numbers.
pub(crate) fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("%%"))
}

/// Strip a keyword prefix (case-insensitive) and return the trimmed rest.
///
/// The keyword must be followed by whitespace or end of line.
pub(crate) fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
