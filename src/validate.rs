//! Input validator — size, line, and header gates applied before parsing.
//!
//! Runs before any grammar work so adversarial input cannot drive the line
//! scanners into pathological cost. Pure and total: every input yields either
//! `Ok(())` or one of the size/header [`ErrorKind`](crate::error::ErrorKind)s.

use crate::error::{DiagramError, MAX_INPUT_BYTES, MAX_LINE_LENGTH, MAX_LINES};

/// Check raw diagram text against the input limits and header rules.
///
/// # Errors
///
/// - `InputTooLarge` when the text exceeds [`MAX_INPUT_BYTES`].
/// - `EmptyDiagram` for empty or whitespace-only text.
/// - `TooManyLines` when the trimmed text has more than [`MAX_LINES`] lines.
/// - `LineTooLong` (with line number) for any line over [`MAX_LINE_LENGTH`] chars.
/// - `MissingHeader` when the first significant line is not a dialect header.
pub fn validate(text: &str) -> Result<(), DiagramError> {
    if text.len() > MAX_INPUT_BYTES {
        return Err(DiagramError::input_too_large(text.len()));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DiagramError::empty_diagram());
    }

    let line_count = trimmed.lines().count();
    if line_count > MAX_LINES {
        return Err(DiagramError::too_many_lines(line_count));
    }

    for (idx, line) in trimmed.lines().enumerate() {
        let len = line.chars().count();
        if len > MAX_LINE_LENGTH {
            return Err(DiagramError::line_too_long(idx + 1, len));
        }
    }

    match first_significant_line(trimmed) {
        Some(line) if is_header(line) => Ok(()),
        Some(_) => Err(DiagramError::missing_header(trimmed)),
        // Only comments: nothing to parse, but no header mistake either.
        None => Ok(()),
    }
}

/// First line that is neither blank nor a `%%` comment, trimmed.
pub(crate) fn first_significant_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("%%"))
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("flowchart") || lower.starts_with("graph") || lower == "sequencediagram"
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
