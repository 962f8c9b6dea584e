//! Diagram text to positioned board primitives.
//!
//! This crate takes Mermaid-style diagram text (flowcharts and sequence
//! diagrams) and turns it into shapes, connectors, and frames with absolute
//! coordinates, ready to be dropped onto a whiteboard. The pipeline is
//! strictly one-way: [`validate()`] rejects hostile input, [`parse()`] builds
//! the [`ir::Diagram`], [`layout()`] assigns geometry, and
//! [`convert::convert`] emits the [`Output`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Size, line, and header checks on raw text |
//! | [`parse`] | Flowchart and sequence grammars producing the IR |
//! | [`ir`] | Dialect-neutral nodes, edges, and subgraphs |
//! | [`layout`] | Layered flowchart layout and sequence column layout |
//! | [`convert`] | Shapes, connectors, and frames for the board |
//! | [`config`] | Layout parameters with environment overrides |
//! | [`error`] | Error kinds, codes, and suggestions |

pub mod config;
pub mod convert;
pub mod error;
pub mod ir;
pub mod layout;
pub mod parse;
pub mod validate;

pub use config::LayoutConfig;
pub use convert::{ConvertOptions, Output};
pub use error::{DiagramError, ErrorKind};
pub use layout::{LaidOut, layout};
pub use parse::{ParseMode, parse, parse_with};
pub use validate::validate;

/// Run the full pipeline in tolerant mode.
///
/// # Errors
///
/// Returns the first validation or parse error. Layout and conversion
/// never fail.
pub fn render(text: &str, config: &LayoutConfig, options: &ConvertOptions) -> Result<Output, DiagramError> {
    render_with_mode(text, ParseMode::Tolerant, config, options)
}

/// Run the full pipeline with an explicit [`ParseMode`].
///
/// # Errors
///
/// Returns the first validation or parse error.
pub fn render_with_mode(
    text: &str,
    mode: ParseMode,
    config: &LayoutConfig,
    options: &ConvertOptions,
) -> Result<Output, DiagramError> {
    validate(text)?;
    let diagram = parse_with(text, mode)?;
    tracing::debug!(
        kind = ?diagram.kind,
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        subgraphs = diagram.subgraphs.len(),
        "diagram parsed"
    );
    let laid = layout(diagram, config);
    Ok(convert::convert(&laid, options))
}
