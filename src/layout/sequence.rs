//! Sequence layout — participant columns and message rows.
//!
//! Participants sit left to right in `order`, one column every
//! [`PARTICIPANT_SPACING`]; actors are drawn as squares centered in their
//! column. Message `i` gets the timeline offset
//! `start_y + TOP_MARGIN + PARTICIPANT_HEIGHT + MESSAGE_GAP + i * MESSAGE_SPACING`.

use indexmap::IndexMap;
use tracing::debug;

use super::LaidOut;
use crate::config::LayoutConfig;
use crate::ir::{Diagram, NodeShape, Rect};

pub const PARTICIPANT_WIDTH: f64 = 120.0;
pub const PARTICIPANT_HEIGHT: f64 = 50.0;
pub const ACTOR_SIZE: f64 = 50.0;
pub const PARTICIPANT_SPACING: f64 = 180.0;
pub const MESSAGE_SPACING: f64 = 60.0;
/// Distance from the origin down to the participant row.
pub const TOP_MARGIN: f64 = 50.0;
/// Space between the participant row and the first message.
pub const MESSAGE_GAP: f64 = 30.0;
/// Height below the participants when there are no messages.
const EMPTY_TIMELINE: f64 = 50.0;

/// Place participants and messages; bounds cover the last column and row.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn layout_sequence(mut diagram: Diagram, config: &LayoutConfig) -> LaidOut {
    let top = config.start_y + TOP_MARGIN;

    for node in diagram.nodes.values_mut() {
        let column_x = config.start_x + node.order as f64 * PARTICIPANT_SPACING;
        node.rect = if node.shape == NodeShape::Circle {
            Rect::new(column_x + (PARTICIPANT_WIDTH - ACTOR_SIZE) / 2.0, top, ACTOR_SIZE, ACTOR_SIZE)
        } else {
            Rect::new(column_x, top, PARTICIPANT_WIDTH, PARTICIPANT_HEIGHT)
        };
    }

    let first_row = top + PARTICIPANT_HEIGHT + MESSAGE_GAP;
    for (i, edge) in diagram.edges.iter_mut().enumerate() {
        edge.timeline_y = first_row + i as f64 * MESSAGE_SPACING;
    }

    let columns = diagram.nodes.len();
    diagram.width = if columns == 0 {
        0.0
    } else {
        (columns - 1) as f64 * PARTICIPANT_SPACING + PARTICIPANT_WIDTH
    };
    diagram.height = match diagram.edges.last() {
        Some(last) => last.timeline_y - config.start_y + MESSAGE_SPACING,
        None => TOP_MARGIN + PARTICIPANT_HEIGHT + EMPTY_TIMELINE,
    };

    debug!(
        participants = columns,
        messages = diagram.edges.len(),
        width = diagram.width,
        height = diagram.height,
        "sequence laid out"
    );
    LaidOut::new(diagram, IndexMap::new(), config)
}

#[cfg(test)]
#[path = "sequence_test.rs"]
mod tests;
