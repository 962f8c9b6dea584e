//! Layout configuration — node sizes, spacing, origin, frame padding.
//!
//! Defaults reproduce the board's standard diagram look. A host can override
//! any subset through a partial JSON object (`#[serde(default)]`) or through
//! `DIAGRAM_*` environment variables via [`LayoutConfig::from_env`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 70.0;
pub const DEFAULT_NODE_SPACING_X: f64 = 80.0;
pub const DEFAULT_NODE_SPACING_Y: f64 = 120.0;
pub const DEFAULT_PADDING: f64 = 40.0;

/// Geometry knobs for the layout stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between siblings within a layer.
    pub node_spacing_x: f64,
    /// Gap between consecutive layers.
    pub node_spacing_y: f64,
    pub start_x: f64,
    pub start_y: f64,
    /// Frame padding around subgraph members.
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            node_spacing_x: DEFAULT_NODE_SPACING_X,
            node_spacing_y: DEFAULT_NODE_SPACING_Y,
            start_x: 0.0,
            start_y: 0.0,
            padding: DEFAULT_PADDING,
        }
    }
}

impl LayoutConfig {
    /// Defaults overridden by any set `DIAGRAM_*` variable.
    ///
    /// Unparsable, non-finite, or out-of-range values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).unwrap_or_default())
    }

    /// Like [`from_env`](Self::from_env), reading values through `lookup`.
    ///
    /// `lookup` returns an empty string for unset keys.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> String) -> Self {
        let d = Self::default();
        let read = |key: &str, default: f64| parse_number(&lookup(key)).unwrap_or(default);
        Self {
            node_width: read("DIAGRAM_NODE_WIDTH", d.node_width),
            node_height: read("DIAGRAM_NODE_HEIGHT", d.node_height),
            node_spacing_x: read("DIAGRAM_NODE_SPACING_X", d.node_spacing_x),
            node_spacing_y: read("DIAGRAM_NODE_SPACING_Y", d.node_spacing_y),
            start_x: read("DIAGRAM_START_X", d.start_x),
            start_y: read("DIAGRAM_START_Y", d.start_y),
            padding: read("DIAGRAM_PADDING", d.padding),
        }
        .normalized()
    }

    /// Same config with the origin moved to `(x, y)`.
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self.normalized()
    }

    /// Replace values layout cannot use with defaults.
    ///
    /// Node sizes must be positive; spacing and padding non-negative; every
    /// value finite.
    #[must_use]
    pub fn normalized(self) -> Self {
        let d = Self::default();
        let positive = |v: f64, default: f64| if v.is_finite() && v > 0.0 { v } else { default };
        let non_negative = |v: f64, default: f64| if v.is_finite() && v >= 0.0 { v } else { default };
        let finite = |v: f64, default: f64| if v.is_finite() { v } else { default };
        Self {
            node_width: positive(self.node_width, d.node_width),
            node_height: positive(self.node_height, d.node_height),
            node_spacing_x: non_negative(self.node_spacing_x, d.node_spacing_x),
            node_spacing_y: non_negative(self.node_spacing_y, d.node_spacing_y),
            start_x: finite(self.start_x, d.start_x),
            start_y: finite(self.start_y, d.start_y),
            padding: non_negative(self.padding, d.padding),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
