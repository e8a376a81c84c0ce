//! Scene-graph types produced by composition and consumed by the renderer.
//!
//! Composition turns channels, layout and styles into plain geometry: per-row
//! polyline segments in data coordinates, baseline runs, and annotation
//! records. The renderer never looks at channel buffers again.

use crate::{ChannelStyle, MarkerStyle};

/// Shared vertical range, identical for every row of a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YLimits {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// One uninterrupted polyline in data coordinates.
///
/// A trace splits into segments wherever the channel is absent; each segment
/// draws as its own outline and its own filled area against the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSegment {
    /// `(t, value)` vertices in grid order.
    pub points: Vec<(f64, f64)>,
}

/// All segments of one overlay variant of one channel, with its style.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTrace {
    /// Channel the trace came from.
    pub channel: String,
    /// Uninterrupted runs of present samples.
    pub segments: Vec<TraceSegment>,
    /// Cosmetics the trace draws with.
    pub style: ChannelStyle,
}

/// One visual row (subplot) of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct RowScene {
    /// The layout key, drawn as the row label.
    pub label: String,
    /// Traces in draw order (sorted by z-order at composition).
    pub traces: Vec<RowTrace>,
    /// Baseline runs at y = 0, already projected and dilated.
    pub baseline: Vec<TraceSegment>,
}

/// A caller-added decoration, resolved to row indices at insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Vertical marker at time `t` spanning the given rows.
    VLine {
        /// Indices of the rows the line spans.
        rows: Vec<usize>,
        /// Time coordinate of the line.
        t: f64,
        /// Line cosmetics.
        style: MarkerStyle,
    },
    /// Text anchored at a point of one row.
    Label {
        /// Row index.
        row: usize,
        /// Time coordinate of the anchor.
        t: f64,
        /// Value coordinate of the anchor.
        y: f64,
        /// The text.
        text: String,
    },
    /// Double-headed arrow between two time points, with an optional centered
    /// label (an echo-time bracket, for instance).
    Interval {
        /// Row index.
        row: usize,
        /// Start and end time of the interval.
        span: (f64, f64),
        /// Value coordinate the arrow is drawn at.
        y: f64,
        /// Optional label centered above the arrow.
        text: Option<String>,
    },
}

/// Which rows a vertical marker spans.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSelection {
    /// Every row of the diagram.
    All,
    /// Rows picked by their layout labels.
    Labels(Vec<String>),
}

impl RowSelection {
    /// Select rows by label.
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RowSelection::Labels(labels.into_iter().map(Into::into).collect())
    }
}
