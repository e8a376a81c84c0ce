//! Composition of channels into a renderable diagram.
//!
//! [`Layout`] maps display rows to channels; [`Diagram::compose`] resolves it
//! against a [`ChannelStore`], computes the shared vertical scale, projects
//! each row's baseline, and returns the scene graph. The caller may then add
//! annotations and hand the diagram to the renderer.

use crate::plotting::core::{
    Annotation, RowScene, RowSelection, RowTrace, TraceSegment, YLimits,
};
use crate::plotting::projection::baseline_visibility;
use crate::{
    ChannelStore, MarkerStyle, SeqPlotError, SeqPlotResult, StyleSheet, TimeGrid, Waveform,
};

/// Ordered mapping from display-row label to the channels drawn on that row.
///
/// Rows may aggregate several channels; each is drawn independently atop the
/// shared row, nothing combines their values.
///
/// # Examples
///
/// ```rust
/// use seqplot::Layout;
///
/// let layout = Layout::new()
///     .row("RF/ADC", ["RF", "ADC"])
///     .row("Phase\nEncoding", ["Phase"])
///     .row("Frequency\nEncoding", ["Frequency"]);
/// assert_eq!(layout.rows().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Layout {
    rows: Vec<(String, Vec<String>)>,
}

impl Layout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row mapping `label` to one or more channel names.
    pub fn row<I, S>(mut self, label: impl Into<String>, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push((
            label.into(),
            channels.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// The rows in display order.
    pub fn rows(&self) -> &[(String, Vec<String>)] {
        &self.rows
    }
}

/// The composed, renderable diagram: scene rows plus shared scales.
///
/// Opaque to the rendering backend until [`Diagram::render_to_file`] or
/// [`Diagram::render_on`](crate::plotting::render) is called; annotations can
/// be added in between.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(crate) rows: Vec<RowScene>,
    pub(crate) y_limits: YLimits,
    pub(crate) time_range: (f64, f64),
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) style: StyleSheet,
}

impl Diagram {
    /// Resolve `layout` against `store` and build the scene graph.
    ///
    /// Fails on an empty layout, a row without channels, an unknown channel
    /// name, or channels built from different time grids. Overlapping events
    /// have already been summed at accumulation time; composition is pure
    /// projection.
    pub fn compose(
        layout: &Layout,
        store: &ChannelStore,
        style: StyleSheet,
    ) -> SeqPlotResult<Self> {
        if layout.rows().is_empty() {
            return Err(SeqPlotError::EmptyLayout);
        }
        for (label, channels) in layout.rows() {
            if channels.is_empty() {
                return Err(SeqPlotError::EmptyRow(label.clone()));
            }
        }

        // Resolve every referenced channel up front so lookup failures abort
        // before any geometry is built.
        let mut resolved: Vec<(&str, Vec<&crate::Channel>)> = Vec::new();
        for (label, names) in layout.rows() {
            let mut row_channels = Vec::new();
            for name in names {
                let channel = store.get(name)?;
                if !TimeGrid::same_grid(store.grid(), channel.grid()) {
                    return Err(SeqPlotError::GridMismatch {
                        channel: name.clone(),
                    });
                }
                row_channels.push(channel);
            }
            resolved.push((label.as_str(), row_channels));
        }

        let y_limits = shared_y_limits(
            resolved.iter().flat_map(|(_, chs)| chs.iter().map(|c| c.waveform())),
            style.diagram.padding_factor,
        );

        let t = store.grid().points();
        let time_range = (store.grid().start(), store.grid().stop());

        let mut rows = Vec::with_capacity(resolved.len());
        for (label, channels) in resolved {
            let mut traces = Vec::new();
            for channel in &channels {
                let ch_style = style.channel_style(channel.name());
                let w = channel.waveform();
                for k in 0..w.variants() {
                    let segments = present_runs(w, k)
                        .into_iter()
                        .map(|run| TraceSegment {
                            points: run
                                .into_iter()
                                .map(|i| (t[i], w.values()[[i, k]]))
                                .collect(),
                        })
                        .collect();
                    traces.push(RowTrace {
                        channel: channel.name().to_string(),
                        segments,
                        style: ch_style,
                    });
                }
            }
            traces.sort_by_key(|trace| trace.style.z_order);

            let waveforms: Vec<&Waveform> = channels.iter().map(|c| c.waveform()).collect();
            let baseline = if style.diagram.time_axis_on_top {
                vec![TraceSegment {
                    points: t.iter().map(|&ti| (ti, 0.0)).collect(),
                }]
            } else {
                visibility_runs(&baseline_visibility(&waveforms))
                    .into_iter()
                    .map(|run| TraceSegment {
                        points: run.into_iter().map(|i| (t[i], 0.0)).collect(),
                    })
                    .collect()
            };

            rows.push(RowScene {
                label: label.to_string(),
                traces,
                baseline,
            });
        }

        tracing::debug!(
            rows = rows.len(),
            y_min = y_limits.min,
            y_max = y_limits.max,
            "composed diagram"
        );

        Ok(Self {
            rows,
            y_limits,
            time_range,
            annotations: Vec::new(),
            style,
        })
    }

    /// The shared vertical range every row renders with.
    pub fn y_limits(&self) -> (f64, f64) {
        (self.y_limits.min, self.y_limits.max)
    }

    /// The time span of the shared axis.
    pub fn time_range(&self) -> (f64, f64) {
        self.time_range
    }

    /// Row labels in display order.
    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Add a vertical marker at time `t` spanning the selected rows.
    ///
    /// Fails when a selected label is not a row of this diagram.
    pub fn add_vline(
        &mut self,
        rows: RowSelection,
        t: f64,
        style: MarkerStyle,
    ) -> SeqPlotResult<&mut Self> {
        let rows = self.resolve_rows(rows)?;
        self.annotations.push(Annotation::VLine { rows, t, style });
        Ok(self)
    }

    /// Add a text label anchored at `(t, y)` on the given row.
    pub fn add_label(
        &mut self,
        row: &str,
        t: f64,
        y: f64,
        text: impl Into<String>,
    ) -> SeqPlotResult<&mut Self> {
        let row = self.row_index(row)?;
        self.annotations.push(Annotation::Label {
            row,
            t,
            y,
            text: text.into(),
        });
        Ok(self)
    }

    /// Add a double-headed interval arrow between `span.0` and `span.1` at
    /// height `y`, with an optional centered label.
    pub fn add_interval(
        &mut self,
        row: &str,
        span: (f64, f64),
        y: f64,
        text: Option<&str>,
    ) -> SeqPlotResult<&mut Self> {
        let row = self.row_index(row)?;
        self.annotations.push(Annotation::Interval {
            row,
            span,
            y,
            text: text.map(str::to_string),
        });
        Ok(self)
    }

    fn row_index(&self, label: &str) -> SeqPlotResult<usize> {
        self.rows
            .iter()
            .position(|r| r.label == label)
            .ok_or_else(|| SeqPlotError::UnknownRow(label.to_string()))
    }

    fn resolve_rows(&self, selection: RowSelection) -> SeqPlotResult<Vec<usize>> {
        match selection {
            RowSelection::All => Ok((0..self.rows.len()).collect()),
            RowSelection::Labels(labels) => {
                labels.iter().map(|l| self.row_index(l)).collect()
            }
        }
    }
}

/// Shared y-limits: padding factor times the global extrema over every present
/// sample, with zero always inside the range.
fn shared_y_limits<'a>(
    waveforms: impl Iterator<Item = &'a Waveform>,
    padding_factor: f64,
) -> YLimits {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for w in waveforms {
        if let Some((lo, hi)) = w.present_min_max() {
            min = min.min(padding_factor * lo);
            max = max.max(padding_factor * hi);
        }
    }
    if min == max {
        // Every channel silent (or flat at zero); give the rows some height.
        min -= 1.0;
        max += 1.0;
    }
    YLimits { min, max }
}

/// Index runs of consecutive present samples of one overlay variant.
fn present_runs(w: &Waveform, k: usize) -> Vec<Vec<usize>> {
    index_runs((0..w.len()).map(|i| w.present()[[i, k]]))
}

/// Index runs of consecutive visible baseline samples.
fn visibility_runs(visible: &ndarray::Array1<bool>) -> Vec<Vec<usize>> {
    index_runs(visible.iter().copied())
}

fn index_runs(flags: impl Iterator<Item = bool>) -> Vec<Vec<usize>> {
    let mut runs = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for (i, flag) in flags.enumerate() {
        if flag {
            current.push(i);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
