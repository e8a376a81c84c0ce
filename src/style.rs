//! Cosmetic configuration for diagrams and channels.
//!
//! Styles are plain data threaded explicitly into composition; nothing here
//! mutates process-wide defaults. All records serialize, so a project can keep
//! its diagram look in a config file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An RGB color with an alpha fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Opacity, 0 transparent to 1 opaque.
    pub a: f64,
}

impl Rgba {
    /// A fully opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// An RGB color with explicit opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
}

/// How one channel's traces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStyle {
    /// Outline color.
    pub color: Rgba,
    /// Color of the filled area under the curve.
    pub fill: Rgba,
    /// Outline width in pixels.
    pub line_width: u32,
    /// Draw order within a row; higher is drawn later, on top.
    pub z_order: i32,
}

impl Default for ChannelStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            fill: Rgba::rgba(128, 128, 128, 0.2),
            line_width: 2,
            z_order: 1,
        }
    }
}

/// Diagram-wide cosmetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramStyle {
    /// Output size in pixels.
    pub figure_size: (u32, u32),
    /// Figure background.
    pub background: Rgba,
    /// Color of baselines, arrows and annotation text.
    pub axis_color: Rgba,
    /// Baseline width in pixels.
    pub axis_width: u32,
    /// Font size for row labels and annotations.
    pub font_size: u32,
    /// Whether to draw time tick labels along each row.
    pub axes_ticks: bool,
    /// Arrow head width, in y-data units.
    pub arrow_width: f64,
    /// Arrow head length, as a fraction of the time span.
    pub arrow_length: f64,
    /// Factor the global min/max sample is padded by to form the shared
    /// y-limits.
    pub padding_factor: f64,
    /// Draw the baseline across the full row instead of only where every
    /// channel is silent.
    pub time_axis_on_top: bool,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            figure_size: (1200, 900),
            background: Rgba::WHITE,
            axis_color: Rgba::BLACK,
            axis_width: 2,
            font_size: 20,
            axes_ticks: false,
            arrow_width: 0.15,
            arrow_length: 0.01,
            padding_factor: 1.1,
            time_axis_on_top: false,
        }
    }
}

/// Line cosmetics for vertical markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Rgba,
    /// Line width in pixels.
    pub width: u32,
    /// Draw as a dashed line.
    pub dashed: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Rgba::rgba(0, 0, 0, 0.5),
            width: 1,
            dashed: true,
        }
    }
}

/// Per-channel styles plus the diagram-wide record, resolved by channel name
/// with a fallback for channels that were not given an explicit style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Diagram-wide cosmetics.
    pub diagram: DiagramStyle,
    /// Explicit per-channel styles.
    pub channels: HashMap<String, ChannelStyle>,
    /// Style for channels without an explicit entry.
    pub fallback: ChannelStyle,
}

impl StyleSheet {
    /// A sheet with default cosmetics everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagram-wide record.
    pub fn with_diagram(mut self, diagram: DiagramStyle) -> Self {
        self.diagram = diagram;
        self
    }

    /// Attach an explicit style to one channel.
    pub fn with_channel(mut self, name: impl Into<String>, style: ChannelStyle) -> Self {
        self.channels.insert(name.into(), style);
        self
    }

    /// The style a channel renders with.
    pub fn channel_style(&self, name: &str) -> ChannelStyle {
        self.channels.get(name).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_style_resolution() {
        let sheet = StyleSheet::new().with_channel(
            "RF",
            ChannelStyle {
                color: Rgba::rgb(200, 0, 0),
                ..ChannelStyle::default()
            },
        );
        assert_eq!(sheet.channel_style("RF").color, Rgba::rgb(200, 0, 0));
        assert_eq!(sheet.channel_style("ADC"), sheet.fallback);
    }

    #[test]
    fn test_stylesheet_round_trips_through_serde() {
        let sheet = StyleSheet::new().with_channel("Phase", ChannelStyle::default());
        let json = serde_json::to_string(&sheet).unwrap();
        let back: StyleSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.channel_style("Phase"), ChannelStyle::default());
    }
}
