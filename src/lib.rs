// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![deny(missing_docs)] // Documentation is a must for release

//! # seqplot
//!
//! A library for rendering MRI pulse-sequence diagrams: timing charts showing
//! RF pulses, gradient waveforms and data-acquisition windows as named
//! horizontal channels that share one time axis, stacked into subplots.
//!
//! ## Overview
//!
//! Channels accumulate numeric waveforms from parameterized shape generators
//! (trapezoid, sinc pulse, rectangular window). Samples a channel never
//! touched stay *absent*, distinguishable from a zero-amplitude event, so
//! the drawn time axis can disappear exactly underneath active waveforms. A
//! layout maps channels onto display rows, composition projects everything
//! into a scene graph with one shared vertical scale, and rendering goes
//! through the `plotters` backend.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use seqplot::{
//!     Amplitude, ChannelStore, Diagram, Layout, Rect, SincPulse, StyleSheet,
//!     TimeGrid, Trapezoid,
//! };
//!
//! # fn main() -> seqplot::SeqPlotResult<()> {
//! let grid = Arc::new(TimeGrid::linspace(-0.2, 4.5, 10_000)?);
//! let mut store = ChannelStore::new(Arc::clone(&grid));
//! store.create("RF", Arc::clone(&grid))?;
//! store.create("ADC", Arc::clone(&grid))?;
//! store.create("Phase", Arc::clone(&grid))?;
//!
//! store.add_element(
//!     "RF",
//!     &SincPulse { t_start: 0.2, duration: 0.8, side_lobes: 2 },
//!     1.0,
//! )?;
//! store.add_element("ADC", &Rect { t_start: 2.2, duration: 1.6 }, 1.0)?;
//! // Ten phase-encode steps overlaid on one channel.
//! store.add_element(
//!     "Phase",
//!     &Trapezoid { t_start: 1.2, t_flat_out: 1.4, t_ramp_down: 1.8 },
//!     Amplitude::sweep(-1.0, 1.0, 10),
//! )?;
//!
//! let layout = Layout::new()
//!     .row("RF/ADC", ["RF", "ADC"])
//!     .row("Phase\nEncoding", ["Phase"]);
//! let diagram = Diagram::compose(&layout, &store, StyleSheet::new())?;
//! assert_eq!(diagram.row_labels().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Rendering writes through the backend picked from the file extension:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use seqplot::{ChannelStore, Diagram, Layout, StyleSheet, TimeGrid};
//! # fn main() -> seqplot::SeqPlotResult<()> {
//! # let grid = Arc::new(TimeGrid::linspace(0.0, 1.0, 100)?);
//! # let mut store = ChannelStore::new(Arc::clone(&grid));
//! # store.create("RF", Arc::clone(&grid))?;
//! # let layout = Layout::new().row("RF", ["RF"]);
//! let diagram = Diagram::compose(&layout, &store, StyleSheet::new())?;
//! diagram.render_to_file("sequence.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Configuration mistakes (unknown channel names, mixed time grids, empty
//! layouts) fail fast with [`SeqPlotError`]; there is no partial diagram.
//! Numeric edge cases from degenerate shape parameters are not caught; they
//! propagate through the buffers as non-finite samples.

mod channel;
mod error;
mod grid;
pub mod plotting;
pub mod shapes;
mod style;
mod waveform;

pub use crate::channel::{Channel, ChannelStore};
pub use crate::error::{SeqPlotError, SeqPlotResult};
pub use crate::grid::TimeGrid;
pub use crate::plotting::{Diagram, Layout, RowSelection};
pub use crate::shapes::{Rect, Shape, SincPulse, Trapezoid};
pub use crate::style::{ChannelStyle, DiagramStyle, MarkerStyle, Rgba, StyleSheet};
pub use crate::waveform::{Amplitude, UnitTrace, Waveform};
