//! Named channels and the store that owns them.
//!
//! A [`Channel`] collects a sequence of events (gradient lobes, RF pulses,
//! acquisition windows) that all share one time grid. It owns the channel's
//! absent-aware buffer and is mutated only through [`Channel::add_element`].
//! The [`ChannelStore`] keys channels by name and surfaces lookups of unknown
//! names as errors rather than ignoring them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    Amplitude, SeqPlotError, SeqPlotResult, Shape, TimeGrid, Waveform,
};

/// One named waveform over the shared time grid.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use seqplot::{Channel, TimeGrid, Trapezoid};
///
/// let grid = Arc::new(TimeGrid::linspace(-0.2, 4.5, 10_000).unwrap());
/// let mut slice = Channel::new("Slice", Arc::clone(&grid));
/// slice
///     .add_element(
///         &Trapezoid { t_start: 0.0, t_flat_out: 0.2, t_ramp_down: 1.0 },
///         1.0,
///     )
///     .unwrap()
///     .add_element(
///         &Trapezoid { t_start: 1.2, t_flat_out: 1.4, t_ramp_down: 1.8 },
///         -1.0,
///     )
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    grid: Arc<TimeGrid>,
    waveform: Waveform,
    applied: Vec<&'static str>,
}

impl Channel {
    /// Create a channel with an all-absent buffer shaped to the grid.
    pub fn new(name: impl Into<String>, grid: Arc<TimeGrid>) -> Self {
        let waveform = Waveform::absent(grid.len());
        Self {
            name: name.into(),
            grid,
            waveform,
            applied: Vec::new(),
        }
    }

    /// The channel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The grid this channel was built from.
    pub fn grid(&self) -> &Arc<TimeGrid> {
        &self.grid
    }

    /// The accumulated buffer.
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Names of the generators applied so far. Diagnostics only.
    pub fn applied(&self) -> &[&'static str] {
        &self.applied
    }

    /// Accumulate one element: evaluate the shape over the grid, scale it by
    /// `amplitude` and fold it into the buffer under the absent-aware sum.
    ///
    /// A vector amplitude of length `K` broadcasts the element into `K`
    /// overlay variants. Returns `&mut Self` so elements can be chained.
    pub fn add_element(
        &mut self,
        shape: &dyn Shape,
        amplitude: impl Into<Amplitude>,
    ) -> SeqPlotResult<&mut Self> {
        let amplitude = amplitude.into();
        let unit = shape.sample(&self.grid);
        let overlap = self.waveform.accumulate(&unit, &amplitude)?;
        self.applied.push(shape.name());
        tracing::debug!(
            channel = %self.name,
            shape = shape.name(),
            variants = self.waveform.variants(),
            overlap,
            "accumulated element"
        );
        Ok(self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel '{}' with {:?}", self.name, self.applied)
    }
}

/// Owns every channel of one diagram, keyed by unique name.
///
/// All channels in a store share one grid; creating a channel against a
/// different grid is rejected up front rather than failing at composition.
#[derive(Debug, Clone)]
pub struct ChannelStore {
    grid: Arc<TimeGrid>,
    channels: HashMap<String, Channel>,
}

impl ChannelStore {
    /// Create an empty store for channels on `grid`.
    pub fn new(grid: Arc<TimeGrid>) -> Self {
        Self {
            grid,
            channels: HashMap::new(),
        }
    }

    /// The store's shared grid.
    pub fn grid(&self) -> &Arc<TimeGrid> {
        &self.grid
    }

    /// Create a channel with an all-absent buffer.
    ///
    /// `grid` must be the very grid the store was created with (identity, not
    /// value); a duplicate name is rejected.
    pub fn create(&mut self, name: &str, grid: Arc<TimeGrid>) -> SeqPlotResult<&mut Channel> {
        if !TimeGrid::same_grid(&self.grid, &grid) {
            return Err(SeqPlotError::GridMismatch {
                channel: name.to_string(),
            });
        }
        if self.channels.contains_key(name) {
            return Err(SeqPlotError::DuplicateChannel(name.to_string()));
        }
        let channel = Channel::new(name, grid);
        Ok(self.channels.entry(name.to_string()).or_insert(channel))
    }

    /// Look up a channel, failing on unknown names.
    pub fn get(&self, name: &str) -> SeqPlotResult<&Channel> {
        self.channels
            .get(name)
            .ok_or_else(|| SeqPlotError::ChannelNotFound(name.to_string()))
    }

    /// Mutable lookup, failing on unknown names.
    pub fn get_mut(&mut self, name: &str) -> SeqPlotResult<&mut Channel> {
        self.channels
            .get_mut(name)
            .ok_or_else(|| SeqPlotError::ChannelNotFound(name.to_string()))
    }

    /// Accumulate one element onto the named channel.
    pub fn add_element(
        &mut self,
        name: &str,
        shape: &dyn Shape,
        amplitude: impl Into<Amplitude>,
    ) -> SeqPlotResult<()> {
        self.get_mut(name)?.add_element(shape, amplitude)?;
        Ok(())
    }

    /// Number of channels created so far.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the store holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, Trapezoid};

    fn grid() -> Arc<TimeGrid> {
        Arc::new(TimeGrid::linspace(0.0, 6.0, 1000).unwrap())
    }

    #[test]
    fn test_unknown_channel_is_surfaced() {
        let mut store = ChannelStore::new(grid());
        let err = store
            .add_element(
                "FEG",
                &Rect {
                    t_start: 1.0,
                    duration: 1.0,
                },
                1.0,
            )
            .unwrap_err();
        assert!(matches!(err, SeqPlotError::ChannelNotFound(name) if name == "FEG"));
    }

    #[test]
    fn test_duplicate_channel_is_rejected() {
        let g = grid();
        let mut store = ChannelStore::new(Arc::clone(&g));
        store.create("RF", Arc::clone(&g)).unwrap();
        let err = store.create("RF", Arc::clone(&g)).unwrap_err();
        assert!(matches!(err, SeqPlotError::DuplicateChannel(name) if name == "RF"));
    }

    #[test]
    fn test_foreign_grid_is_rejected() {
        let g = grid();
        let other = grid(); // equal points, different identity
        let mut store = ChannelStore::new(g);
        let err = store.create("RF", other).unwrap_err();
        assert!(matches!(err, SeqPlotError::GridMismatch { channel } if channel == "RF"));
    }

    #[test]
    fn test_two_lobes_leave_absent_gap_untouched() {
        // The FEG scenario: two non-overlapping trapezoids of opposite sign.
        let g = grid();
        let mut store = ChannelStore::new(Arc::clone(&g));
        store.create("FEG", Arc::clone(&g)).unwrap();
        store
            .add_element(
                "FEG",
                &Trapezoid {
                    t_start: 2.0,
                    t_flat_out: 2.2,
                    t_ramp_down: 2.8,
                },
                -1.0,
            )
            .unwrap();
        store
            .add_element(
                "FEG",
                &Trapezoid {
                    t_start: 3.0,
                    t_flat_out: 3.2,
                    t_ramp_down: 4.8,
                },
                1.0,
            )
            .unwrap();

        let feg = store.get("FEG").unwrap();
        let w = feg.waveform();
        assert_eq!(w.variants(), 1);
        for (i, &ti) in g.points().iter().enumerate() {
            let sample = w.value_at(i, 0);
            if ti < 1.99 {
                assert_eq!(sample, None, "expected absent before the first lobe");
            } else if ti > 2.05 && ti < 2.95 {
                // Inside the first lobe: present, non-positive.
                let v = sample.expect("expected a present sample in lobe one");
                assert!(v <= 0.0);
            } else if ti > 3.05 && ti < 4.95 {
                let v = sample.expect("expected a present sample in lobe two");
                assert!(v >= 0.0);
            } else if ti > 5.05 {
                assert_eq!(sample, None, "expected absent after the second lobe");
            }
        }
        assert_eq!(feg.applied(), ["trapezoid", "trapezoid"]);
    }

    #[test]
    fn test_display_lists_applied_generators() {
        let g = grid();
        let mut channel = Channel::new("ADC", Arc::clone(&g));
        channel
            .add_element(
                &Rect {
                    t_start: 2.2,
                    duration: 1.6,
                },
                0.5,
            )
            .unwrap();
        assert_eq!(channel.to_string(), "channel 'ADC' with [\"rect\"]");
    }
}
