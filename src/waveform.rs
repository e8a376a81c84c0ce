//! Absent-aware waveform buffers and the accumulation rule that fills them.
//!
//! Every channel owns a [`Waveform`]: an `(N, K)` matrix of samples over the
//! shared time grid, where `K` is the number of simultaneously overlaid
//! variants (a family of phase-encode steps rendered as parallel traces).
//! `K = 1` is the common case.
//!
//! A sample starts out *absent*, which is not the same thing as zero: a pulse
//! that returns to baseline is a real zero-amplitude event, while absent means
//! nothing ever happened there. Absence is tracked by a parallel validity
//! mask rather than a floating sentinel, so genuinely non-finite samples from
//! degenerate shape parameters stay representable.
//!
//! Accumulation treats absent as an annihilating identity:
//!
//! ```text
//! absent + absent = absent
//! absent + x      = x
//! x + y           = x + y
//! ```
//!
//! Unrelated events at different times therefore coexist on one channel
//! without forcing a zero baseline everywhere, while events that do overlap
//! in time sum their amplitudes. Overlap is accepted accumulation semantics,
//! not an error.

use ndarray::{Array1, Array2};

use crate::{SeqPlotError, SeqPlotResult};

/// A unit-amplitude trace produced by a shape generator.
///
/// Holds one value per grid sample plus the element's support mask: samples
/// outside the support are absent, samples on it are present even when their
/// value is zero (a trapezoid edge, for instance).
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTrace {
    values: Array1<f64>,
    present: Array1<bool>,
}

impl UnitTrace {
    /// Pair values with their support mask. Both arrays must have the grid's
    /// length; generators produce them together so the lengths agree by
    /// construction.
    pub fn new(values: Array1<f64>, present: Array1<bool>) -> Self {
        debug_assert_eq!(values.len(), present.len());
        Self { values, present }
    }

    /// Number of grid samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the trace covers no grid samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The unit-amplitude values.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// The support mask.
    pub fn present(&self) -> &Array1<bool> {
        &self.present
    }
}

/// The amplitude applied to a unit trace during accumulation.
///
/// A scalar scales the shape as-is; a vector of length `K` broadcasts the
/// shape into `K` simultaneous overlay variants, one per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Amplitude {
    /// One scaled copy of the unit shape.
    Scalar(f64),
    /// `K` scaled copies of the unit shape, overlaid on the same channel.
    Sweep(Vec<f64>),
}

impl Amplitude {
    /// Evenly spaced amplitudes over `[lo, hi]`, the usual phase-encode sweep.
    pub fn sweep(lo: f64, hi: f64, k: usize) -> Self {
        Amplitude::Sweep(Array1::linspace(lo, hi, k).to_vec())
    }

    fn variants(&self) -> usize {
        match self {
            Amplitude::Scalar(_) => 1,
            Amplitude::Sweep(v) => v.len(),
        }
    }

    fn at(&self, k: usize) -> f64 {
        match self {
            Amplitude::Scalar(a) => *a,
            Amplitude::Sweep(v) => v[k.min(v.len() - 1)],
        }
    }
}

impl From<f64> for Amplitude {
    fn from(a: f64) -> Self {
        Amplitude::Scalar(a)
    }
}

impl From<Vec<f64>> for Amplitude {
    fn from(v: Vec<f64>) -> Self {
        Amplitude::Sweep(v)
    }
}

/// An `(N, K)` absent-aware sample buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    values: Array2<f64>,
    present: Array2<bool>,
}

impl Waveform {
    /// An all-absent buffer of shape `(len, 1)`.
    pub fn absent(len: usize) -> Self {
        Self {
            values: Array2::zeros((len, 1)),
            present: Array2::from_elem((len, 1), false),
        }
    }

    /// Grid length `N`.
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    /// Whether the buffer covers no grid samples.
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Overlay count `K`.
    pub fn variants(&self) -> usize {
        self.values.ncols()
    }

    /// Raw sample values. Entries where [`Waveform::present`] is false are
    /// meaningless placeholders.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// The validity mask.
    pub fn present(&self) -> &Array2<bool> {
        &self.present
    }

    /// The sample of variant `k` at grid index `i`, or `None` when absent.
    pub fn value_at(&self, i: usize, k: usize) -> Option<f64> {
        self.present[[i, k]].then(|| self.values[[i, k]])
    }

    /// Per-grid-sample mask: true where any overlay variant is present.
    pub fn any_present(&self) -> Array1<bool> {
        Array1::from_iter(
            self.present
                .rows()
                .into_iter()
                .map(|row| row.iter().any(|&p| p)),
        )
    }

    /// Minimum and maximum over all present samples, or `None` for an
    /// all-absent buffer.
    pub fn present_min_max(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for i in 0..self.len() {
            for k in 0..self.variants() {
                if !self.present[[i, k]] {
                    continue;
                }
                let v = self.values[[i, k]];
                bounds = Some(match bounds {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }
        }
        bounds
    }

    /// Accumulate a scaled unit trace into the buffer, in place.
    ///
    /// The scaled trace and the existing buffer are broadcast to a common
    /// overlay count first: equal counts pass through, a count of 1 on either
    /// side is expanded by copying columns, and anything else fails with
    /// [`SeqPlotError::BroadcastMismatch`]. The elementwise sum then treats
    /// absent as an annihilating identity, so only positions where both sides
    /// are absent stay absent.
    ///
    /// Returns the number of positions where two present samples summed, for
    /// diagnostics.
    pub fn accumulate(
        &mut self,
        unit: &UnitTrace,
        amplitude: &Amplitude,
    ) -> SeqPlotResult<usize> {
        debug_assert_eq!(unit.len(), self.len());
        let existing = self.variants();
        let incoming = amplitude.variants();
        if incoming == 0 {
            return Err(SeqPlotError::BroadcastMismatch { existing, incoming });
        }
        let k = if existing == incoming || incoming == 1 {
            existing
        } else if existing == 1 {
            incoming
        } else {
            return Err(SeqPlotError::BroadcastMismatch { existing, incoming });
        };

        if k != existing {
            // Column-broadcast the (N, 1) buffer up to (N, K).
            let n = self.len();
            self.values = Array2::from_shape_fn((n, k), |(i, _)| self.values[[i, 0]]);
            self.present = Array2::from_shape_fn((n, k), |(i, _)| self.present[[i, 0]]);
        }

        let mut overlap = 0usize;
        for i in 0..self.len() {
            if !unit.present()[i] {
                continue;
            }
            let u = unit.values()[i];
            for col in 0..k {
                let scaled = amplitude.at(col) * u;
                if self.present[[i, col]] {
                    self.values[[i, col]] += scaled;
                    overlap += 1;
                } else {
                    self.values[[i, col]] = scaled;
                    self.present[[i, col]] = true;
                }
            }
        }
        Ok(overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    fn unit(values: Vec<f64>, present: Vec<bool>) -> UnitTrace {
        UnitTrace::new(Array1::from_vec(values), Array1::from_vec(present))
    }

    #[test]
    fn test_fresh_buffer_is_all_absent() {
        let w = Waveform::absent(5);
        assert_eq!(w.len(), 5);
        assert_eq!(w.variants(), 1);
        for i in 0..5 {
            assert_eq!(w.value_at(i, 0), None);
        }
        assert_eq!(w.present_min_max(), None);
    }

    #[test]
    fn test_zero_amplitude_is_present_not_absent() {
        let mut w = Waveform::absent(3);
        let u = unit(vec![0.0, 1.0, 0.0], vec![true, true, true]);
        w.accumulate(&u, &Amplitude::Scalar(1.0)).unwrap();
        assert_eq!(w.value_at(0, 0), Some(0.0));
        assert_eq!(w.value_at(1, 0), Some(1.0));
        assert_eq!(w.value_at(2, 0), Some(0.0));
    }

    #[test]
    fn test_absent_annihilates_only_against_absent() {
        let mut w = Waveform::absent(4);
        // Element A on samples 0..2, element B on samples 1..3.
        let a = unit(vec![1.0, 2.0, 0.0, 0.0], vec![true, true, false, false]);
        let b = unit(vec![0.0, 10.0, 20.0, 0.0], vec![false, true, true, false]);
        w.accumulate(&a, &Amplitude::Scalar(1.0)).unwrap();
        let overlap = w.accumulate(&b, &Amplitude::Scalar(1.0)).unwrap();
        assert_eq!(overlap, 1);
        assert_eq!(w.value_at(0, 0), Some(1.0)); // absent + x = x
        assert_eq!(w.value_at(1, 0), Some(12.0)); // x + y = x + y
        assert_eq!(w.value_at(2, 0), Some(20.0));
        assert_eq!(w.value_at(3, 0), None); // absent + absent = absent
    }

    #[test]
    fn test_accumulation_commutes() {
        let a = unit(vec![1.0, 2.0, 0.0, 0.0], vec![true, true, false, false]);
        let b = unit(vec![0.0, 10.0, 20.0, 0.0], vec![false, true, true, false]);

        let mut ab = Waveform::absent(4);
        ab.accumulate(&a, &Amplitude::Scalar(1.0)).unwrap();
        ab.accumulate(&b, &Amplitude::Scalar(1.0)).unwrap();

        let mut ba = Waveform::absent(4);
        ba.accumulate(&b, &Amplitude::Scalar(1.0)).unwrap();
        ba.accumulate(&a, &Amplitude::Scalar(1.0)).unwrap();

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_amplitude_sweep_broadcasts_to_columns() {
        let mut w = Waveform::absent(3);
        let u = unit(vec![0.5, 1.0, 0.0], vec![true, true, false]);
        let amps: Vec<f64> = Array1::linspace(-1.0, 1.0, 10).to_vec();
        w.accumulate(&u, &Amplitude::Sweep(amps.clone())).unwrap();

        assert_eq!(w.variants(), 10);
        for (k, &a) in amps.iter().enumerate() {
            assert_approx_eq!(w.value_at(0, k).unwrap(), 0.5 * a, 1e-12);
            assert_approx_eq!(w.value_at(1, k).unwrap(), a, 1e-12);
            assert_eq!(w.value_at(2, k), None);
        }
    }

    #[test]
    fn test_scalar_after_sweep_applies_to_every_column() {
        let mut w = Waveform::absent(2);
        let u = unit(vec![1.0, 0.0], vec![true, false]);
        w.accumulate(&u, &Amplitude::Sweep(vec![1.0, 2.0, 3.0]))
            .unwrap();
        let v = unit(vec![0.0, 5.0], vec![false, true]);
        w.accumulate(&v, &Amplitude::Scalar(1.0)).unwrap();

        assert_eq!(w.variants(), 3);
        assert_eq!(w.values().row(1), array![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_incompatible_overlay_counts_are_rejected() {
        let mut w = Waveform::absent(2);
        let u = unit(vec![1.0, 1.0], vec![true, true]);
        w.accumulate(&u, &Amplitude::Sweep(vec![1.0, 2.0, 3.0]))
            .unwrap();
        let err = w
            .accumulate(&u, &Amplitude::Sweep(vec![1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            SeqPlotError::BroadcastMismatch {
                existing: 3,
                incoming: 2
            }
        ));
    }

    #[test]
    fn test_present_min_max_spans_all_variants() {
        let mut w = Waveform::absent(2);
        let u = unit(vec![1.0, 0.0], vec![true, false]);
        w.accumulate(&u, &Amplitude::Sweep(vec![-2.0, 0.5])).unwrap();
        assert_eq!(w.present_min_max(), Some((-2.0, 0.5)));
    }
}
