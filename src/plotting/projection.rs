//! Projection of channel activity onto the shared time axis.
//!
//! A row's baseline (the horizontal zero-axis line) is only drawn where every
//! channel feeding the row is silent, so it visually disappears underneath an
//! active waveform instead of cutting through it.

use ndarray::Array1;

use crate::Waveform;

/// Per-grid-sample visibility of a row's baseline.
///
/// A sample is visible when every contributing channel is absent there across
/// all overlay variants. The all-absent mask is then dilated by one sample in
/// each direction, so the drawn baseline extends up to the zero-valued edge of
/// the neighbouring waveform and the two meet without a one-sample seam.
pub fn baseline_visibility(waveforms: &[&Waveform]) -> Array1<bool> {
    let n = waveforms.first().map_or(0, |w| w.len());
    debug_assert!(waveforms.iter().all(|w| w.len() == n));

    let mut silent = Array1::from_elem(n, true);
    for w in waveforms {
        for (s, active) in silent.iter_mut().zip(w.any_present().iter()) {
            *s = *s && !active;
        }
    }

    Array1::from_shape_fn(n, |i| {
        silent[i]
            || (i > 0 && silent[i - 1])
            || (i + 1 < n && silent[i + 1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amplitude, UnitTrace};

    fn waveform(present: &[bool]) -> Waveform {
        let n = present.len();
        let mut w = Waveform::absent(n);
        let unit = UnitTrace::new(
            Array1::from_elem(n, 1.0),
            Array1::from_vec(present.to_vec()),
        );
        w.accumulate(&unit, &Amplitude::Scalar(1.0)).unwrap();
        w
    }

    #[test]
    fn test_all_absent_channel_is_visible_everywhere() {
        let w = Waveform::absent(8);
        let vis = baseline_visibility(&[&w]);
        assert!(vis.iter().all(|&v| v));
    }

    #[test]
    fn test_active_region_hides_its_interior() {
        // Active on samples 3..=6 of 10.
        let mut present = [false; 10];
        for p in &mut present[3..=6] {
            *p = true;
        }
        let w = waveform(&present);
        let vis = baseline_visibility(&[&w]);

        // The dilated silent mask reaches one sample into the support, so the
        // support edges stay visible and only the interior is hidden.
        let expected = [
            true, true, true, true, false, false, true, true, true, true,
        ];
        assert_eq!(vis.to_vec(), expected);
    }

    #[test]
    fn test_short_silent_gap_is_bridged() {
        // Two lobes separated by a single silent sample: the dilation keeps
        // the baseline alive across the gap.
        let mut present = [false; 9];
        for p in &mut present[1..=3] {
            *p = true;
        }
        for p in &mut present[5..=7] {
            *p = true;
        }
        let w = waveform(&present);
        let vis = baseline_visibility(&[&w]);
        assert!(vis[3] && vis[4] && vis[5]);
        assert!(!vis[2] && !vis[6]);
    }

    #[test]
    fn test_union_across_channels() {
        let a = waveform(&[true, true, false, false, false, false]);
        let b = waveform(&[false, false, false, true, true, false]);
        let vis = baseline_visibility(&[&a, &b]);
        // Sample 2 is silent in both; its neighbours are active but the
        // dilation keeps them visible, so the interior of neither lobe has
        // enough width to hide anything here except the very first sample.
        assert_eq!(vis.to_vec(), [false, true, true, true, true, true]);
    }

    #[test]
    fn test_overlay_variants_count_as_activity() {
        let n = 6;
        let mut w = Waveform::absent(n);
        let unit = UnitTrace::new(
            Array1::from_elem(n, 1.0),
            Array1::from_vec(vec![false, false, true, true, false, false]),
        );
        w.accumulate(&unit, &Amplitude::Sweep(vec![-1.0, 1.0])).unwrap();
        let vis = baseline_visibility(&[&w]);
        assert!(vis.iter().all(|&v| v), "two-sample support has no interior");
    }
}
