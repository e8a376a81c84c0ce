//! Unit-amplitude shape generators for sequence elements.
//!
//! A generator is a pure function of the time grid and its own scalar
//! parameters. It evaluates to a [`UnitTrace`]: one value per grid sample,
//! normalized to unit amplitude, plus the element's support mask. Scaling and
//! accumulation are the channel's job, never the generator's.
//!
//! The trait is the extension seam: anything implementing [`Shape`] can be
//! accumulated onto a channel, so custom pulse envelopes plug in next to the
//! built-in trapezoid, sinc and rectangle.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::{TimeGrid, UnitTrace};

/// A parameterized, stateless waveform generator.
pub trait Shape {
    /// Short generator name, kept in the channel's applied-element log.
    fn name(&self) -> &'static str;

    /// Evaluate the unit-amplitude trace over the grid.
    ///
    /// Must be pure and side-effect free. Degenerate parameters may produce
    /// non-finite samples; those propagate to the caller unchanged.
    fn sample(&self, grid: &TimeGrid) -> UnitTrace;
}

/// A symmetrical trapezoid of unit height, the standard gradient lobe.
///
/// Zero at `t_start`, ramps linearly to 1 at `t_flat_out`, stays flat until
/// `t_ramp_down`, then ramps back down over the same ramp duration. Samples
/// outside the closed support are absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    /// Moment the gradient switches on and starts to ramp up.
    pub t_start: f64,
    /// Moment the gradient is fully on and stays constant after.
    pub t_flat_out: f64,
    /// Moment the gradient starts to ramp down. The ramp-down duration equals
    /// the ramp-up duration.
    pub t_ramp_down: f64,
}

impl Shape for Trapezoid {
    fn name(&self) -> &'static str {
        "trapezoid"
    }

    fn sample(&self, grid: &TimeGrid) -> UnitTrace {
        let t = grid.points();
        let dt_ramp = self.t_flat_out - self.t_start;
        let t_end = self.t_ramp_down + dt_ramp;

        let mut values = Array1::zeros(t.len());
        let mut present = Array1::from_elem(t.len(), false);
        for (i, &ti) in t.iter().enumerate() {
            if ti < self.t_start || ti > t_end {
                continue;
            }
            present[i] = true;
            values[i] = if ti <= self.t_flat_out {
                (ti - self.t_start) / dt_ramp
            } else if ti <= self.t_ramp_down {
                1.0
            } else {
                (t_end - ti) / dt_ramp
            };
        }
        UnitTrace::new(values, present)
    }
}

/// A windowed sinc RF pulse, peak-normalized to 1.
///
/// `side_lobes` counts the zero crossings on each side of the main lobe.
/// Support is the open interval `(t_start, t_start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SincPulse {
    /// Moment the pulse window opens.
    pub t_start: f64,
    /// Length of the pulse window.
    pub duration: f64,
    /// Zero crossings per side of the main lobe.
    pub side_lobes: u32,
}

impl Shape for SincPulse {
    fn name(&self) -> &'static str {
        "sinc_pulse"
    }

    fn sample(&self, grid: &TimeGrid) -> UnitTrace {
        let t = grid.points();
        let t_end = self.t_start + self.duration;
        let omega = 2.0 * PI * f64::from(self.side_lobes + 1) / self.duration;

        let mut values = Array1::zeros(t.len());
        let mut present = Array1::from_elem(t.len(), false);
        let mut peak = f64::NEG_INFINITY;
        for (i, &ti) in t.iter().enumerate() {
            if ti <= self.t_start || ti >= t_end {
                continue;
            }
            present[i] = true;
            let tc = ti - self.t_start - self.duration / 2.0;
            // sin(w*tc)/tc, with the w limit at the center sample.
            values[i] = if tc == 0.0 { omega } else { (omega * tc).sin() / tc };
            peak = peak.max(values[i]);
        }
        if peak > 0.0 {
            values.mapv_inplace(|v| v / peak);
        }
        UnitTrace::new(values, present)
    }
}

/// A unit rectangular window, used for data-acquisition (ADC) intervals.
///
/// Support is the open interval `(t_start, t_start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Moment the window opens.
    pub t_start: f64,
    /// Length of the window.
    pub duration: f64,
}

impl Shape for Rect {
    fn name(&self) -> &'static str {
        "rect"
    }

    fn sample(&self, grid: &TimeGrid) -> UnitTrace {
        let t = grid.points();
        let t_end = self.t_start + self.duration;

        let mut values = Array1::zeros(t.len());
        let mut present = Array1::from_elem(t.len(), false);
        for (i, &ti) in t.iter().enumerate() {
            if ti > self.t_start && ti < t_end {
                present[i] = true;
                values[i] = 1.0;
            }
        }
        UnitTrace::new(values, present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    fn grid_0_to_6() -> TimeGrid {
        TimeGrid::linspace(0.0, 6.0, 601).unwrap()
    }

    #[test]
    fn test_trapezoid_round_trip() {
        // Step 1/16 is exact in binary, so the named time points land exactly
        // on grid samples and the edge values come out exact.
        let grid = TimeGrid::linspace(0.0, 6.0, 97).unwrap();
        let trap = Trapezoid {
            t_start: 2.0,
            t_flat_out: 2.25,
            t_ramp_down: 2.75,
        };
        let u = trap.sample(&grid);
        let t = grid.points();

        let at = |time: f64| {
            let i = t.iter().position(|&ti| ti == time).unwrap();
            (u.values()[i], u.present()[i])
        };

        // Exactly 0 at t_start, present.
        assert_eq!(at(2.0), (0.0, true));
        // Linear ramp: halfway up at the ramp midpoint.
        assert_eq!(at(2.125), (0.5, true));
        // Flat top at 1 between t_flat_out and t_ramp_down.
        assert_eq!(at(2.25).0, 1.0);
        assert_eq!(at(2.5).0, 1.0);
        assert_eq!(at(2.75).0, 1.0);
        // Symmetric ramp back to 0 at t_ramp_down + ramp duration.
        assert_eq!(at(2.875), (0.5, true));
        assert_eq!(at(3.0), (0.0, true));
        // Absent outside the support.
        assert!(!at(1.9375).1);
        assert!(!at(3.0625).1);
    }

    #[test]
    fn test_trapezoid_degenerate_ramp_propagates() {
        let grid = grid_0_to_6();
        let trap = Trapezoid {
            t_start: 2.0,
            t_flat_out: 2.0,
            t_ramp_down: 2.5,
        };
        let u = trap.sample(&grid);
        // Zero-length ramp divides by zero; the samples stay present.
        let bad = u
            .values()
            .iter()
            .zip(u.present().iter())
            .any(|(v, &p)| p && !v.is_finite());
        assert!(bad);
    }

    #[test]
    fn test_sinc_peaks_at_one_inside_support() {
        let grid = TimeGrid::linspace(0.0, 2.0, 2001).unwrap();
        let rf = SincPulse {
            t_start: 0.2,
            duration: 0.8,
            side_lobes: 2,
        };
        let u = rf.sample(&grid);

        let peak = u
            .values()
            .iter()
            .zip(u.present().iter())
            .filter(|&(_, &p)| p)
            .map(|(v, _)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_approx_eq!(peak, 1.0, 1e-12);

        // Absent outside the window, including the endpoints.
        for (i, &ti) in grid.points().iter().enumerate() {
            if ti <= 0.2 || ti >= 1.0 {
                assert!(!u.present()[i], "expected absent at t={ti}");
            }
        }
    }

    #[test]
    fn test_sinc_has_expected_zero_crossings() {
        let grid = TimeGrid::linspace(0.0, 2.0, 4001).unwrap();
        let rf = SincPulse {
            t_start: 0.2,
            duration: 0.8,
            side_lobes: 2,
        };
        let u = rf.sample(&grid);

        let mut crossings = 0;
        let mut prev: Option<f64> = None;
        for (v, &p) in u.values().iter().zip(u.present().iter()) {
            if !p {
                continue;
            }
            if let Some(pv) = prev
                && pv.signum() != v.signum()
                && *v != 0.0
            {
                crossings += 1;
            }
            prev = Some(*v);
        }
        // side_lobes zero crossings on each side of the main lobe.
        assert_eq!(crossings, 4);
    }

    #[test]
    fn test_rect_is_unit_inside_open_interval() {
        let grid = grid_0_to_6();
        let rect = Rect {
            t_start: 2.2,
            duration: 1.6,
        };
        let u = rect.sample(&grid);
        for (i, &ti) in grid.points().iter().enumerate() {
            if ti > 2.2 && ti < 3.8 {
                assert_eq!(u.values()[i], 1.0);
                assert!(u.present()[i]);
            } else {
                assert!(!u.present()[i]);
            }
        }
    }
}
