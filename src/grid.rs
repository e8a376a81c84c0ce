//! The shared time axis all channels of a diagram are sampled on.
//!
//! A [`TimeGrid`] is immutable after construction and is shared between
//! channels behind an [`Arc`]. Sharing is by identity: two grids with equal
//! sample points are still *different* grids, and mixing channels built from
//! different grids in one diagram is a configuration error. This mirrors the
//! fact that every channel buffer is shaped to exactly one grid.

use std::sync::Arc;

use ndarray::Array1;

use crate::{SeqPlotError, SeqPlotResult};

/// An ordered sequence of real-valued sample points.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use seqplot::TimeGrid;
///
/// let grid = Arc::new(TimeGrid::linspace(-0.2, 4.5, 10_000).unwrap());
/// assert_eq!(grid.len(), 10_000);
/// assert!(grid.start() < grid.stop());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Array1<f64>,
}

impl TimeGrid {
    /// Create a grid of `n` evenly spaced points over `[start, stop]`.
    pub fn linspace(start: f64, stop: f64, n: usize) -> SeqPlotResult<Self> {
        if n < 2 {
            return Err(SeqPlotError::InvalidGrid(format!(
                "need at least 2 sample points, got {n}"
            )));
        }
        if !start.is_finite() || !stop.is_finite() {
            return Err(SeqPlotError::InvalidGrid(
                "start and stop must be finite".to_string(),
            ));
        }
        if start >= stop {
            return Err(SeqPlotError::InvalidGrid(format!(
                "start ({start}) must be strictly before stop ({stop})"
            )));
        }
        Ok(Self {
            points: Array1::linspace(start, stop, n),
        })
    }

    /// Create a grid from explicit sample points.
    ///
    /// The points must be finite and strictly increasing.
    pub fn from_points(points: Vec<f64>) -> SeqPlotResult<Self> {
        if points.len() < 2 {
            return Err(SeqPlotError::InvalidGrid(format!(
                "need at least 2 sample points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SeqPlotError::InvalidGrid(
                "sample points must be finite".to_string(),
            ));
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SeqPlotError::InvalidGrid(
                "sample points must be strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            points: Array1::from_vec(points),
        })
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid holds no sample points. Always false for a grid that
    /// passed construction.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sample points.
    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }

    /// First sample point.
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Last sample point.
    pub fn stop(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Whether two grid handles refer to the same grid.
    ///
    /// Identity comparison, not value comparison.
    pub fn same_grid(a: &Arc<TimeGrid>, b: &Arc<TimeGrid>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_linspace_endpoints() {
        let grid = TimeGrid::linspace(0.0, 6.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.start(), 0.0);
        assert_approx_eq!(grid.stop(), 6.0, 1e-9);
        assert!(grid.points().windows(2).into_iter().all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_rejects_degenerate() {
        assert!(TimeGrid::linspace(0.0, 6.0, 1).is_err());
        assert!(TimeGrid::linspace(6.0, 0.0, 100).is_err());
        assert!(TimeGrid::linspace(0.0, 0.0, 100).is_err());
        assert!(TimeGrid::linspace(0.0, f64::INFINITY, 100).is_err());
    }

    #[test]
    fn test_from_points_validation() {
        assert!(TimeGrid::from_points(vec![0.0, 1.0, 2.0]).is_ok());
        assert!(TimeGrid::from_points(vec![0.0]).is_err());
        assert!(TimeGrid::from_points(vec![0.0, 2.0, 1.0]).is_err());
        assert!(TimeGrid::from_points(vec![0.0, 0.0, 1.0]).is_err());
        assert!(TimeGrid::from_points(vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_identity_not_value() {
        let a = Arc::new(TimeGrid::linspace(0.0, 1.0, 10).unwrap());
        let b = Arc::new(TimeGrid::linspace(0.0, 1.0, 10).unwrap());
        assert_eq!(*a, *b);
        assert!(!TimeGrid::same_grid(&a, &b));
        assert!(TimeGrid::same_grid(&a, &Arc::clone(&a)));
    }
}
