//! Piecewise-linear breakpoint tables for scroll-driven styling.

use anyhow::{Result, ensure};
use serde::Deserialize;

/// An ordered list of `(input, output)` breakpoints defining a
/// piecewise-linear function of scroll progress.
///
/// Inputs live in `[0, 1]`; sampling outside the table's input range clamps
/// to the nearest endpoint, so the output can never overshoot the table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<(f32, f32)>,
}

impl Curve {
    /// Build a curve from known-good breakpoints. Callers deserializing
    /// untrusted tables go through [`Curve::validate`] instead.
    #[must_use]
    pub const fn from_points(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    /// Validate invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.points.is_empty(),
            "curve must define at least one breakpoint"
        );
        for &(input, output) in &self.points {
            ensure!(
                input.is_finite() && output.is_finite(),
                "curve breakpoints must be finite"
            );
            ensure!(
                (0.0..=1.0).contains(&input),
                "curve input {input} outside [0, 1]"
            );
        }
        for pair in self.points.windows(2) {
            ensure!(
                pair[0].0 < pair[1].0,
                "curve breakpoints must be strictly increasing"
            );
        }
        Ok(())
    }

    /// Sample the curve at `t`, clamping outside the table's input range.
    ///
    /// Allocation-free; tables are a handful of breakpoints, so the linear
    /// scan is cheap enough for once-per-frame scroll updates.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        let Some(&(first_in, first_out)) = self.points.first() else {
            return 0.0;
        };
        if t <= first_in {
            return first_out;
        }
        let mut prev = (first_in, first_out);
        for &(input, output) in &self.points[1..] {
            if t <= input {
                let span = input - prev.0;
                if span <= f32::EPSILON {
                    return output;
                }
                let frac = (t - prev.0) / span;
                return prev.1 + (output - prev.1) * frac;
            }
            prev = (input, output);
        }
        prev.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_linearly_between_breakpoints() {
        let curve = Curve::from_points(vec![(0.0, 0.0), (1.0, 30.0)]);
        assert!((curve.sample(0.5) - 15.0).abs() < 1e-5);
        assert!((curve.sample(0.25) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn clamps_outside_the_input_range() {
        let curve = Curve::from_points(vec![(0.0, 1.0), (0.8, 0.0)]);
        assert!((curve.sample(-0.5) - 1.0).abs() < 1e-5);
        assert!((curve.sample(0.9)).abs() < 1e-5);
        assert!((curve.sample(2.0)).abs() < 1e-5);
    }

    #[test]
    fn single_breakpoint_is_constant() {
        let curve = Curve::from_points(vec![(0.0, 0.42)]);
        assert!((curve.sample(0.0) - 0.42).abs() < 1e-5);
        assert!((curve.sample(1.0) - 0.42).abs() < 1e-5);
    }

    #[test]
    fn rejects_unsorted_and_out_of_range_tables() {
        assert!(Curve::from_points(vec![]).validate().is_err());
        assert!(
            Curve::from_points(vec![(0.5, 0.0), (0.5, 1.0)])
                .validate()
                .is_err()
        );
        assert!(
            Curve::from_points(vec![(0.8, 0.0), (0.2, 1.0)])
                .validate()
                .is_err()
        );
        assert!(
            Curve::from_points(vec![(-0.1, 0.0), (1.0, 1.0)])
                .validate()
                .is_err()
        );
        assert!(
            Curve::from_points(vec![(0.0, 0.0), (1.0, 1.0)])
                .validate()
                .is_ok()
        );
    }
}
