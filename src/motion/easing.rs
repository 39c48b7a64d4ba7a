//! CSS-style cubic bezier easing.

use anyhow::{Result, ensure};
use serde::Deserialize;

/// Unit cubic bezier through `(0,0)` and `(1,1)`, matching the CSS
/// `cubic-bezier(x1, y1, x2, y2)` convention. Deserializes from a four
/// element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "[f32; 4]")]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Default for CubicBezier {
    /// The decelerating curve the hero entrance animates with.
    fn default() -> Self {
        Self {
            x1: 0.22,
            y1: 1.0,
            x2: 0.36,
            y2: 1.0,
        }
    }
}

impl TryFrom<[f32; 4]> for CubicBezier {
    type Error = anyhow::Error;

    fn try_from(v: [f32; 4]) -> Result<Self> {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl CubicBezier {
    /// Construct from control points.
    ///
    /// # Errors
    /// The horizontal control values must lie in `[0, 1]` so the curve stays
    /// a function of progress; all four values must be finite.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        ensure!(
            [x1, y1, x2, y2].iter().all(|v| v.is_finite()),
            "bezier control points must be finite"
        );
        ensure!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "bezier x control points must lie in [0, 1]"
        );
        Ok(Self { x1, y1, x2, y2 })
    }

    // One bezier coordinate with control values a and b.
    fn axis(t: f32, a: f32, b: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    }

    fn x_at(&self, t: f32) -> f32 {
        Self::axis(t, self.x1, self.x2)
    }

    fn y_at(&self, t: f32) -> f32 {
        Self::axis(t, self.y1, self.y2)
    }

    fn x_derivative(&self, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * self.x1 + 6.0 * u * t * (self.x2 - self.x1) + 3.0 * t * t * (1.0 - self.x2)
    }

    /// Eased progress for `x` in `[0, 1]`. Inputs outside the range clamp to
    /// the endpoints.
    #[must_use]
    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // Newton-Raphson on the x axis, with a bisection fallback when the
        // derivative flattens out.
        let mut t = x;
        for _ in 0..8 {
            let err = self.x_at(t) - x;
            if err.abs() < 1e-5 {
                return self.y_at(t);
            }
            let d = self.x_derivative(t);
            if d.abs() < 1e-6 {
                break;
            }
            t = (t - err / d).clamp(0.0, 1.0);
        }

        let mut lo = 0.0f32;
        let mut hi = 1.0f32;
        t = x;
        for _ in 0..32 {
            let xt = self.x_at(t);
            if (xt - x).abs() < 1e-5 {
                break;
            }
            if xt < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        self.y_at(t)
    }
}
