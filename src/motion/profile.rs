//! Scroll progress to presentation value mapping.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::curve::Curve;

/// One breakpoint table per animated channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MotionProfile {
    /// Vertical offset in percent of the section height.
    pub offset: Curve,
    /// Opacity in `[0, 1]`.
    pub opacity: Curve,
    /// Uniform scale factor.
    pub scale: Curve,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            offset: Curve::from_points(vec![(0.0, 0.0), (1.0, 30.0)]),
            opacity: Curve::from_points(vec![(0.0, 1.0), (0.8, 0.0)]),
            scale: Curve::from_points(vec![(0.0, 1.0), (1.0, 0.9)]),
        }
    }
}

impl MotionProfile {
    /// Validate every channel's table.
    pub fn validate(&self) -> Result<()> {
        self.offset.validate().context("offset curve")?;
        self.opacity.validate().context("opacity curve")?;
        self.scale.validate().context("scale curve")?;
        Ok(())
    }

    /// Derive the presentation values for one scroll position. Progress
    /// outside `[0, 1]` clamps to the endpoints.
    #[must_use]
    pub fn frame(&self, progress: f32) -> MotionFrame {
        let t = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        MotionFrame {
            progress: t,
            offset_pct: self.offset.sample(t),
            opacity: self.opacity.sample(t),
            scale: self.scale.sample(t),
        }
    }
}

/// Presentation values derived from one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    /// The clamped progress the values were sampled at.
    pub progress: f32,
    pub offset_pct: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl fmt::Display for MotionFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y {:.1}% opacity {:.2} scale {:.3}",
            self.offset_pct, self.opacity, self.scale
        )
    }
}
