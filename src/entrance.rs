//! Staged reveal timeline for the hero elements.
//!
//! Each element starts from its own hidden pose and settles at the identity
//! pose after `delay + duration`, easing along a shared bezier curve. The
//! timeline is a pure function of elapsed time since mount.

use std::time::Duration;

use crate::config::EntranceOptions;
use crate::motion::easing::CubicBezier;

/// The animated pieces of the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroElement {
    Heading,
    Intro,
    Portrait,
}

impl HeroElement {
    pub const ALL: &'static [Self] = &[Self::Heading, Self::Intro, Self::Portrait];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Intro => "intro",
            Self::Portrait => "portrait",
        }
    }
}

/// Opacity, vertical offset and scale of one element at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub offset_px: f32,
    pub scale: f32,
}

impl Pose {
    /// The resting pose every element settles at.
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        offset_px: 0.0,
        scale: 1.0,
    };
}

#[derive(Debug, Clone, Copy)]
struct Stage {
    element: HeroElement,
    delay: Duration,
    from: Pose,
}

/// Per-element reveal schedule with a shared duration and easing curve.
#[derive(Debug, Clone)]
pub struct EntranceTimeline {
    duration: Duration,
    easing: CubicBezier,
    stages: [Stage; 3],
}

impl EntranceTimeline {
    /// Build the timeline from configured timing. The hidden poses are part
    /// of the hero design: text slides up from below, the portrait grows in.
    #[must_use]
    pub fn from_options(opts: &EntranceOptions) -> Self {
        Self {
            duration: opts.duration,
            easing: opts.easing,
            stages: [
                Stage {
                    element: HeroElement::Heading,
                    delay: opts.heading_delay,
                    from: Pose {
                        opacity: 0.0,
                        offset_px: 40.0,
                        scale: 1.0,
                    },
                },
                Stage {
                    element: HeroElement::Intro,
                    delay: opts.intro_delay,
                    from: Pose {
                        opacity: 0.0,
                        offset_px: 30.0,
                        scale: 1.0,
                    },
                },
                Stage {
                    element: HeroElement::Portrait,
                    delay: opts.portrait_delay,
                    from: Pose {
                        opacity: 0.0,
                        offset_px: 0.0,
                        scale: 0.9,
                    },
                },
            ],
        }
    }

    /// Pose of `element` at `elapsed` since mount.
    #[must_use]
    pub fn pose_at(&self, element: HeroElement, elapsed: Duration) -> Pose {
        for stage in &self.stages {
            if stage.element != element {
                continue;
            }
            let t = if elapsed <= stage.delay {
                0.0
            } else {
                let into = elapsed - stage.delay;
                if into >= self.duration {
                    1.0
                } else {
                    into.as_secs_f32() / self.duration.as_secs_f32()
                }
            };
            let eased = self.easing.ease(t);
            return Pose {
                opacity: lerp(stage.from.opacity, Pose::SETTLED.opacity, eased),
                offset_px: lerp(stage.from.offset_px, Pose::SETTLED.offset_px, eased),
                scale: lerp(stage.from.scale, Pose::SETTLED.scale, eased),
            };
        }
        Pose::SETTLED
    }

    /// Time after which every element sits at the identity pose.
    #[must_use]
    pub fn settled_after(&self) -> Duration {
        self.stages
            .iter()
            .map(|s| s.delay + self.duration)
            .max()
            .unwrap_or(self.duration)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
