use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::Deserialize;

use crate::error::Error;
use crate::gallery::ImageSet;
use crate::motion::easing::CubicBezier;
use crate::motion::profile::MotionProfile;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Name rendered as the hero heading.
    pub name: String,
    /// Introductory paragraph shown beside the portrait.
    pub intro: String,
    /// Primary portrait reference; always occupies gallery slot zero.
    pub profile_image: String,
    /// Additional gallery references shown after the portrait.
    pub additional_images: Vec<String>,
    /// Reference substituted while the current image is marked failed.
    pub placeholder_image: String,
    /// Scroll-linked motion profiles.
    pub motion: MotionConfig,
    /// Staged entrance timing.
    pub entrance: EntranceOptions,
}

impl Configuration {
    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it does not parse.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde
    /// defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.name.trim().is_empty(), "name must not be empty");
        ensure!(
            !self.profile_image.trim().is_empty(),
            "profile-image must not be empty"
        );
        ensure!(
            !self.placeholder_image.trim().is_empty(),
            "placeholder-image must not be empty"
        );
        ensure!(
            self.additional_images.iter().all(|r| !r.trim().is_empty()),
            "additional-images entries must not be empty"
        );
        self.motion
            .validate()
            .context("invalid motion configuration")?;
        self.entrance
            .validate()
            .context("invalid entrance configuration")?;
        Ok(self)
    }

    /// Build the ordered image set from the configured references.
    #[must_use]
    pub fn image_set(&self) -> ImageSet {
        ImageSet::new(&self.profile_image, &self.additional_images)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: String::new(),
            intro: String::new(),
            profile_image: String::new(),
            additional_images: Vec::new(),
            placeholder_image: Self::default_placeholder(),
            motion: MotionConfig::default(),
            entrance: EntranceOptions::default(),
        }
    }
}

impl Configuration {
    fn default_placeholder() -> String {
        "placeholder.svg".to_owned()
    }
}

/// Named motion profiles plus the strategy for picking one per mount.
///
/// `profile` is either the name of an entry in `profiles` or the literal
/// `random`, which draws a configured profile at mount time.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "MotionConfigRaw")]
pub struct MotionConfig {
    selection: ProfileSelection,
    profiles: BTreeMap<String, MotionProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelection {
    Fixed(String),
    Random,
}

const DEFAULT_PROFILE: &str = "classic";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct MotionConfigRaw {
    profile: String,
    profiles: BTreeMap<String, MotionProfile>,
}

impl Default for MotionConfigRaw {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_owned(), MotionProfile::default());
        Self {
            profile: DEFAULT_PROFILE.to_owned(),
            profiles,
        }
    }
}

impl TryFrom<MotionConfigRaw> for MotionConfig {
    type Error = anyhow::Error;

    fn try_from(raw: MotionConfigRaw) -> Result<Self> {
        ensure!(
            !raw.profiles.is_empty(),
            "motion.profiles must include at least one entry"
        );
        let selection = if raw.profile == "random" {
            ProfileSelection::Random
        } else {
            ensure!(
                raw.profiles.contains_key(&raw.profile),
                "motion.profile {} must match a key in motion.profiles",
                raw.profile
            );
            ProfileSelection::Fixed(raw.profile)
        };
        Ok(Self {
            selection,
            profiles: raw.profiles,
        })
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        let raw = MotionConfigRaw::default();
        Self {
            selection: ProfileSelection::Fixed(raw.profile),
            profiles: raw.profiles,
        }
    }
}

impl MotionConfig {
    /// Exposed for integration tests to introspect the parsed selection
    /// strategy.
    #[must_use]
    pub fn selection(&self) -> &ProfileSelection {
        &self.selection
    }

    /// Exposed for integration tests and the sweep mode to inspect the
    /// configured profiles.
    #[must_use]
    pub fn profiles(&self) -> &BTreeMap<String, MotionProfile> {
        &self.profiles
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.profiles.is_empty(),
            "motion configuration must include at least one profile"
        );
        for (name, profile) in &self.profiles {
            profile
                .validate()
                .with_context(|| format!("motion profile {name}"))?;
        }
        Ok(())
    }

    /// Pick the profile this mount animates with.
    pub fn choose_profile<R: Rng + ?Sized>(&self, rng: &mut R) -> MotionProfile {
        match &self.selection {
            ProfileSelection::Fixed(name) => self
                .profiles
                .get(name)
                .cloned()
                .expect("validated fixed motion profile should be present"),
            ProfileSelection::Random => self
                .profiles
                .values()
                .choose(rng)
                .cloned()
                .expect("validated motion config should have profiles"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EntranceOptions {
    /// Shared reveal duration for every element.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// CSS-style easing control points.
    pub easing: CubicBezier,
    /// Per-element reveal delays.
    #[serde(with = "humantime_serde")]
    pub heading_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub intro_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub portrait_delay: Duration,
}

impl EntranceOptions {
    const fn default_duration() -> Duration {
        Duration::from_secs(1)
    }

    const fn default_heading_delay() -> Duration {
        Duration::from_millis(400)
    }

    const fn default_intro_delay() -> Duration {
        Duration::from_millis(600)
    }

    const fn default_portrait_delay() -> Duration {
        Duration::from_millis(400)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.duration > Duration::ZERO,
            "entrance.duration must be positive"
        );
        Ok(())
    }
}

impl Default for EntranceOptions {
    fn default() -> Self {
        Self {
            duration: Self::default_duration(),
            easing: CubicBezier::default(),
            heading_delay: Self::default_heading_delay(),
            intro_delay: Self::default_intro_delay(),
            portrait_delay: Self::default_portrait_delay(),
        }
    }
}
