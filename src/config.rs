// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Render configuration.
//!
//! [`RenderConfig`] collects everything that styles a scene but does not affect
//! normalization: skeleton colors and surface properties, limb links, an optional
//! ground-truth overlay, and output settings for the host renderer.

use crate::error::{PoseError, Result};
use crate::pose::{JointLinks, JointSet};
use crate::visualizer::Rgba;

/// Default output path handed to the host renderer.
pub const DEFAULT_OUTPUT_PATH: &str = "./.output/human_pose";

/// Surface and shading parameters for one skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonStyle {
    /// Base color including transparency.
    pub color: Rgba,
    /// Metallic factor (0.0 to 1.0).
    pub metallic: f32,
    /// Specular factor (0.0 to 1.0).
    pub specular: f32,
    /// Roughness factor (0.0 to 1.0).
    pub roughness: f32,
    /// Whether joints and limbs cast shadows.
    pub shadow: bool,
    /// Radius of the sphere drawn at each joint.
    pub joint_radius: f64,
    /// Radius of the tube drawn for each limb.
    pub limb_radius: f64,
}

impl Default for SkeletonStyle {
    fn default() -> Self {
        Self {
            color: Rgba::SKELETON_BLUE,
            metallic: 0.5,
            specular: 0.5,
            roughness: 0.9,
            shadow: true,
            joint_radius: 0.07,
            limb_radius: 0.04,
        }
    }
}

impl SkeletonStyle {
    /// Style used for a ground-truth overlay.
    #[must_use]
    pub fn ground_truth() -> Self {
        Self {
            color: Rgba::GROUND_TRUTH_RED,
            ..Self::default()
        }
    }

    /// Set the base color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable shadows.
    #[must_use]
    pub const fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Set metallic, specular and roughness in one go.
    #[must_use]
    pub const fn with_surface(mut self, metallic: f32, specular: f32, roughness: f32) -> Self {
        self.metallic = metallic;
        self.specular = specular;
        self.roughness = roughness;
        self
    }

    /// Check the color and surface factors are in range and the radii are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        self.color.validate()?;
        for (name, value) in [
            ("metallic", self.metallic),
            ("specular", self.specular),
            ("roughness", self.roughness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PoseError::ConfigError(format!(
                    "{name} {value} is outside [0, 1]"
                )));
            }
        }
        let positive = |r: f64| r.is_finite() && r > 0.0;
        if !(positive(self.joint_radius) && positive(self.limb_radius)) {
            return Err(PoseError::ConfigError(format!(
                "joint radius {} and limb radius {} must be finite and positive",
                self.joint_radius, self.limb_radius
            )));
        }
        Ok(())
    }
}

/// A reference pose drawn next to the prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    /// Raw joint coordinates, normalized independently of the prediction.
    pub pose: JointSet,
    /// Limb links. Falls back to the prediction's links when `None`.
    pub joint_links: Option<JointLinks>,
    /// Overlay style.
    pub style: SkeletonStyle,
}

impl GroundTruth {
    /// Ground truth with default red styling and inherited links.
    #[must_use]
    pub fn new(pose: JointSet) -> Self {
        Self {
            pose,
            joint_links: None,
            style: SkeletonStyle::ground_truth(),
        }
    }
}

/// Configuration for composing a pose scene.
///
/// # Example
///
/// ```rust
/// use pose_render::{RenderConfig, Rgba};
///
/// let config = RenderConfig::new()
///     .with_color(Rgba::opaque(0.8, 0.1, 0.1))
///     .with_shadow(false)
///     .with_samplings(32)
///     .with_output_path("renders/pose.png");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Style of the predicted skeleton.
    pub style: SkeletonStyle,
    /// Limb links. `None` uses [`crate::DEFAULT_JOINT_LINKS`].
    pub joint_links: Option<JointLinks>,
    /// Optional reference pose drawn alongside.
    pub ground_truth: Option<GroundTruth>,
    /// Render resolution as a percentage of 1080x1080 (1 to 100).
    pub resolution_percentage: u32,
    /// Path-tracing samples per pixel.
    pub samplings: u32,
    /// Where the host renderer writes the image.
    pub output_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: SkeletonStyle::default(),
            joint_links: None,
            ground_truth: None,
            resolution_percentage: 100,
            samplings: 6,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the skeleton style.
    #[must_use]
    pub fn with_style(mut self, style: SkeletonStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the skeleton color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.style.color = color;
        self
    }

    /// Enable or disable skeleton shadows.
    #[must_use]
    pub const fn with_shadow(mut self, shadow: bool) -> Self {
        self.style.shadow = shadow;
        self
    }

    /// Use explicit limb links instead of the default table.
    #[must_use]
    pub fn with_joint_links(mut self, links: JointLinks) -> Self {
        self.joint_links = Some(links);
        self
    }

    /// Draw a ground-truth pose next to the prediction.
    #[must_use]
    pub fn with_ground_truth(mut self, ground_truth: GroundTruth) -> Self {
        self.ground_truth = Some(ground_truth);
        self
    }

    /// Set the resolution percentage.
    #[must_use]
    pub const fn with_resolution_percentage(mut self, percentage: u32) -> Self {
        self.resolution_percentage = percentage;
        self
    }

    /// Set the number of render samples.
    #[must_use]
    pub const fn with_samplings(mut self, samplings: u32) -> Self {
        self.samplings = samplings;
        self
    }

    /// Set the output image path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Links for the predicted skeleton.
    #[must_use]
    pub fn links(&self) -> JointLinks {
        self.joint_links.clone().unwrap_or_default()
    }

    /// Check styles and render settings.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] for out-of-range colors or surface factors,
    /// a resolution percentage outside `1..=100`, or zero samples.
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        if let Some(gt) = &self.ground_truth {
            gt.style.validate()?;
        }
        if !(1..=100).contains(&self.resolution_percentage) {
            return Err(PoseError::ConfigError(format!(
                "resolution percentage {} is outside 1..=100",
                self.resolution_percentage
            )));
        }
        if self.samplings == 0 {
            return Err(PoseError::ConfigError(
                "samplings must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
