// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use serde::Serialize;

use crate::error::{PoseError, Result};

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba(pub f32, pub f32, pub f32, pub f32);

impl Rgba {
    /// Default skeleton color, a rough blue.
    pub const SKELETON_BLUE: Self = Self(0.1, 0.2, 0.6, 1.0);
    /// Default ground-truth overlay color, a rough red.
    pub const GROUND_TRUTH_RED: Self = Self(0.6, 0.2, 0.1, 1.0);
    /// White.
    pub const WHITE: Self = Self(1.0, 1.0, 1.0, 1.0);
    /// Light grey used for floor subsurface scattering.
    pub const FLOOR_SUBSURFACE: Self = Self(0.9, 0.9, 0.9, 1.0);

    /// Create an opaque color from RGB values.
    #[must_use]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    /// Append an alpha to an RGB triple, checking every component is in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] if any component is outside `[0, 1]` or not finite.
    pub fn from_rgb(rgb: [f32; 3], alpha: f32) -> Result<Self> {
        let color = Self(rgb[0], rgb[1], rgb[2], alpha);
        color.validate()?;
        Ok(color)
    }

    /// Check every component is in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] naming the first bad component.
    pub fn validate(&self) -> Result<()> {
        let Self(r, g, b, a) = *self;
        for (name, value) in [("red", r), ("green", g), ("blue", b), ("alpha", a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PoseError::ConfigError(format!(
                    "{name} component {value} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        [c.0, c.1, c.2, c.3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb() {
        let c = Rgba::from_rgb([0.1, 0.2, 0.6], 0.3).unwrap();
        assert_eq!(c, Rgba::SKELETON_BLUE.with_alpha(0.3));
        assert_eq!(<[f32; 4]>::from(c), [0.1, 0.2, 0.6, 0.3]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Rgba::from_rgb([1.2, 0.0, 0.0], 1.0),
            Err(PoseError::ConfigError(_))
        ));
        assert!(Rgba::from_rgb([0.0, 0.0, 0.0], -0.1).is_err());
        assert!(Rgba::from_rgb([f32::NAN, 0.0, 0.0], 1.0).is_err());
    }
}
