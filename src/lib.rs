// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pose Render
//!
//! Turn 3D human-pose estimates into styled 3D scenes for a path-tracing host
//! application, for inspecting and debugging pose-estimation output.
//!
//! The crate owns the parts that do not depend on any 3D engine:
//!
//! - **Normalization** - remap a pose to a Z-up frame, scale it to unit size and
//!   stand it on the floor, so every pose fits the same camera and floor setup
//! - **Skeleton topology** - the default 16-limb, 17-joint body table
//! - **Scene description** - a [`SceneBuilder`] trait the host implements, and
//!   [`compose_scene`] which drives it with spheres, tubes, a floor, a light and
//!   a camera
//! - **Scene plans** - [`ScenePlan`] records a composed scene as JSON so a host-side
//!   script can replay it
//!
//! ## Quick Start (Library)
//!
//! ```rust
//! use pose_render::{JointSet, normalize};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 1.0]])?;
//!     let normalized = normalize(&pose)?;
//!
//!     // The lowest joint always sits just above the floor.
//!     assert!((normalized.min_vertical() - 0.1).abs() < 1e-9);
//!     Ok(())
//! }
//! ```
//!
//! ## Composing a Scene
//!
//! ```rust
//! use pose_render::{JointLinks, JointSet, RenderConfig, ScenePlan, compose_scene};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 1.0]])?;
//! let config = RenderConfig::new()
//!     .with_joint_links(JointLinks::new(vec![[0, 1], [1, 2]]))
//!     .with_samplings(32);
//!
//! let mut plan = ScenePlan::new();
//! let summary = compose_scene(&mut plan, &pose, &config)?;
//! assert_eq!(summary.joints, 3);
//!
//! let json = plan.to_json()?;
//! # assert!(json.contains("Main Light"));
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Normalized coordinates as JSON
//! pose-render normalize --pose '[[0,0,0],[0,1,0],[0,2,1]]'
//!
//! # Scene plan with a ground-truth overlay, saved to runs/scene/plan
//! pose-render scene --pose-file pred.json --gt-pose-file gt.json --save
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`normalize`](mod@normalize) | The four-step pose normalization |
//! | [`pose`] | [`JointSet`], [`JointLinks`], [`NormalizedPose`] |
//! | [`scene`] | [`SceneBuilder`], scene primitives, [`compose_scene`], [`ScenePlan`] |
//! | [`config`] | [`RenderConfig`] and [`SkeletonStyle`] |
//! | [`visualizer`] | Default joint links and colors |
//! | [`io`] | JSON decoding and output helpers |
//! | [`error`] | Error types ([`PoseError`], [`Result`]) |

// Modules
pub mod config;
pub mod error;
pub mod io;
pub mod normalize;
pub mod pose;
pub mod scene;
pub mod visualizer;

// Re-export main types for convenience
pub use config::{GroundTruth, RenderConfig, SkeletonStyle};
pub use error::{PoseError, Result};
pub use normalize::{ELEVATION, normalize};
pub use pose::{JointLinks, JointSet, NormalizedPose};
pub use scene::{SceneBuilder, ScenePlan, SceneSummary, compose_scene};
pub use visualizer::{DEFAULT_JOINT_LINKS, Rgba};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose-render");
    }
}
