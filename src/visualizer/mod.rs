// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topology and color definitions used when styling a pose.

/// Color definitions.
pub mod color;

/// Default body topology.
pub mod skeleton;

pub use color::Rgba;
pub use skeleton::DEFAULT_JOINT_LINKS;
