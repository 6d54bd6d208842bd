// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `normalize` and `scene` command implementations.

use pose_render::{JointSet, PoseError, Result, io};

use crate::cli::args::PoseInput;

// Modules
/// CLI arguments.
pub mod args;

/// Console output macros.
pub mod logging;

/// Normalize command.
pub mod normalize;

/// Scene command.
pub mod scene;

/// Decode the pose from whichever of `--pose` / `--pose-file` was given.
pub fn load_pose(input: &PoseInput) -> Result<JointSet> {
    match (&input.pose, &input.pose_file) {
        (Some(text), _) => io::parse_pose_json(text),
        (None, Some(path)) => io::read_pose_json(path),
        (None, None) => Err(PoseError::ShapeError(
            "one of --pose or --pose-file is required".to_string(),
        )),
    }
}
