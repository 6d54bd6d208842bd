// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! I/O utilities: decoding poses and links from JSON, writing results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{PoseError, Result};
use crate::pose::{JointLinks, JointSet};

/// Decode a pose from a JSON array of `[x, y, z]` rows.
///
/// # Arguments
///
/// * `text` - JSON text such as `[[0, 0, 0], [0.1, -0.2, 0.05]]`.
///
/// # Errors
///
/// * [`PoseError::JsonError`] if the text is not valid JSON.
/// * [`PoseError::ShapeError`] if the value is not an array of arrays, or rows are
///   not all 3 wide.
/// * [`PoseError::InvalidInput`] if an entry is not a number.
pub fn parse_pose_json(text: &str) -> Result<JointSet> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(rows) = value else {
        return Err(PoseError::ShapeError(
            "pose must be a JSON array of [x, y, z] rows".to_string(),
        ));
    };

    let mut coords = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let Value::Array(items) = row else {
            return Err(PoseError::ShapeError(format!(
                "joint {i} is not an array: {row}"
            )));
        };
        let joint = items
            .iter()
            .map(|item| {
                item.as_f64().ok_or_else(|| {
                    PoseError::InvalidInput(format!("joint {i} has a non-numeric entry: {item}"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        coords.push(joint);
    }

    JointSet::from_rows(&coords)
}

/// Read a pose JSON file. See [`parse_pose_json`].
///
/// # Errors
///
/// Returns [`PoseError::Io`] if the file cannot be read, otherwise the errors of
/// [`parse_pose_json`].
pub fn read_pose_json<P: AsRef<Path>>(path: P) -> Result<JointSet> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_pose_json(&text)
}

/// Decode limb links from a JSON array of index pairs.
///
/// # Errors
///
/// * [`PoseError::JsonError`] if the text is not valid JSON.
/// * [`PoseError::ShapeError`] if an element is not an array of exactly 2 items.
/// * [`PoseError::InvalidInput`] if an index is not a non-negative integer.
pub fn parse_links_json(text: &str) -> Result<JointLinks> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(pairs) = value else {
        return Err(PoseError::ShapeError(
            "joint links must be a JSON array of [i, j] pairs".to_string(),
        ));
    };

    let mut links = Vec::with_capacity(pairs.len());
    for (idx, pair) in pairs.iter().enumerate() {
        let items = match pair {
            Value::Array(items) if items.len() == 2 => items,
            _ => {
                return Err(PoseError::ShapeError(format!(
                    "link {idx} is not an [i, j] pair: {pair}"
                )));
            }
        };
        let index = |item: &Value| {
            item.as_u64()
                .and_then(|v| usize::try_from(v).ok())
                .ok_or_else(|| {
                    PoseError::InvalidInput(format!("link {idx} has an invalid joint index: {item}"))
                })
        };
        links.push([index(&items[0])?, index(&items[1])?]);
    }

    Ok(JointLinks::new(links))
}

/// Write `value` as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Find the next free run directory: `base/prefix`, then `base/prefix2`, `base/prefix3`, ...
#[must_use]
pub fn find_next_run_dir<P: AsRef<Path>>(base: P, prefix: &str) -> PathBuf {
    let base_path = base.as_ref();

    let first = base_path.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base_path.join(format!("{prefix}{i}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}
