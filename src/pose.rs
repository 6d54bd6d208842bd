// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose data types.
//!
//! A [`JointSet`] is the raw `(N, 3)` joint array handed over by a pose estimator,
//! [`JointLinks`] lists which joints are connected by a limb, and a
//! [`NormalizedPose`] is the result of [`crate::normalize::normalize`]: same joints,
//! same order, canonical Z-up frame.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};
use crate::visualizer::skeleton::DEFAULT_JOINT_LINKS;

/// Number of components per joint.
pub const JOINT_DIMS: usize = 3;

/// Raw joint coordinates with shape `(N, 3)`, `N >= 1`, all values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSet {
    data: Array2<f64>,
}

impl JointSet {
    /// Build a joint set from rows of coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeError`] if there are no rows, if any row does not
    /// have exactly 3 components, or if rows differ in length.
    /// Returns [`PoseError::InvalidInput`] if any value is NaN or infinite.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        if rows.is_empty() {
            return Err(PoseError::ShapeError(
                "pose must contain at least one joint".to_string(),
            ));
        }

        let width = rows[0].as_ref().len();
        let mut flat = Vec::with_capacity(rows.len() * JOINT_DIMS);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(PoseError::ShapeError(format!(
                    "ragged pose: joint {i} has {} values, joint 0 has {width}",
                    row.len()
                )));
            }
            if row.len() != JOINT_DIMS {
                return Err(PoseError::ShapeError(format!(
                    "[x, y, z] values are required, joint {i} has {} values",
                    row.len()
                )));
            }
            flat.extend_from_slice(row);
        }

        let data = Array2::from_shape_vec((rows.len(), JOINT_DIMS), flat)
            .map_err(|e| PoseError::ShapeError(e.to_string()))?;
        Self::from_array(data)
    }

    /// Wrap an existing `(N, 3)` array.
    ///
    /// # Errors
    ///
    /// Same conditions as [`JointSet::from_rows`].
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        let (n, dims) = data.dim();
        if n == 0 {
            return Err(PoseError::ShapeError(
                "pose must contain at least one joint".to_string(),
            ));
        }
        if dims != JOINT_DIMS {
            return Err(PoseError::ShapeError(format!(
                "[x, y, z] values are required, got {dims} columns"
            )));
        }
        if let Some(((joint, axis), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(PoseError::InvalidInput(format!(
                "joint {joint} axis {axis} is not finite ({value})"
            )));
        }
        Ok(Self { data })
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Always `false`: a joint set holds at least one joint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw `(N, 3)` array.
    #[must_use]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Limb connections as pairs of joint indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointLinks(Vec<[usize; 2]>);

impl JointLinks {
    /// Create a link set from index pairs.
    #[must_use]
    pub fn new(links: Vec<[usize; 2]>) -> Self {
        Self(links)
    }

    /// Check that every index refers to a joint of a pose with `num_joints` joints.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::InvalidInput`] naming the first offending link.
    pub fn validate(&self, num_joints: usize) -> Result<()> {
        for (idx, &[a, b]) in self.0.iter().enumerate() {
            if a >= num_joints || b >= num_joints {
                return Err(PoseError::InvalidInput(format!(
                    "link {idx} ({a}, {b}) references a joint outside 0..{num_joints}"
                )));
            }
        }
        Ok(())
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the index pairs.
    pub fn iter(&self) -> impl Iterator<Item = &[usize; 2]> {
        self.0.iter()
    }
}

impl Default for JointLinks {
    fn default() -> Self {
        Self(DEFAULT_JOINT_LINKS.to_vec())
    }
}

impl From<&[[usize; 2]]> for JointLinks {
    fn from(links: &[[usize; 2]]) -> Self {
        Self(links.to_vec())
    }
}

/// Joint coordinates in the canonical scene frame: Z up, unit scale, lowest
/// joint lifted to [`crate::normalize::ELEVATION`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPose {
    data: Array2<f64>,
}

impl NormalizedPose {
    pub(crate) const fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Check if there are no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape of the underlying array, always `(N, 3)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Borrow the `(N, 3)` array.
    #[must_use]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Position of joint `index`, or `None` if out of range.
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<[f64; 3]> {
        (index < self.len()).then(|| {
            let row = self.data.row(index);
            [row[0], row[1], row[2]]
        })
    }

    /// Vertical (Z) coordinates of all joints.
    #[must_use]
    pub fn vertical(&self) -> ArrayView1<'_, f64> {
        self.data.index_axis(Axis(1), 2)
    }

    /// Lowest vertical coordinate across all joints.
    #[must_use]
    pub fn min_vertical(&self) -> f64 {
        self.vertical().fold(f64::INFINITY, |acc, &z| acc.min(z))
    }

    /// Copy out as `[x, y, z]` rows, e.g. for JSON output.
    #[must_use]
    pub fn to_rows(&self) -> Vec<[f64; 3]> {
        self.data
            .outer_iter()
            .map(|row| [row[0], row[1], row[2]])
            .collect()
    }

    /// Reuse the normalized coordinates as raw input, e.g. to normalize again.
    #[must_use]
    pub fn into_joint_set(self) -> JointSet {
        JointSet { data: self.data }
    }
}

impl Serialize for NormalizedPose {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let pose = JointSet::from_rows(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]).unwrap();
        assert_eq!(pose.len(), 2);
        assert!(!pose.is_empty());
        assert!((pose.view()[[1, 2]] - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0], vec![3.0, 4.0, 5.0]];
        let err = JointSet::from_rows(&rows).unwrap_err();
        assert!(matches!(err, PoseError::ShapeError(_)));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let rows = vec![vec![0.0, 0.0], vec![1.0, 2.0]];
        assert!(matches!(
            JointSet::from_rows(&rows),
            Err(PoseError::ShapeError(_))
        ));

        let arr = Array2::<f64>::zeros((4, 2));
        assert!(matches!(
            JointSet::from_array(arr),
            Err(PoseError::ShapeError(_))
        ));
    }

    #[test]
    fn test_empty_pose_rejected() {
        let rows: Vec<[f64; 3]> = Vec::new();
        assert!(matches!(
            JointSet::from_rows(&rows),
            Err(PoseError::ShapeError(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = JointSet::from_rows(&[[0.0, f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(err, PoseError::InvalidInput(_)));

        let err = JointSet::from_rows(&[[0.0, 0.0, f64::INFINITY]]).unwrap_err();
        assert!(matches!(err, PoseError::InvalidInput(_)));
    }

    #[test]
    fn test_links_validate() {
        let links = JointLinks::new(vec![[0, 1], [1, 2]]);
        assert!(links.validate(3).is_ok());
        assert!(matches!(
            links.validate(2),
            Err(PoseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_default_links() {
        let links = JointLinks::default();
        assert_eq!(links.len(), 16);
        assert!(links.validate(17).is_ok());
        assert!(links.validate(16).is_err());
    }

    #[test]
    fn test_links_json_is_plain_pairs() {
        let links: JointLinks = serde_json::from_str("[[0, 1], [1, 2]]").unwrap();
        assert_eq!(links, JointLinks::new(vec![[0, 1], [1, 2]]));
        assert_eq!(serde_json::to_string(&links).unwrap(), "[[0,1],[1,2]]");
    }
}
