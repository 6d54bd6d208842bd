// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose normalization.
//!
//! Maps raw joint coordinates into the frame the scene expects: Z up, the whole
//! pose scaled so its largest coordinate magnitude is 1, and the lowest joint
//! sitting [`ELEVATION`] above the floor plane at `z = 0`.
//!
//! The four steps are exposed individually so intermediate results can be
//! inspected. [`normalize`] chains them.
//!
//! Normalization is not idempotent: feeding a [`NormalizedPose`] back in remaps
//! and rescales it again.

use ndarray::{Array2, ArrayView2, Axis, s};

use crate::error::{PoseError, Result};
use crate::pose::{JointSet, NormalizedPose};

/// Height added to every joint after floor alignment, in normalized units.
pub const ELEVATION: f64 = 0.1;

/// Column holding the vertical (up) axis after [`remap_axes`].
pub const VERTICAL_AXIS: usize = 2;

/// Normalize a pose for scene placement.
///
/// # Arguments
///
/// * `pose` - Raw joint coordinates.
///
/// # Returns
///
/// * The pose remapped to Z-up, scaled to unit size, floor aligned and elevated.
///
/// # Errors
///
/// Returns [`PoseError::DegeneratePose`] if every coordinate is zero.
pub fn normalize(pose: &JointSet) -> Result<NormalizedPose> {
    let mut coords = remap_axes(pose.view());
    scale_to_unit(&mut coords)?;
    align_to_floor(&mut coords);
    elevate(&mut coords, ELEVATION);
    Ok(NormalizedPose::new(coords))
}

/// Remap axes from the dataset convention to Z-up: row `(a, b, c)` becomes `(a, -c, b)`.
#[must_use]
pub fn remap_axes(coords: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut out = Array2::zeros(coords.raw_dim());
    out.column_mut(0).assign(&coords.column(0));
    out.column_mut(1).assign(&coords.column(2).mapv(|v| -v));
    out.column_mut(2).assign(&coords.column(1));
    out
}

/// Largest absolute coordinate value anywhere in the pose.
#[must_use]
pub fn max_magnitude(coords: ArrayView2<'_, f64>) -> f64 {
    coords.fold(0.0, |acc: f64, &v| acc.max(v.abs()))
}

/// Divide every coordinate by the global [`max_magnitude`].
///
/// A single scalar is used for all axes, so proportions are preserved.
///
/// # Errors
///
/// Returns [`PoseError::DegeneratePose`] if the maximum magnitude is zero.
pub fn scale_to_unit(coords: &mut Array2<f64>) -> Result<f64> {
    let scale = max_magnitude(coords.view());
    if scale == 0.0 {
        return Err(PoseError::DegeneratePose(
            "all joints are at the origin, cannot scale to unit size".to_string(),
        ));
    }
    coords.mapv_inplace(|v| v / scale);
    Ok(scale)
}

/// Index of the joint with the lowest vertical coordinate. Ties go to the lowest index.
#[must_use]
pub fn lowest_joint(coords: ArrayView2<'_, f64>) -> usize {
    coords
        .index_axis(Axis(1), VERTICAL_AXIS)
        .indexed_iter()
        .fold((0, f64::INFINITY), |(best, min), (i, &z)| {
            if z < min { (i, z) } else { (best, min) }
        })
        .0
}

/// Translate the pose so the lowest joint becomes the origin.
///
/// Returns the index of that joint.
pub fn align_to_floor(coords: &mut Array2<f64>) -> usize {
    let lowest = lowest_joint(coords.view());
    let origin = coords.row(lowest).to_owned();
    *coords -= &origin;
    lowest
}

/// Lift every joint by `height` along the vertical axis.
pub fn elevate(coords: &mut Array2<f64>, height: f64) {
    coords
        .slice_mut(s![.., VERTICAL_AXIS])
        .mapv_inplace(|z| z + height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: ArrayView2<'_, f64>, expected: &Array2<f64>) {
        assert_eq!(actual.dim(), expected.dim());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "{actual} != {expected}");
        }
    }

    #[test]
    fn test_remap_axes() {
        let remapped = remap_axes(array![[1.0, 2.0, 3.0]].view());
        assert_close(remapped.view(), &array![[1.0, -3.0, 2.0]]);
    }

    #[test]
    fn test_scale_uses_global_magnitude() {
        let mut coords = array![[0.0, -4.0, 1.0], [2.0, 0.0, 0.5]];
        let scale = scale_to_unit(&mut coords).unwrap();
        assert!((scale - 4.0).abs() < EPS);
        assert_close(coords.view(), &array![[0.0, -1.0, 0.25], [0.5, 0.0, 0.125]]);
        assert!((max_magnitude(coords.view()) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_scale_degenerate() {
        let mut coords = Array2::<f64>::zeros((3, 3));
        assert!(matches!(
            scale_to_unit(&mut coords),
            Err(PoseError::DegeneratePose(_))
        ));
    }

    #[test]
    fn test_lowest_joint_first_on_tie() {
        let coords = array![[0.0, 0.0, 1.0], [0.0, 0.0, -2.0], [5.0, 5.0, -2.0]];
        assert_eq!(lowest_joint(coords.view()), 1);
    }

    #[test]
    fn test_align_to_floor_subtracts_full_position() {
        let mut coords = array![[1.0, 1.0, 1.0], [2.0, 3.0, -1.0]];
        let lowest = align_to_floor(&mut coords);
        assert_eq!(lowest, 1);
        assert_close(coords.view(), &array![[-1.0, -2.0, 2.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_end_to_end() {
        let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 1.0]]).unwrap();
        let normalized = normalize(&pose).unwrap();
        assert_close(
            normalized.view(),
            &array![[0.0, 0.0, 0.1], [0.0, 0.0, 0.6], [0.0, -0.5, 1.1]],
        );
    }

    #[test]
    fn test_elevation_invariant() {
        let pose = JointSet::from_rows(&[
            [0.3, -1.2, 0.4],
            [-0.7, 0.9, 2.5],
            [1.1, 0.1, -0.8],
            [0.0, -0.4, 0.2],
        ])
        .unwrap();
        let normalized = normalize(&pose).unwrap();
        assert_eq!(normalized.shape(), (4, 3));
        assert!((normalized.min_vertical() - ELEVATION).abs() < EPS);
    }

    #[test]
    fn test_not_idempotent() {
        let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 1.0]]).unwrap();
        let once = normalize(&pose).unwrap();
        let twice = normalize(&once.clone().into_joint_set()).unwrap();
        assert_ne!(once, twice);
    }

    #[test]
    fn test_single_origin_joint_is_degenerate() {
        let pose = JointSet::from_rows(&[[0.0, 0.0, 0.0]]).unwrap();
        assert!(matches!(
            normalize(&pose),
            Err(PoseError::DegeneratePose(_))
        ));
    }

    #[test]
    fn test_single_joint() {
        let pose = JointSet::from_rows(&[[3.0, -2.0, 5.0]]).unwrap();
        let normalized = normalize(&pose).unwrap();
        assert_close(normalized.view(), &array![[0.0, 0.0, 0.1]]);
    }
}
