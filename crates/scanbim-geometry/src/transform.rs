// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor pose to world transform

use nalgebra::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion};
use scanbim_model::Pose;

/// Rigid transform for a pose
///
/// The quaternion is normalized; a zero-norm quaternion is treated as the
/// identity rotation.
pub fn pose_isometry(pose: &Pose) -> Isometry3<f64> {
    let [w, x, y, z] = pose.rotation;
    let rotation = UnitQuaternion::try_new(Quaternion::new(w, x, y, z), 1e-12)
        .unwrap_or_else(|| {
            log::warn!(
                "Degenerate pose rotation {:?}, using identity",
                pose.rotation
            );
            UnitQuaternion::identity()
        });
    let [tx, ty, tz] = pose.translation;
    Isometry3::from_parts(Translation3::new(tx, ty, tz), rotation)
}

/// Rotate then translate local points into global coordinates
///
/// Computation runs in `f64`.
pub fn to_global(points: &[[f32; 3]], pose: &Pose) -> Vec<[f32; 3]> {
    if pose.is_identity() {
        return points.to_vec();
    }

    let isometry = pose_isometry(pose);
    points
        .iter()
        .map(|&[x, y, z]| {
            let p = isometry * Point3::new(x as f64, y as f64, z as f64);
            [p.x as f32, p.y as f32, p.z as f32]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_pose_leaves_points() {
        let points = vec![[1.0, 2.0, 3.0], [-4.5, 0.0, 7.25]];
        assert_eq!(to_global(&points, &Pose::IDENTITY), points);
    }

    #[test]
    fn test_translation_only() {
        let pose = Pose::new([10.0, -1.0, 0.5], [1.0, 0.0, 0.0, 0.0]);
        let out = to_global(&[[1.0, 1.0, 1.0]], &pose);
        assert_eq!(out, vec![[11.0, 0.0, 1.5]]);
    }

    #[test]
    fn test_rotation_then_translation() {
        // 90 degrees about Z
        let half = std::f64::consts::FRAC_PI_4;
        let pose = Pose::new([0.0, 0.0, 1.0], [half.cos(), 0.0, 0.0, half.sin()]);
        let out = to_global(&[[1.0, 0.0, 0.0]], &pose);
        assert_relative_eq!(out[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(out[0][1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[0][2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unnormalized_quaternion_is_normalized() {
        let pose = Pose::new([0.0; 3], [2.0, 0.0, 0.0, 0.0]);
        let out = to_global(&[[1.0, 2.0, 3.0]], &pose);
        assert_relative_eq!(out[0][0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[0][2], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_quaternion_falls_back_to_identity() {
        let pose = Pose::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]);
        let isometry = pose_isometry(&pose);
        assert_eq!(isometry.rotation, UnitQuaternion::identity());
        assert_eq!(to_global(&[[1.0, 2.0, 3.0]], &pose), vec![[2.0, 2.0, 3.0]]);
    }
}
