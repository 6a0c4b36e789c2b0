use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use taper_cut::synthetic::{cone_contour, tapered_contour, ContourSpec, Waist};
use taper_cut::PointCloud;

/// Straight cone, tip at index 0, far end at `points / 2`.
pub fn cone_cloud(points: usize) -> PointCloud {
    PointCloud::from_contour(cone_contour(points, 1.0, 0.1))
}

/// Unit-length leg that narrows to 60 % of its width halfway along.
pub fn waisted_leg_points(points: usize) -> Vec<Point3<f32>> {
    tapered_contour(&ContourSpec {
        points,
        length: 1.0,
        tip_half_width: 0.02,
        base_half_width: 0.1,
        waist: Some(Waist {
            position: 0.5,
            depth: 0.5,
            spread: 0.08,
        }),
    })
}

pub fn waisted_leg(points: usize) -> PointCloud {
    PointCloud::from_contour(waisted_leg_points(points))
}

/// Moves the contour seam by `shift` indices; the outline is unchanged.
pub fn shift_seam(mut points: Vec<Point3<f32>>, shift: usize) -> Vec<Point3<f32>> {
    let n = points.len();
    points.rotate_left(shift % n.max(1));
    points
}

/// Some tilted placement of the object in the world frame.
pub fn tilted_pose() -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::new(0.3, -1.2, 0.75),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.4)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -0.9),
    )
}

pub fn transform(points: &[Point3<f32>], iso: &Isometry3<f32>) -> Vec<Point3<f32>> {
    points.iter().map(|p| iso * p).collect()
}
