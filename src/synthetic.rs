//! Synthetic contour-ordered outlines of tapered objects.
//!
//! Used by the demo binary and the tests. Outlines lie in the z = 0 plane
//! with the object's axis along +x. Index 0 is the tip; indices walk the
//! upper side (`y > 0`) out to the far end at `n / 2` and return along the
//! lower side, so index `k` and `n - k` face each other across the object.
use nalgebra::Point3;

/// Gaussian-shaped narrowing of the half-width.
#[derive(Clone, Copy, Debug)]
pub struct Waist {
    /// Location along the axis as a fraction of the length.
    pub position: f32,
    /// Relative reduction of the half-width at the waist centre (0..1).
    pub depth: f32,
    /// Standard deviation of the narrowing, as a fraction of the length.
    pub spread: f32,
}

/// Shape of a synthetic tapered outline.
#[derive(Clone, Copy, Debug)]
pub struct ContourSpec {
    pub points: usize,
    pub length: f32,
    pub tip_half_width: f32,
    pub base_half_width: f32,
    pub waist: Option<Waist>,
}

impl ContourSpec {
    /// Half-width at normalized axis position `t` in [0, 1].
    pub fn half_width(&self, t: f32) -> f32 {
        let linear = self.tip_half_width + (self.base_half_width - self.tip_half_width) * t;
        match self.waist {
            Some(w) => {
                let z = (t - w.position) / w.spread.max(1e-6);
                linear * (1.0 - w.depth * (-0.5 * z * z).exp())
            }
            None => linear,
        }
    }
}

/// Generates the outline described by `spec`.
pub fn tapered_contour(spec: &ContourSpec) -> Vec<Point3<f32>> {
    let n = spec.points;
    let half = (n / 2).max(1) as f32;
    (0..n)
        .map(|k| {
            let (steps, side) = if k < n / 2 {
                (k as f32, 1.0)
            } else {
                ((n - k) as f32, -1.0)
            };
            let t = steps / half;
            Point3::new(spec.length * t, side * spec.half_width(t), 0.0)
        })
        .collect()
}

/// Straight cone: zero width at the tip, widening linearly to `base_half_width`.
pub fn cone_contour(points: usize, length: f32, base_half_width: f32) -> Vec<Point3<f32>> {
    tapered_contour(&ContourSpec {
        points,
        length,
        tip_half_width: 0.0,
        base_half_width,
        waist: None,
    })
}
