//! Point cloud container and its ordering contract.
//!
//! The analysis treats index distance as a proxy for distance along the
//! object's outline, so a cloud must be sampled in boundary traversal order
//! (a closed contour). Nothing in the point data itself can tell a shuffled
//! cloud from an ordered one; the caller states the order explicitly through
//! [`PointOrder`] and the analyzer refuses [`PointOrder::Unordered`] input.
//! Feeding a re-ordered cloud labelled as `Contour` silently produces wrong
//! widths and a wrong cut.
use crate::error::{AnalysisError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// How the points of a cloud are arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointOrder {
    /// Points follow the object's boundary; neighbours in index are
    /// neighbours on the outline and the last point closes back to the first.
    Contour,
    /// No ordering guarantee.
    Unordered,
}

/// Ordered, index-addressable sequence of 3-D points.
#[derive(Clone, Debug)]
pub struct PointCloud {
    points: Vec<Point3<f32>>,
    order: PointOrder,
}

impl PointCloud {
    pub fn new(points: Vec<Point3<f32>>, order: PointOrder) -> Self {
        Self { points, order }
    }

    /// Cloud whose points follow the boundary of the object.
    pub fn from_contour(points: Vec<Point3<f32>>) -> Self {
        Self::new(points, PointOrder::Contour)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn order(&self) -> PointOrder {
        self.order
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    /// Checked access used wherever an index comes from outside the stage
    /// that produced it.
    pub fn point(&self, component: &'static str, index: usize) -> Result<&Point3<f32>> {
        self.points.get(index).ok_or(AnalysisError::IndexOutOfRange {
            component,
            index,
            len: self.points.len(),
        })
    }

    /// Returns a snapshot with `p` appended, together with the index of the
    /// new point. `self` is left untouched.
    pub fn with_point(&self, p: Point3<f32>) -> (PointCloud, usize) {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        points.push(p);
        let index = points.len() - 1;
        (
            PointCloud {
                points,
                order: self.order,
            },
            index,
        )
    }

    /// Errors unless the cloud is declared contour-ordered.
    pub fn require_contour(&self) -> Result<()> {
        match self.order {
            PointOrder::Contour => Ok(()),
            PointOrder::Unordered => Err(AnalysisError::NotContourOrdered),
        }
    }

    /// Shortest index distance between `a` and `b` walking around the closed
    /// contour in either direction.
    #[inline]
    pub fn contour_distance(&self, a: usize, b: usize) -> usize {
        contour_distance(self.points.len(), a, b)
    }
}

/// Shortest index distance between `a` and `b` on a closed contour of `n` points.
#[inline]
pub fn contour_distance(n: usize, a: usize, b: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(n.saturating_sub(d))
}
