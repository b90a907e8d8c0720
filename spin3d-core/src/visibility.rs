//! Backface culling and painter's-algorithm ordering
use nalgebra::Point2;
use std::cmp::Ordering;

use crate::geometry::Face;

/// How hidden faces are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Draw everything.
    None,
    /// Judge front/back by the winding order of the projected triangle.
    #[default]
    Winding,
    /// Judge front/back by the sign of the face normal's z component.
    NormalZ,
}

/// Orientation of three projected points in y-down screen coordinates:
/// -1 for clockwise, +1 for counter-clockwise, 0 for collinear.
pub fn winding(p1: &Point2<f64>, p2: &Point2<f64>, p3: &Point2<f64>) -> i8 {
    let dx2 = p2.x - p1.x;
    let dy2 = p2.y - p1.y;
    let dx3 = p3.x - p1.x;
    let dy3 = p3.y - p1.y;

    if dx2 * dy3 > dx3 * dy2 {
        -1
    } else if dx2 * dy3 < dx3 * dy2 {
        1
    } else {
        0
    }
}

/// Whether a face passes the configured culling test. Collinear (winding 0)
/// triangles are rejected by the winding test along with backfaces.
pub fn is_visible(face: &Face, triangle: &[Point2<f64>; 3], mode: CullMode) -> bool {
    match mode {
        CullMode::None => true,
        CullMode::Winding => winding(&triangle[0], &triangle[1], &triangle[2]) > 0,
        CullMode::NormalZ => face.normal.z >= 0.0,
    }
}

/// Sort faces ascending by depth so nearer faces paint over farther ones.
/// The sort is stable; coincident depths keep their arrival order.
pub fn sort_faces(faces: &mut [Face]) {
    faces.sort_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(Ordering::Equal));
}
