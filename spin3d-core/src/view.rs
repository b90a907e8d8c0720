//! Rotation math and view state
use nalgebra::{Point2, Point3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Radians of rotation per pixel of pointer travel.
const DRAG_FACTOR: f64 = 0.01;

/// Rotate an object-space point by yaw `theta` and pitch `phi`.
///
/// This is the composite pitch-into-yaw rotation: the pitch terms are
/// coupled with theta in ry/rz, which is numerically different from a
/// standard Euler matrix product. Callers depend on this exact form.
pub fn rotate(p: &Point3<f64>, theta: f64, phi: f64) -> Vector3<f64> {
    let (x, y, z) = (p.x, p.y, p.z);
    Vector3::new(
        x * theta.cos() + z * theta.sin(),
        x * phi.sin() * theta.sin() + y * phi.cos() - z * phi.sin() * theta.cos(),
        -x * phi.cos() * theta.sin() + y * phi.sin() + z * phi.cos() * theta.cos(),
    )
}

/// User-controlled rotation angles (in radians)
#[derive(Debug, Clone, Copy)]
pub struct RotationState {
    /// Yaw, around the vertical axis. Unbounded.
    pub theta: f64,
    /// Pitch, clamped to [-pi/2, pi/2].
    pub phi: f64,
}

impl RotationState {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Apply a pointer drag delta (in screen pixels).
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.theta += dx * DRAG_FACTOR;
        self.phi = (self.phi + dy * DRAG_FACTOR).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Screen-space projection: a center point and a uniform scale.
///
/// Projection is orthographic; the y axis is inverted because screen y
/// grows downward.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub center: Point2<f64>,
    pub scale: f64,
}

impl Viewport {
    pub fn new(center: Point2<f64>, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Project a rotated point to screen space.
    pub fn project(&self, r: &Vector3<f64>) -> Point2<f64> {
        Point2::new(self.center.x + self.scale * r.x, self.center.y - self.scale * r.y)
    }

    /// The same viewport with its scale multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.center, self.scale * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rotation() {
        let r = rotate(&Point3::new(1.0, 0.0, 0.0), 0.0, 0.0);
        assert!((r - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_angles_pass_through() {
        let p = Point3::new(0.3, -1.7, 2.5);
        let r = rotate(&p, 0.0, 0.0);
        assert!((r - p.coords).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_is_continuous() {
        // Small angle deltas must produce small coordinate deltas.
        let p = Point3::new(1.0, 1.0, 1.0);
        let base = rotate(&p, 0.5, 0.3);
        let eps = 1e-6;
        let nudged = rotate(&p, 0.5 + eps, 0.3 + eps);
        assert!((nudged - base).norm() < 1e-4);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // theta = pi/2 maps +z onto +x.
        let r = rotate(&Point3::new(0.0, 0.0, 1.0), FRAC_PI_2, 0.0);
        assert!((r - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_drag_updates_angles() {
        let mut state = RotationState::new(0.5, 0.3);
        state.drag(10.0, -5.0);
        assert!((state.theta - 0.6).abs() < 1e-12);
        assert!((state.phi - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_drag_clamps_phi() {
        let mut state = RotationState::new(0.0, 0.0);
        state.drag(0.0, 10_000.0);
        assert!((state.phi - FRAC_PI_2).abs() < 1e-12);
        state.drag(0.0, -100_000.0);
        assert!((state.phi + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_projection_inverts_y() {
        let viewport = Viewport::new(Point2::new(224.0, 224.0), 100.0);
        let p = viewport.project(&Vector3::new(1.0, 1.0, 0.0));
        assert!((p.x - 324.0).abs() < 1e-12);
        assert!((p.y - 124.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_viewport() {
        let viewport = Viewport::new(Point2::new(0.0, 0.0), 100.0).scaled(1.2);
        assert!((viewport.scale - 120.0).abs() < 1e-12);
    }
}
