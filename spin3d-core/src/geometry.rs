//! Mesh, vertex and face geometry
use nalgebra::{Point2, Point3, Vector3};

use crate::color::Rgb;
use crate::view::{rotate, RotationState, Viewport};
use crate::visibility::sort_faces;

/// A vertex: object-space position plus per-frame caches.
///
/// `rotated` and `screen` are recomputed by `Mesh::set_screen_position`
/// every time the rotation angles change and must not be read before the
/// first recomputation.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub rotated: Vector3<f64>,
    pub screen: Point2<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            rotated: Vector3::zeros(),
            screen: Point2::origin(),
        }
    }
}

/// A triangle face: three indices into the owning mesh's vertex list,
/// fixed after construction, plus per-frame depth and normal caches and
/// an optional base color carried from the source data.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub v: [usize; 3],
    /// Depth: sum of the three rotated z coordinates.
    pub z: f64,
    /// Unit normal of the face in rotated space.
    pub normal: Vector3<f64>,
    pub color: Option<Rgb>,
}

impl Face {
    pub fn new(v: [usize; 3], color: Option<Rgb>) -> Self {
        Self {
            v,
            z: 0.0,
            normal: Vector3::zeros(),
            color,
        }
    }
}

/// A 3D mesh: a vertex arena and faces indexing into it.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) {
        self.vertices.push(Vertex::new(x, y, z));
    }

    /// Add a face over existing vertices. An out-of-range index is a
    /// data-integrity error and is rejected, never clamped.
    pub fn add_face(&mut self, v: [usize; 3], color: Option<Rgb>) -> Result<(), String> {
        for &i in &v {
            if i >= self.vertices.len() {
                return Err(format!(
                    "face vertex index {} out of range (mesh has {} vertices)",
                    i,
                    self.vertices.len()
                ));
            }
        }
        self.faces.push(Face::new(v, color));
        Ok(())
    }

    /// Recenter and uniformly rescale the vertices so the longest
    /// bounding-box axis maps to length 2, centered at the origin.
    ///
    /// Called after vertex construction and before face construction.
    pub fn normalize(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for vertex in &self.vertices {
            min = min.inf(&vertex.position.coords);
            max = max.sup(&vertex.position.coords);
        }

        let extent = max - min;
        let size = extent.x.max(extent.y).max(extent.z);
        if size == 0.0 {
            return;
        }

        let center = (min + max) / 2.0;
        for vertex in &mut self.vertices {
            vertex.position = Point3::from((vertex.position.coords - center) / size * 2.0);
        }
    }

    /// One geometry pass: rotate and project every vertex, recompute each
    /// face's depth and unit normal, then depth-sort the faces ascending
    /// (farthest first, for painter's-algorithm drawing).
    pub fn set_screen_position(&mut self, rotation: &RotationState, viewport: &Viewport) {
        for vertex in &mut self.vertices {
            vertex.rotated = rotate(&vertex.position, rotation.theta, rotation.phi);
            vertex.screen = viewport.project(&vertex.rotated);
        }

        for face in &mut self.faces {
            let [v0, v1, v2] = face.v;
            let r0 = self.vertices[v0].rotated;
            let r1 = self.vertices[v1].rotated;
            let r2 = self.vertices[v2].rotated;

            face.z = r0.z + r1.z + r2.z;

            // Zero-area faces get the zero normal instead of NaN.
            let raw = (r1 - r0).cross(&(r2 - r0));
            let len = raw.norm();
            face.normal = if len == 0.0 { Vector3::zeros() } else { raw / len };
        }

        sort_faces(&mut self.faces);
    }

    /// The projected screen triangle of a face.
    pub fn screen_triangle(&self, face: &Face) -> [Point2<f64>; 3] {
        [
            self.vertices[face.v[0]].screen,
            self.vertices[face.v[1]].screen,
            self.vertices[face.v[2]].screen,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_viewport() -> Viewport {
        Viewport::new(Point2::origin(), 1.0)
    }

    fn bounding_box(mesh: &Mesh) -> (Vector3<f64>, Vector3<f64>) {
        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for v in &mesh.vertices {
            min = min.inf(&v.position.coords);
            max = max.sup(&v.position.coords);
        }
        (min, max)
    }

    #[test]
    fn test_normalize_longest_axis_is_two() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(10.0, 20.0, 30.0);
        mesh.add_vertex(14.0, 21.0, 30.5);
        mesh.add_vertex(12.0, 19.0, 29.0);
        mesh.normalize();

        let (min, max) = bounding_box(&mesh);
        let extent = max - min;
        let longest = extent.x.max(extent.y).max(extent.z);
        assert!((longest - 2.0).abs() < 1e-12);

        let center = (min + max) / 2.0;
        assert!(center.norm() < 1e-12);
    }

    #[test]
    fn test_normalize_empty_and_degenerate() {
        let mut mesh = Mesh::new();
        mesh.normalize();
        assert!(mesh.vertices.is_empty());

        let mut point = Mesh::new();
        point.add_vertex(5.0, 5.0, 5.0);
        point.normalize();
        // Zero extent: positions are left as they are.
        assert_eq!(point.vertices[0].position, Point3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_add_face_rejects_out_of_range_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        assert!(mesh.add_face([0, 1, 2], None).is_err());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_ccw_triangle_normal_points_at_viewer() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face([0, 1, 2], None).unwrap();

        mesh.set_screen_position(&RotationState::default(), &unit_viewport());
        let n = mesh.faces[0].normal;
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_face_depth_is_rotated_z_sum() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 1.0);
        mesh.add_vertex(1.0, 0.0, 2.0);
        mesh.add_vertex(0.0, 1.0, 3.0);
        mesh.add_face([0, 1, 2], None).unwrap();

        mesh.set_screen_position(&RotationState::default(), &unit_viewport());
        assert!((mesh.faces[0].z - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_face_gets_zero_normal() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 1.0, 1.0);
        mesh.add_vertex(2.0, 2.0, 2.0);
        mesh.add_face([0, 1, 2], None).unwrap();

        mesh.set_screen_position(&RotationState::default(), &unit_viewport());
        assert_eq!(mesh.faces[0].normal, Vector3::zeros());
        assert!(mesh.faces[0].normal.x.is_finite());
    }

    #[test]
    fn test_geometry_pass_is_idempotent() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.5);
        mesh.add_vertex(0.0, 1.0, -0.5);
        mesh.add_vertex(1.0, 1.0, 0.0);
        mesh.add_face([0, 1, 2], None).unwrap();
        mesh.add_face([1, 3, 2], None).unwrap();

        let rotation = RotationState::new(0.7, -0.2);
        let viewport = Viewport::new(Point2::new(224.0, 224.0), 134.4);

        mesh.set_screen_position(&rotation, &viewport);
        let first: Vec<_> = mesh.faces.iter().map(|f| (f.v, f.z, f.normal)).collect();
        let screens: Vec<_> = mesh.vertices.iter().map(|v| v.screen).collect();

        mesh.set_screen_position(&rotation, &viewport);
        let second: Vec<_> = mesh.faces.iter().map(|f| (f.v, f.z, f.normal)).collect();

        assert_eq!(first, second);
        for (a, b) in screens.iter().zip(mesh.vertices.iter().map(|v| v.screen)) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_faces_sorted_back_to_front() {
        let mut mesh = Mesh::new();
        // Two triangles at different depths.
        for z in [1.0, -1.0] {
            let base = mesh.vertices.len();
            mesh.add_vertex(0.0, 0.0, z);
            mesh.add_vertex(1.0, 0.0, z);
            mesh.add_vertex(0.0, 1.0, z);
            mesh.add_face([base, base + 1, base + 2], None).unwrap();
        }

        mesh.set_screen_position(&RotationState::default(), &unit_viewport());
        for pair in mesh.faces.windows(2) {
            assert!(pair[0].z <= pair[1].z);
        }
        assert!((mesh.faces[0].z - -3.0).abs() < 1e-12);
    }
}
