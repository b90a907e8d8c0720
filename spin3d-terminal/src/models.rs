//! Built-in static demo models
use spin3d_core::StaticModel;

/// An octahedron: six vertices on the axes, eight faces.
pub fn octahedron() -> StaticModel {
    StaticModel {
        vertices: vec![
            -1.0, 0.0, 0.0, // left
            0.0, 1.0, 0.0, // top
            0.0, 0.0, -1.0, // back
            1.0, 0.0, 0.0, // right
            0.0, 0.0, 1.0, // front
            0.0, -1.0, 0.0, // bottom
        ],
        faces: vec![
            2, 5, 3, 2, 1, 5, 2, 3, 1, 4, 3, 5, 1, 6, 5, 5, 6, 4, 4, 6, 3, 3, 6, 1,
        ],
    }
}

/// An axis-aligned box, off-center in object space (the normalization
/// pass recenters it).
pub fn cube() -> StaticModel {
    StaticModel {
        vertices: vec![
            90.430107, 55.5, -199.239578, //
            -20.569866, 55.5, -199.239578, //
            90.430107, 55.5, -88.239563, //
            -20.569866, 55.5, -88.239563, //
            90.430107, -55.5, -88.239563, //
            -20.569866, -55.5, -88.239563, //
            90.430107, -55.5, -199.239578, //
            -20.569866, -55.5, -199.239578,
        ],
        faces: vec![
            2, 4, 3, 2, 3, 1, 4, 6, 5, 4, 5, 3, 6, 8, 7, 6, 7, 5, 8, 2, 1, 8, 1, 7, 8, 6, 4, 8,
            4, 2, 1, 3, 5, 1, 5, 7,
        ],
    }
}
