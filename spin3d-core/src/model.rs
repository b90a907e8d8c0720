//! Mesh source data decoding
//!
//! Two encodings are consumed: flat static models (vertex triples plus
//! 1-based face index triples) and animated JSON model documents carrying
//! morph-target snapshots, 8-wide face records and optional per-face
//! colors. Both produce a normalized `Mesh`.
use serde::Deserialize;

use crate::color::{color_hex_string, Rgb};
use crate::geometry::Mesh;

/// First value of an 8-wide face record that marks a plain triangle.
/// Records with any other marker are format padding and are skipped.
const TRIANGLE_MARKER: i64 = 10;

/// Width of one face record in the animated encoding.
const FACE_RECORD_LEN: usize = 8;

/// A static model: flat vertex triples plus 1-based face index triples.
#[derive(Debug, Clone)]
pub struct StaticModel {
    pub vertices: Vec<f64>,
    pub faces: Vec<u32>,
}

/// The JSON document an animated model is fetched as. Either `vertices`
/// or `morphTargets` carries positions; `faces` is the 8-wide record
/// stream; `morphColors` optionally carries one RGB triple per face with
/// channels pre-normalized to 0-1.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub vertices: Option<Vec<f64>>,
    #[serde(rename = "morphTargets", default)]
    pub morph_targets: Option<Vec<MorphTarget>>,
    pub faces: Vec<i64>,
    #[serde(rename = "morphColors", default)]
    pub morph_colors: Option<Vec<MorphColors>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MorphTarget {
    pub vertices: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MorphColors {
    pub colors: Vec<f64>,
}

/// Decoded animated model data: one vertex-position snapshot per frame
/// sharing one fixed face-record list and one fixed color list.
#[derive(Debug, Clone)]
pub struct ModelData {
    frames: Vec<Vec<f64>>,
    faces: Vec<i64>,
    colors: Option<Vec<String>>,
}

impl ModelData {
    /// Parse a JSON model document.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let doc: ModelDocument =
            serde_json::from_str(text).map_err(|e| format!("invalid model document: {}", e))?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: ModelDocument) -> Result<Self, String> {
        let frames = match (doc.morph_targets, doc.vertices) {
            (Some(targets), _) => targets.into_iter().map(|t| t.vertices).collect(),
            (None, Some(vertices)) => vec![vertices],
            (None, None) => {
                return Err("model document has neither vertices nor morphTargets".to_string())
            }
        };

        let data = Self {
            frames,
            faces: doc.faces,
            colors: doc.morph_colors.map(|mc| {
                mc.first().map_or_else(Vec::new, |set| {
                    set.colors
                        .chunks_exact(3)
                        .map(|c| color_hex_string(c[0], c[1], c[2]))
                        .collect()
                })
            }),
        };
        data.validate()?;
        Ok(data)
    }

    /// Topology is frame-invariant: every snapshot must have the same
    /// vertex count and ordering.
    fn validate(&self) -> Result<(), String> {
        if self.frames.is_empty() {
            return Err("model has no animation frames".to_string());
        }
        let len = self.frames[0].len();
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.len() != len {
                return Err(format!(
                    "animation frame {} has {} position values, expected {}",
                    i,
                    frame.len(),
                    len
                ));
            }
        }
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Build the mesh for one animation frame: vertices from the selected
    /// snapshot, normalized, then faces materialized from the 8-wide
    /// records. Only records whose marker is `TRIANGLE_MARKER` become
    /// faces; the rest are skipped, not interpreted. Colors are consumed
    /// positionally by the faces that materialize.
    pub fn build_mesh(&self, frame: usize) -> Result<Mesh, String> {
        let positions = self
            .frames
            .get(frame)
            .ok_or_else(|| format!("animation frame {} out of range", frame))?;

        let mut mesh = Mesh::new();
        for p in positions.chunks_exact(3) {
            mesh.add_vertex(p[0], p[1], p[2]);
        }
        mesh.normalize();

        let mut color_index = 0;
        for record in self.faces.chunks_exact(FACE_RECORD_LEN) {
            if record[0] != TRIANGLE_MARKER {
                continue;
            }

            let mut v = [0usize; 3];
            for (slot, &raw) in v.iter_mut().zip(&record[1..4]) {
                *slot = usize::try_from(raw)
                    .map_err(|_| format!("negative face vertex index {}", raw))?;
            }

            let color = match &self.colors {
                Some(colors) => {
                    let hex = colors.get(color_index).ok_or_else(|| {
                        format!("missing color for face {}", color_index)
                    })?;
                    color_index += 1;
                    Some(Rgb::from_hex(hex)?)
                }
                None => None,
            };

            mesh.add_face(v, color)?;
        }

        Ok(mesh)
    }
}

/// Build one mesh from a set of static models, concatenated with a running
/// vertex-index offset. Face indices are 1-based in this encoding.
pub fn build_static_mesh(models: &[&StaticModel]) -> Result<Mesh, String> {
    let mut mesh = Mesh::new();
    for model in models {
        for p in model.vertices.chunks_exact(3) {
            mesh.add_vertex(p[0], p[1], p[2]);
        }
    }
    mesh.normalize();

    let mut offset = 0;
    for model in models {
        for t in model.faces.chunks_exact(3) {
            let mut v = [0usize; 3];
            for (slot, &raw) in v.iter_mut().zip(t) {
                if raw == 0 {
                    return Err("face vertex index 0 in 1-based static mesh".to_string());
                }
                *slot = raw as usize - 1 + offset;
            }
            mesh.add_face(v, None)?;
        }
        offset += model.vertices.len() / 3;
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octahedron() -> StaticModel {
        StaticModel {
            vertices: vec![
                -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
                0.0, -1.0, 0.0,
            ],
            faces: vec![
                2, 5, 3, 2, 1, 5, 2, 3, 1, 4, 3, 5, 1, 6, 5, 5, 6, 4, 4, 6, 3, 3, 6, 1,
            ],
        }
    }

    #[test]
    fn test_static_mesh_build() {
        let model = octahedron();
        let mesh = build_static_mesh(&[&model]).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.faces.len(), 8);
        // 1-based face (2, 5, 3) becomes indices (1, 4, 2).
        assert_eq!(mesh.faces[0].v, [1, 4, 2]);
    }

    #[test]
    fn test_static_mesh_concatenation_offsets_indices() {
        let a = octahedron();
        let b = octahedron();
        let mesh = build_static_mesh(&[&a, &b]).unwrap();
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.faces.len(), 16);
        // The second model's faces index past the first model's vertices.
        assert_eq!(mesh.faces[8].v, [7, 10, 8]);
    }

    #[test]
    fn test_static_mesh_rejects_zero_index() {
        let model = StaticModel {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            faces: vec![0, 1, 2],
        };
        assert!(build_static_mesh(&[&model]).is_err());
    }

    #[test]
    fn test_static_mesh_rejects_out_of_range_index() {
        let model = StaticModel {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            faces: vec![1, 2, 9],
        };
        assert!(build_static_mesh(&[&model]).is_err());
    }

    fn animated_document() -> ModelDocument {
        ModelDocument {
            vertices: None,
            morph_targets: Some(vec![
                MorphTarget {
                    vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0],
                },
                MorphTarget {
                    vertices: vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0],
                },
            ]),
            faces: vec![
                10, 0, 1, 2, 0, 9, 9, 9, // triangle
                5, 1, 2, 3, 0, 9, 9, 9, // wrong marker: skipped
                10, 1, 3, 2, 0, 9, 9, 9, // triangle
            ],
            morph_colors: Some(vec![MorphColors {
                colors: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            }]),
        }
    }

    #[test]
    fn test_animated_mesh_skips_non_triangle_records() {
        let data = ModelData::from_document(animated_document()).unwrap();
        let mesh = data.build_mesh(0).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.faces[0].v, [0, 1, 2]);
        assert_eq!(mesh.faces[1].v, [1, 3, 2]);
    }

    #[test]
    fn test_animated_mesh_colors_follow_materialized_faces() {
        let data = ModelData::from_document(animated_document()).unwrap();
        let mesh = data.build_mesh(0).unwrap();
        // The skipped record consumes no color.
        assert_eq!(mesh.faces[0].color, Some(Rgb::new(255, 0, 0)));
        assert_eq!(mesh.faces[1].color, Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_frame_count_and_out_of_range_frame() {
        let data = ModelData::from_document(animated_document()).unwrap();
        assert_eq!(data.frame_count(), 2);
        assert!(data.is_animated());
        assert!(data.build_mesh(2).is_err());
    }

    #[test]
    fn test_frames_share_topology() {
        let data = ModelData::from_document(animated_document()).unwrap();
        let a = data.build_mesh(0).unwrap();
        let b = data.build_mesh(1).unwrap();
        assert_eq!(a.vertices.len(), b.vertices.len());
        let faces_a: Vec<_> = a.faces.iter().map(|f| f.v).collect();
        let faces_b: Vec<_> = b.faces.iter().map(|f| f.v).collect();
        assert_eq!(faces_a, faces_b);
    }

    #[test]
    fn test_mismatched_frame_lengths_rejected() {
        let doc = ModelDocument {
            vertices: None,
            morph_targets: Some(vec![
                MorphTarget { vertices: vec![0.0, 0.0, 0.0] },
                MorphTarget { vertices: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0] },
            ]),
            faces: vec![],
            morph_colors: None,
        };
        assert!(ModelData::from_document(doc).is_err());
    }

    #[test]
    fn test_document_without_positions_rejected() {
        let doc = ModelDocument {
            vertices: None,
            morph_targets: None,
            faces: vec![],
            morph_colors: None,
        };
        assert!(ModelData::from_document(doc).is_err());
    }

    #[test]
    fn test_from_json() {
        let text = r#"{
            "vertices": [0, 0, 0, 2, 0, 0, 0, 2, 0],
            "faces": [10, 0, 1, 2, 0, 0, 0, 0]
        }"#;
        let data = ModelData::from_json(text).unwrap();
        assert_eq!(data.frame_count(), 1);
        assert!(!data.is_animated());
        let mesh = data.build_mesh(0).unwrap();
        assert_eq!(mesh.faces.len(), 1);
        assert!(mesh.faces[0].color.is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ModelData::from_json("not json").is_err());
    }
}
