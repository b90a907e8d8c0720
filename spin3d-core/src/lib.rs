//! spin3d core library - the transform/visibility/shading pipeline
//!
//! This library provides the stateless core of the renderer: the composite
//! rotation and projection math, mesh decoding and normalization, per-face
//! depth/normal geometry, painter's-algorithm ordering, backface culling
//! and the HSV/RGB color derivation, plus the scene orchestrator that ties
//! them to a drawing surface.

pub mod color;
pub mod geometry;
pub mod model;
pub mod scene;
pub mod view;
pub mod visibility;

// Re-export commonly used types
pub use color::{hsv_to_rgb, rgb_to_hsv, Hsv, Rgb};
pub use geometry::{Face, Mesh, Vertex};
pub use model::{ModelData, StaticModel};
pub use scene::{
    Animator, Axis, AxisCube, Canvas, InputEvent, ModelObject, RenderOptions, Renderable, Scene,
};
pub use view::{rotate, RotationState, Viewport};
pub use visibility::CullMode;
