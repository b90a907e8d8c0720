//! Frame orchestration: renderable objects, animation and input handling
use nalgebra::{Point2, Point3};

use crate::color::{solid_shade, tinted_shade, Rgb};
use crate::geometry::Mesh;
use crate::model::{build_static_mesh, ModelData, StaticModel};
use crate::view::{rotate, RotationState, Viewport};
use crate::visibility::{is_visible, CullMode};

/// Background clear color (alice blue).
pub const BACKGROUND: Rgb = Rgb::new(240, 248, 255);

/// Outline color for face wireframes.
const OUTLINE: Rgb = Rgb::new(0, 0, 0);

/// Drawing surface contract. The core decides what to draw and in which
/// order; the surface only executes primitives.
pub trait Canvas {
    fn clear(&mut self, background: Rgb);
    fn stroke_line(&mut self, a: Point2<f64>, b: Point2<f64>, color: Rgb);
    fn stroke_triangle(&mut self, triangle: &[Point2<f64>; 3], color: Rgb);
    fn fill_triangle(&mut self, triangle: &[Point2<f64>; 3], color: Rgb);
    fn draw_text(&mut self, x: f64, y: f64, text: &str);
}

/// Anything the scene can render: it can recompute its projected point
/// set from the rotation angles, and draw itself.
pub trait Renderable {
    fn set_screen_position(&mut self, rotation: &RotationState);
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Rotate and project a fixed point list (the axis overlays' geometry).
fn project_points(
    positions: &[Point3<f64>],
    rotation: &RotationState,
    viewport: &Viewport,
) -> Vec<Point2<f64>> {
    positions
        .iter()
        .map(|p| viewport.project(&rotate(p, rotation.theta, rotation.phi)))
        .collect()
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    X,
    Y,
    Z,
}

/// A unit axis segment drawn through the origin.
pub struct Axis {
    positions: [Point3<f64>; 2],
    points: Vec<Point2<f64>>,
    viewport: Viewport,
    style: Rgb,
}

impl Axis {
    pub fn new(direction: AxisDirection, viewport: Viewport, style: Rgb) -> Self {
        let positions = match direction {
            AxisDirection::X => [Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            AxisDirection::Y => [Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            AxisDirection::Z => [Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0)],
        };
        Self {
            positions,
            points: Vec::new(),
            viewport,
            style,
        }
    }
}

impl Renderable for Axis {
    fn set_screen_position(&mut self, rotation: &RotationState) {
        self.points = project_points(&self.positions, rotation, &self.viewport);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.stroke_line(self.points[0], self.points[1], self.style);
    }
}

/// The wireframe cube spanning the normalized model volume.
pub struct AxisCube {
    positions: Vec<Point3<f64>>,
    points: Vec<Point2<f64>>,
    viewport: Viewport,
    style: Rgb,
}

impl AxisCube {
    pub fn new(viewport: Viewport, style: Rgb) -> Self {
        let diff = |f: bool| if f { 1.0 } else { -1.0 };
        let positions = (0..8)
            .map(|i| Point3::new(diff(i % 4 % 3 == 0), diff(i % 4 < 2), diff(i < 4)))
            .collect();
        Self {
            positions,
            points: Vec::new(),
            viewport,
            style,
        }
    }
}

impl Renderable for AxisCube {
    fn set_screen_position(&mut self, rotation: &RotationState) {
        self.points = project_points(&self.positions, rotation, &self.viewport);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for i in 0..4 {
            canvas.stroke_line(self.points[i], self.points[i + 4], self.style);
            canvas.stroke_line(self.points[i], self.points[(i + 1) % 4], self.style);
            canvas.stroke_line(self.points[i + 4], self.points[(i + 1) % 4 + 4], self.style);
        }
    }
}

/// Per-model rendering toggles.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub wireframe: bool,
    pub fill: bool,
    pub colorful: bool,
    pub cull: CullMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wireframe: true,
            fill: true,
            colorful: true,
            cull: CullMode::Winding,
        }
    }
}

/// Where a model object's mesh comes from.
enum ModelSource {
    Static,
    Animated(ModelData),
}

/// A renderable triangulated model, static or morph-animated.
pub struct ModelObject {
    source: ModelSource,
    mesh: Mesh,
    viewport: Viewport,
    pub options: RenderOptions,
}

impl ModelObject {
    /// Build from one or more static models (concatenated into one mesh).
    pub fn from_static(models: &[&StaticModel], viewport: Viewport) -> Result<Self, String> {
        Ok(Self {
            source: ModelSource::Static,
            mesh: build_static_mesh(models)?,
            viewport,
            options: RenderOptions::default(),
        })
    }

    /// Build from an animated model, starting at frame 0.
    pub fn from_animated(data: ModelData, viewport: Viewport) -> Result<Self, String> {
        let mesh = data.build_mesh(0)?;
        Ok(Self {
            source: ModelSource::Animated(data),
            mesh,
            viewport,
            options: RenderOptions::default(),
        })
    }

    pub fn frame_count(&self) -> usize {
        match &self.source {
            ModelSource::Static => 1,
            ModelSource::Animated(data) => data.frame_count(),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.frame_count() > 1
    }

    /// Rebuild the mesh from one animation frame (topology is fixed; only
    /// vertex positions change).
    pub fn set_frame(&mut self, frame: usize) -> Result<(), String> {
        if let ModelSource::Animated(data) = &self.source {
            self.mesh = data.build_mesh(frame)?;
        }
        Ok(())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Renderable for ModelObject {
    fn set_screen_position(&mut self, rotation: &RotationState) {
        self.mesh.set_screen_position(rotation, &self.viewport);
    }

    /// Draw faces in depth order: cull, then outline, then fill.
    fn draw(&self, canvas: &mut dyn Canvas) {
        let opts = &self.options;
        for face in &self.mesh.faces {
            let triangle = self.mesh.screen_triangle(face);

            if !is_visible(face, &triangle, opts.cull) {
                continue;
            }

            if opts.wireframe {
                canvas.stroke_triangle(&triangle, OUTLINE);
            }

            if opts.fill {
                let color = match (opts.colorful, face.color) {
                    (true, Some(base)) => tinted_shade(base, face.normal.z),
                    _ => solid_shade(face.normal.z),
                };
                canvas.fill_triangle(&triangle, color);
            }
        }
    }
}

/// Advances the animation frame index. The frame moves only every
/// `speed * 3` ticks; the tick counter increments on every tick.
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    counter: u64,
    index: usize,
    speed: u32,
}

impl Animator {
    pub fn new(speed: u32) -> Self {
        Self {
            counter: 0,
            index: 0,
            speed: speed.max(1),
        }
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(1);
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.index = 0;
    }

    /// One timer tick. Returns the frame to build when it is time to
    /// advance, otherwise `None`.
    pub fn tick(&mut self, frame_count: usize) -> Option<usize> {
        let due = self.counter % (self.speed as u64 * 3) == 0;
        let frame = if due {
            self.counter = 0;
            let current = self.index;
            self.index = (self.index + 1) % frame_count.max(1);
            Some(current)
        } else {
            None
        };
        self.counter += 1;
        frame
    }
}

/// Input events the orchestrator consumes, in arrival order. Each event is
/// fully processed (recompute + draw decision) before the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Tick,
}

/// The whole interactive scene: model, axis overlays, rotation state and
/// animation. Renders are idempotent given (theta, phi, frame index).
pub struct Scene {
    pub model: ModelObject,
    axes: [Axis; 3],
    axis_cube: AxisCube,
    pub rotation: RotationState,
    pub show_axes: bool,
    pub show_axis_cube: bool,
    pub animator: Animator,
    drag_from: Option<Point2<f64>>,
}

impl Scene {
    pub fn new(model: ModelObject, viewport: Viewport) -> Self {
        // Axes overhang the axis cube a little.
        let axis_viewport = viewport.scaled(1.2);
        Self {
            model,
            axes: [
                Axis::new(AxisDirection::X, axis_viewport, Rgb::new(0, 0, 255)),
                Axis::new(AxisDirection::Y, axis_viewport, Rgb::new(0, 128, 0)),
                Axis::new(AxisDirection::Z, axis_viewport, Rgb::new(255, 0, 0)),
            ],
            axis_cube: AxisCube::new(viewport, Rgb::new(169, 169, 169)),
            rotation: RotationState::new(0.50, 0.30),
            show_axes: true,
            show_axis_cube: true,
            animator: Animator::new(1),
            drag_from: None,
        }
    }

    /// Process one input event. Returns whether a redraw is needed.
    pub fn handle(&mut self, event: InputEvent) -> Result<bool, String> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.drag_from = Some(Point2::new(x, y));
                Ok(false)
            }
            InputEvent::PointerMove { x, y } => match self.drag_from {
                Some(from) => {
                    self.rotation.drag(x - from.x, y - from.y);
                    self.drag_from = Some(Point2::new(x, y));
                    Ok(true)
                }
                None => Ok(false),
            },
            InputEvent::PointerUp => {
                self.drag_from = None;
                Ok(false)
            }
            InputEvent::Tick => {
                if !self.model.is_animated() {
                    return Ok(false);
                }
                if let Some(frame) = self.animator.tick(self.model.frame_count()) {
                    self.model.set_frame(frame)?;
                }
                Ok(true)
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// One render pass: clear, model (recompute then back-to-front draw),
    /// optional axis cube and axes, angle readout.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear(BACKGROUND);

        self.model.set_screen_position(&self.rotation);
        self.model.draw(canvas);

        if self.show_axis_cube {
            self.axis_cube.set_screen_position(&self.rotation);
            self.axis_cube.draw(canvas);
        }

        if self.show_axes {
            for axis in &mut self.axes {
                axis.set_screen_position(&self.rotation);
            }
            for axis in &self.axes {
                axis.draw(canvas);
            }
        }

        canvas.draw_text(
            0.0,
            0.0,
            &format!("theta: {:.2} / phi: {:.2}", self.rotation.theta, self.rotation.phi),
        );
    }
}
