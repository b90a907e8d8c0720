//! spin3d terminal viewer
//!
//! Renders a built-in model or a JSON morph-target model file.
//! Controls:
//!   - Mouse drag: rotate (yaw/pitch)
//!   - w/f/c: wireframe, fill, colorful toggles
//!   - k: cycle culling mode
//!   - a/b: axes, axis cube
//!   - +/-: animation speed
//!   - q/ESC: quit

use clap::{Parser, ValueEnum};
use nalgebra::Point2;
use spin3d_core::{ModelData, ModelObject, Scene, StaticModel, Viewport};
use spin3d_terminal::{models, TerminalApp};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Builtin {
    Octahedron,
    Cube,
}

#[derive(Parser)]
#[command(name = "spin3d-terminal", about = "Software 3D renderer in the terminal")]
struct Args {
    /// JSON model file (morph-target format)
    model: Option<PathBuf>,

    /// Built-in static models shown when no file is given
    #[arg(long, value_enum, value_delimiter = ',', default_value = "octahedron")]
    builtin: Vec<Builtin>,

    /// Animation speed divisor (larger is slower)
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Hide the coordinate axes
    #[arg(long)]
    no_axes: bool,

    /// Hide the axis cube
    #[arg(long)]
    no_cube: bool,
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let (width, height) = crossterm::terminal::size()?;
    let (width, height) = (width as f64, height.saturating_sub(1) as f64);
    // Terminal cells are about twice as tall as wide.
    let side = width.min(height * 2.0);
    let viewport = Viewport::new(
        Point2::new(width / 2.0, height / 2.0),
        side * 0.6 / 2.0,
    );

    let model = match &args.model {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let data = ModelData::from_json(&text).map_err(invalid_data)?;
            ModelObject::from_animated(data, viewport).map_err(invalid_data)?
        }
        None => {
            let builtins: Vec<StaticModel> = args
                .builtin
                .iter()
                .map(|b| match b {
                    Builtin::Octahedron => models::octahedron(),
                    Builtin::Cube => models::cube(),
                })
                .collect();
            let refs: Vec<&StaticModel> = builtins.iter().collect();
            ModelObject::from_static(&refs, viewport).map_err(invalid_data)?
        }
    };

    let mut scene = Scene::new(model, viewport);
    scene.animator.set_speed(args.speed);
    scene.show_axes = !args.no_axes;
    scene.show_axis_cube = !args.no_cube;

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
