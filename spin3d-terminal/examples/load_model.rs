//! Example: load and view a JSON morph-target model
//!
//! Usage: cargo run --example load_model -- path/to/model.json

use nalgebra::Point2;
use spin3d_core::{ModelData, ModelObject, Scene, Viewport};
use spin3d_terminal::{models, TerminalApp};
use std::env;
use std::fs;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let (width, height) = crossterm::terminal::size()?;
    let (width, height) = (width as f64, height.saturating_sub(1) as f64);
    let side = width.min(height * 2.0);
    let viewport = Viewport::new(Point2::new(width / 2.0, height / 2.0), side * 0.6 / 2.0);

    let model = if let Some(path) = args.get(1) {
        let text = fs::read_to_string(path)?;
        let data = ModelData::from_json(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        ModelObject::from_animated(data, viewport)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        eprintln!("Usage: {} <model.json>", args[0]);
        eprintln!("\nNo model file provided, using the built-in octahedron...");
        let builtin = models::octahedron();
        ModelObject::from_static(&[&builtin], viewport)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    };

    let mut app = TerminalApp::new(Scene::new(model, viewport))?;
    app.run()
}
