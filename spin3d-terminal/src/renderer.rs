//! Cell-buffer drawing surface for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use spin3d_core::{Canvas, Rgb};
use std::io::Write;

const FILL_CHAR: char = '█';
const LINE_CHAR: char = '•';

/// A terminal drawing surface: one colored character per cell, painted
/// strictly in call order. Visibility is the caller's painter's-algorithm
/// ordering; there is no depth buffer.
pub struct CellCanvas {
    width: usize,
    height: usize,
    chars: Vec<char>,
    colors: Vec<Rgb>,
}

impl CellCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            chars: vec![' '; size],
            colors: vec![Rgb::new(0, 0, 0); size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The character at a cell, for inspection.
    pub fn cell(&self, x: usize, y: usize) -> char {
        self.chars[y * self.width + x]
    }

    fn set(&mut self, x: i32, y: i32, c: char, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.chars[idx] = c;
        self.colors[idx] = color;
    }

    /// Queue the buffer to a writer, one colored character per cell.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.colors[idx];
                writer.queue(SetForegroundColor(Color::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                }))?;
                writer.queue(Print(self.chars[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for CellCanvas {
    fn clear(&mut self, background: Rgb) {
        for c in self.chars.iter_mut() {
            *c = ' ';
        }
        for c in self.colors.iter_mut() {
            *c = background;
        }
    }

    fn stroke_line(&mut self, a: Point2<f64>, b: Point2<f64>, color: Rgb) {
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0);
        let dx = (b.x - a.x) / steps;
        let dy = (b.y - a.y) / steps;
        for i in 0..=(steps as i64) {
            let x = a.x + dx * i as f64;
            let y = a.y + dy * i as f64;
            self.set(x.round() as i32, y.round() as i32, LINE_CHAR, color);
        }
    }

    fn stroke_triangle(&mut self, triangle: &[Point2<f64>; 3], color: Rgb) {
        self.stroke_line(triangle[0], triangle[1], color);
        self.stroke_line(triangle[1], triangle[2], color);
        self.stroke_line(triangle[2], triangle[0], color);
    }

    fn fill_triangle(&mut self, triangle: &[Point2<f64>; 3], color: Rgb) {
        let (v0, v1, v2) = (triangle[0], triangle[1], triangle[2]);

        // Bounding box, clipped to the buffer
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), p)
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set(x, y, FILL_CHAR, color);
                    }
                }
            }
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        let y = y.round() as i32;
        let start = x.round() as i32;
        for (i, c) in text.chars().enumerate() {
            self.set(start + i as i32, y, c, Rgb::new(64, 64, 64));
        }
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
