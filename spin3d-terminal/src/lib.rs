//! Terminal frontend: event loop and input translation
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use spin3d_core::{CullMode, InputEvent, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod models;
pub mod renderer;

pub use renderer::CellCanvas;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    canvas: CellCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            // Leave the bottom row for the status line.
            canvas: CellCanvas::new(width as usize, (height as usize).saturating_sub(1).max(1)),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        // First frame before any input arrives.
        self.render()?;

        while self.running {
            let frame_start = Instant::now();
            let mut redraw = false;

            // Drain pending input; events complete strictly in order.
            while event::poll(Duration::from_millis(0))? {
                redraw |= self.handle_event(event::read()?)?;
            }

            // Timer tick for animated models.
            redraw |= self.dispatch(InputEvent::Tick)?;

            if redraw {
                self.render()?;
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: InputEvent) -> io::Result<bool> {
        self.scene
            .handle(event)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn handle_event(&mut self, event: Event) -> io::Result<bool> {
        match event {
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let (x, y) = (column as f64, row as f64);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.dispatch(InputEvent::PointerDown { x, y })
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        self.dispatch(InputEvent::PointerMove { x, y })
                    }
                    MouseEventKind::Up(MouseButton::Left) => self.dispatch(InputEvent::PointerUp),
                    _ => Ok(false),
                }
            }
            Event::Key(KeyEvent { code, .. }) => Ok(self.handle_key(code)),
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let options = &mut self.scene.model.options;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                false
            }
            KeyCode::Char('w') => {
                options.wireframe = !options.wireframe;
                true
            }
            KeyCode::Char('f') => {
                options.fill = !options.fill;
                true
            }
            KeyCode::Char('c') => {
                options.colorful = !options.colorful;
                true
            }
            KeyCode::Char('k') => {
                options.cull = match options.cull {
                    CullMode::Winding => CullMode::NormalZ,
                    CullMode::NormalZ => CullMode::None,
                    CullMode::None => CullMode::Winding,
                };
                true
            }
            KeyCode::Char('a') => {
                self.scene.show_axes = !self.scene.show_axes;
                true
            }
            KeyCode::Char('b') => {
                self.scene.show_axis_cube = !self.scene.show_axis_cube;
                true
            }
            KeyCode::Char('+') => {
                let speed = self.scene.animator.speed();
                self.scene.animator.set_speed(speed + 1);
                false
            }
            KeyCode::Char('-') => {
                let speed = self.scene.animator.speed();
                self.scene.animator.set_speed(speed.saturating_sub(1));
                false
            }
            _ => false,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.scene.render(&mut self.canvas);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.canvas.draw(&mut stdout)?;

        // Status line on the bottom row.
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.height() as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "spin3d | FPS: {:.1} | drag=rotate w/f/c/k=toggles a/b=axes +/-=speed q=quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
