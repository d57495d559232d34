/// Terminal front-end: drives the point-cloud pipeline once per tick
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use pointfield_core::{Canvas, CrateAnimation, FrameStats, RenderConfig, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Object and image driven by the crate animation
const CRATE_OBJECT: usize = 0;
const CRATE_IMAGE: usize = 0;

/// Pointer drag state between ticks, in terminal cells
#[derive(Debug, Default)]
struct Drag {
    active: bool,
    last: Option<(u16, u16)>,
    delta: (f32, f32),
}

impl Drag {
    fn moved(&mut self, column: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last {
            self.delta.0 += column as f32 - last_col as f32;
            // Terminal rows grow downwards
            self.delta.1 += last_row as f32 - row as f32;
        }
        self.last = Some((column, row));
    }

    /// Movement since the previous tick while the button is held
    fn take(&mut self) -> Option<(f32, f32)> {
        let delta = std::mem::take(&mut self.delta);
        self.active.then_some(delta)
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: RenderConfig,
    scene: Scene,
    canvas: Canvas,
    animation: CrateAnimation,
    animate: bool,
    renderer: AsciiRenderer,
    drag: Drag,
    running: bool,
    frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    /// `animate` selects whether the crate animation rewrites object 0 every
    /// tick; a scene loaded from a script is drawn as is.
    pub fn new(config: RenderConfig, scene: Scene, animate: bool, fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);

        Ok(Self {
            config,
            scene,
            canvas,
            animation: CrateAnimation::new(),
            animate,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            drag: Drag::default(),
            running: true,
            frame_time: Duration::from_millis(1000 / fps.max(1) as u64),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
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
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.running = false;
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.drag.active = true;
                    self.drag.last = Some((column, row));
                }
                MouseEventKind::Up(MouseButton::Left) => self.drag.active = false,
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    self.drag.moved(column, row)
                }
                MouseEventKind::ScrollUp => self.animation.zoom_in(),
                MouseEventKind::ScrollDown => self.animation.zoom_out(),
                _ => {}
            },
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.animate {
            self.animation.tick(self.drag.take());
            self.animation.apply(&mut self.scene, CRATE_OBJECT, CRATE_IMAGE);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.canvas.clear();
        self.stats = self.canvas.render(&self.scene, &self.config);
        self.renderer.sample(&self.canvas);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Pointfield | FPS: {:.1} | Points: {}/{} | Drag=Rotate Wheel=Zoom Q=Quit",
                self.fps, self.stats.plotted, self.stats.samples
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_accumulates_until_taken() {
        let mut drag = Drag::default();
        drag.active = true;
        drag.last = Some((10, 10));
        drag.moved(12, 9);
        drag.moved(13, 7);
        assert_eq!(drag.take(), Some((3.0, 3.0)));
        assert_eq!(drag.take(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_drag_ignored_when_released() {
        let mut drag = Drag::default();
        drag.moved(1, 1);
        drag.moved(5, 1);
        assert_eq!(drag.take(), None);
    }
}
