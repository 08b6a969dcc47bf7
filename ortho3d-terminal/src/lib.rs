//! Terminal front end: an interactive viewer for ortho3d scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use ortho3d_core::{Primitive, Scene, SceneConfig, ViewAngles};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TerminalCanvas;

/// A named set of primitives the viewer can switch between
pub struct Model {
    pub name: String,
    pub primitives: Vec<Primitive>,
    /// Radius of a sphere around the origin containing the model
    pub extent: f64,
}

/// Viewer settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Angles the camera starts at
    pub angles: ViewAngles,
    /// Degrees per key press
    pub step_degrees: f64,
    /// Azimuth degrees per frame while spinning
    pub spin_degrees: f64,
    pub target_fps: u64,
    /// Fraction of the shorter canvas side the model should span
    pub fill_ratio: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            angles: ViewAngles::new(15.0, 30.0, 0.0),
            step_degrees: 5.0,
            spin_degrees: 1.0,
            target_fps: 30,
            fill_ratio: 0.8,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene<TerminalCanvas>,
    models: Vec<Model>,
    current: usize,
    angles: ViewAngles,
    config: AppConfig,
    spinning: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(models: Vec<Model>, config: AppConfig) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_canvas(
            TerminalCanvas::new(columns as usize, rows as usize),
            models,
            config,
        ))
    }

    /// Build the app around an existing canvas without touching the terminal.
    pub fn with_canvas(canvas: TerminalCanvas, models: Vec<Model>, config: AppConfig) -> Self {
        let scene = Scene::with_config(
            canvas,
            &SceneConfig {
                angles: Some(config.angles),
                ..SceneConfig::default()
            },
        );
        let mut app = Self {
            scene,
            models,
            current: 0,
            angles: config.angles,
            config,
            spinning: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.show_model(0);
        app
    }

    pub fn scene(&self) -> &Scene<TerminalCanvas> {
        &self.scene
    }

    pub fn angles(&self) -> ViewAngles {
        self.angles
    }

    pub fn set_background(&mut self, color: ortho3d_core::Color) {
        self.scene.canvas_mut().set_background(color);
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.models.get(self.current)
    }

    /// Swap the scene contents for the model at `index`.
    pub fn show_model(&mut self, index: usize) {
        let Some(model) = self.models.get(index) else {
            return;
        };
        self.current = index;
        self.scene.clear();
        for primitive in &model.primitives {
            self.scene.attach(primitive.clone());
        }

        let canvas = self.scene.canvas();
        let side = canvas.columns().min(canvas.rows() * 2).max(1) as f64;
        let scale = 2.0 * model.extent / (self.config.fill_ratio * side);
        debug!("showing {} at {scale} units per pixel", model.name);
        self.scene.set_viewport(0.0, 0.0, scale);
    }

    /// Take over the terminal until the user quits, restoring it afterwards
    /// even when a frame fails.
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let frame_budget = Duration::from_millis(1000 / self.config.target_fps.max(1));

        while self.running {
            let started = Instant::now();

            // At most one key per frame so a held key steps evenly
            if event::poll(Duration::ZERO)? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    self.handle_key(code);
                }
            }

            // Spin, rebuild the camera and repaint in depth order
            self.update();
            self.render()?;

            if let Some(idle) = frame_budget.checked_sub(started.elapsed()) {
                std::thread::sleep(idle);
            }
            self.count_frame();
        }

        Ok(())
    }

    /// Refresh the FPS readout about once a second.
    fn count_frame(&mut self) {
        self.frame_count += 1;
        let window = self.last_frame.elapsed();
        if window.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.last_frame = Instant::now();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let step = self.config.step_degrees;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.angles.rotate(0.0, step, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.angles.rotate(0.0, -step, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.angles.rotate(-step, 0.0, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.angles.rotate(step, 0.0, 0.0),
            KeyCode::Char('e') => self.angles.rotate(0.0, 0.0, step),
            KeyCode::Char('r') => self.angles.rotate(0.0, 0.0, -step),
            KeyCode::Char(' ') => self.spinning = !self.spinning,
            KeyCode::Tab => {
                let next = (self.current + 1) % self.models.len().max(1);
                self.show_model(next);
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.spinning {
            self.angles.rotate(self.config.spin_degrees, 0.0, 0.0);
        }
        self.scene.set_angles(self.angles);
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.scene.canvas().draw(&mut stdout)?;

        // Status line over the top row of cells
        let name = self.current_model().map_or("", |m| m.name.as_str());
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "ortho3d | {} | az {:.0} alt {:.0} roll {:.0} | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll Space=Spin Tab=Model Q=Quit",
                name, self.angles.azimuth, self.angles.altitude, self.angles.roll, self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
