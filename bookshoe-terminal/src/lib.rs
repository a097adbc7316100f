/// Terminal book shoe designer: live ASCII preview plus a settings editor
use bookshoe_core::{Camera, Designer, Field, RotationState, SettingsStore, StlFormat, Transform};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::fs;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub mod renderer;
pub mod store;

pub use renderer::AsciiRenderer;
pub use store::FileStore;

/// Rows reserved at the top of the screen for the overlay
const OVERLAY_ROWS: u16 = 3;

const STL_FILE: &str = "model.stl";
const SETTINGS_FILE: &str = "settings.json";

/// Main application struct for the terminal designer
pub struct TerminalApp<S: SettingsStore> {
    designer: Designer<S>,
    out_dir: PathBuf,
    rotation: RotationState,
    renderer: AsciiRenderer,
    selected: usize,
    spinning: bool,
    status: String,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl<S: SettingsStore> TerminalApp<S> {
    pub fn new(designer: Designer<S>, out_dir: PathBuf) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            designer,
            out_dir,
            rotation: RotationState::new(0.5, -0.6, 0.0),
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(OVERLAY_ROWS) as usize),
            selected: 0,
            spinning: true,
            status: String::from("Tab: field  +/-: edit  v: variant  x: STL  p/i: settings  0: reset"),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Update
            if self.spinning {
                self.rotation.rotate(0.0, 0.01, 0.0);
            }

            // Render
            self.render()?;

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

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(
                    width as usize,
                    height.saturating_sub(OVERLAY_ROWS) as usize,
                );
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.rotation.rotate(0.1, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.rotation.rotate(-0.1, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.rotation.rotate(0.0, -0.1, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.rotation.rotate(0.0, 0.1, 0.0);
            }
            KeyCode::Char('e') => {
                self.rotation.rotate(0.0, 0.0, 0.1);
            }
            KeyCode::Char('r') => {
                self.rotation.rotate(0.0, 0.0, -0.1);
            }
            KeyCode::Char(' ') => {
                self.spinning = !self.spinning;
            }
            KeyCode::Tab => {
                self.selected = (self.selected + 1) % self.fields().len();
            }
            KeyCode::BackTab => {
                let count = self.fields().len();
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge(1.0),
            KeyCode::Char('-') => self.nudge(-1.0),
            KeyCode::Char(']') => self.nudge(0.1),
            KeyCode::Char('[') => self.nudge(-0.1),
            KeyCode::Char('v') => {
                self.designer.set_variant(self.designer.variant().next());
                self.selected = 0;
                self.status = format!("Switched to {}", self.designer.variant().label());
            }
            KeyCode::Char('x') => self.export_stl(StlFormat::Binary),
            KeyCode::Char('X') => self.export_stl(StlFormat::Ascii),
            KeyCode::Char('p') => self.export_settings(),
            KeyCode::Char('i') => self.import_settings(),
            KeyCode::Char('0') => {
                self.designer.reset_to_defaults();
                self.status = String::from("Settings reset to defaults");
            }
            _ => {}
        }
    }

    pub fn designer(&self) -> &Designer<S> {
        &self.designer
    }

    fn fields(&self) -> &'static [Field] {
        self.designer.variant().fields()
    }

    fn selected_field(&self) -> Field {
        let fields = self.fields();
        fields[self.selected.min(fields.len() - 1)]
    }

    /// Change the selected field by `step` millimetres, never below zero
    fn nudge(&mut self, step: f64) {
        let field = self.selected_field();
        let current = self.designer.settings().get(field).unwrap_or(0.0);
        // Round away float drift from repeated 0.1 steps
        let value = ((current + step) * 1000.0).round() / 1000.0;

        self.status = match self.designer.set_field(field, value.max(0.0)) {
            Ok(()) => format!("{} = {}", field.label(), value.max(0.0)),
            Err(err) => err.to_string(),
        };
    }

    fn export_stl(&mut self, format: StlFormat) {
        let path = self.out_dir.join(STL_FILE);
        let bytes = self.designer.export_mesh(format);
        self.status = match fs::write(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), ?format, "wrote STL");
                format!("Wrote {}", path.display())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to write STL");
                format!("Failed to write {}: {err}", path.display())
            }
        };
    }

    fn export_settings(&mut self) {
        let path = self.out_dir.join(SETTINGS_FILE);
        self.status = match fs::write(&path, self.designer.export_settings()) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to write settings");
                format!("Failed to write {}: {err}", path.display())
            }
        };
    }

    fn import_settings(&mut self) {
        let path = self.out_dir.join(SETTINGS_FILE);
        self.status = match import_file(&mut self.designer, &path) {
            Ok(()) => format!("Imported {}", path.display()),
            Err(message) => message,
        };
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();

        // Clear renderer
        self.renderer.clear();

        if let Some(bounds) = self.designer.mesh().bounds() {
            // Terminal cells are about twice as tall as they are wide
            let camera = Camera::framing(
                &bounds,
                self.renderer.width() as u32,
                self.renderer.height() as u32 * 2,
            );
            let model = Transform::model_matrix(&self.rotation, &bounds.center());
            self.renderer.render_mesh(self.designer.mesh(), &model, &camera);
        }

        // Output to terminal
        queue!(stdout, cursor::MoveTo(0, OVERLAY_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let field = self.selected_field();
        let value = self
            .designer
            .settings()
            .get(field)
            .map(|v| format!("{v} mm"))
            .unwrap_or_else(|| String::from("unset"));
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | {} triangles | FPS: {:.1} | WASD/Arrows=Rotate Space=Spin Q=Quit",
                self.designer.variant().label(),
                self.designer.mesh().triangle_count(),
                self.fps
            )),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Cyan),
            Print(format!("> {}: {}", field.label(), value)),
            cursor::MoveTo(0, 2),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(&self.status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Read a settings file and apply it; the designer is untouched on failure
pub fn import_file<S: SettingsStore>(
    designer: &mut Designer<S>,
    path: &std::path::Path,
) -> Result<(), String> {
    let text = fs::read_to_string(path).map_err(|err| {
        warn!(path = %path.display(), %err, "failed to read settings file");
        format!("Failed to read {}: {err}", path.display())
    })?;

    designer
        .import_settings(&text)
        .map_err(|err| format!("Import failed: {err}"))
}
