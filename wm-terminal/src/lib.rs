/// Terminal front end for the wm-core transform library
///
/// Renders a small lit scene as ASCII, driving the model, view and projection
/// matrices from keyboard input every frame.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wm_core::{ControllerInput, Mat4};

pub mod config;
pub mod lighting;
pub mod mesh;
pub mod renderer;
pub mod scene;

pub use config::Args;
pub use renderer::{AsciiRenderer, Shading};
pub use scene::{Action, Scene};

/// Look step per arrow key press, in controller input units
const LOOK_STEP: f32 = 50.0;

/// Rows reserved above the viewport for the status line
const HUD_ROWS: u16 = 1;

const CONTROLS: &str = "WASD move, space/c up/down, arrows look, shift sprint, \
                        +/- zoom, p proj, l/k lights, o orbit, r reset, q quit";

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    renderer: AsciiRenderer,
    pending: ControllerInput,
    view_projection: Mat4,
    status: Option<String>,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mut scene: Scene, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer =
            AsciiRenderer::new(width as usize, height.saturating_sub(HUD_ROWS) as usize);

        scene.camera.aspect_ratio = renderer.aspect_ratio();
        let view_projection = scene.camera.view_projection()?;

        Ok(Self {
            scene,
            renderer,
            pending: ControllerInput::default(),
            view_projection,
            status: None,
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        tracing::info!(
            width = self.renderer.width(),
            height = self.renderer.height(),
            "terminal renderer started"
        );

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        tracing::info!("terminal renderer stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = (frame_start - previous).as_secs_f32();
            previous = frame_start;

            // Drain every pending event before updating
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update(dt);
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
            Event::Key(key) => {
                if let Some(action) = map_key(key) {
                    tracing::debug!(?action, "input");
                    self.running = self.scene.apply(action, &mut self.pending);
                }
            }
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(HUD_ROWS) as usize);
                self.scene.camera.aspect_ratio = self.renderer.aspect_ratio();
                tracing::info!(width, height, "terminal resized");
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        let input = std::mem::take(&mut self.pending);
        self.scene.update(&input, dt);

        // Keep drawing with the last good matrices if the camera became invalid
        match self.scene.camera.view_projection() {
            Ok(view_projection) => {
                self.view_projection = view_projection;
                self.status = None;
            }
            Err(err) => {
                if self.status.is_none() {
                    tracing::warn!(%err, "camera produced an invalid matrix");
                }
                self.status = Some(err.to_string());
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let scene = &self.scene;
        let lit = Shading::Lit {
            eye: scene.camera.position,
            lights: scene.active_lights(),
            material: &scene.material,
        };
        for object in &scene.objects {
            self.renderer
                .render_mesh(&object.mesh, &object.transform, &self.view_projection, lit);
        }
        for (marker, color) in scene.light_markers() {
            self.renderer.render_mesh(
                &scene.light_marker,
                &marker,
                &self.view_projection,
                Shading::Unlit(color),
            );
        }

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, HUD_ROWS)?;

        // Draw UI overlay
        let camera = &scene.camera;
        let lens = if camera.orthographic {
            format!("ORTHO h={:.1}", camera.ortho_height)
        } else {
            format!("PERSP fov={:.0}", camera.fov)
        };
        let line = match &self.status {
            Some(message) => format!("Camera error: {message}"),
            None => format!(
                "WM | FPS: {:.1} | {} | lights: {} orbit: {} | {}",
                self.fps,
                lens,
                scene.active_lights().len(),
                if scene.orbit { "on" } else { "off" },
                CONTROLS,
            ),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(line),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Decode a key press into a scene action
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let movement = |forward: f32, right: f32, up: f32, sprint: bool| Action::Move {
        forward,
        right,
        up,
        sprint,
    };

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up => Some(Action::Look(0.0, -LOOK_STEP)),
        KeyCode::Down => Some(Action::Look(0.0, LOOK_STEP)),
        KeyCode::Left => Some(Action::Look(-LOOK_STEP, 0.0)),
        KeyCode::Right => Some(Action::Look(LOOK_STEP, 0.0)),
        KeyCode::Char(c) => {
            let sprint = c.is_ascii_uppercase() || key.modifiers.contains(KeyModifiers::SHIFT);
            match c.to_ascii_lowercase() {
                'q' => Some(Action::Quit),
                'w' => Some(movement(1.0, 0.0, 0.0, sprint)),
                's' => Some(movement(-1.0, 0.0, 0.0, sprint)),
                'a' => Some(movement(0.0, -1.0, 0.0, sprint)),
                'd' => Some(movement(0.0, 1.0, 0.0, sprint)),
                ' ' => Some(movement(0.0, 0.0, 1.0, sprint)),
                'c' => Some(movement(0.0, 0.0, -1.0, sprint)),
                '+' | '=' => Some(Action::Zoom(1.0)),
                '-' | '_' => Some(Action::Zoom(-1.0)),
                'p' => Some(Action::ToggleOrthographic),
                'o' => Some(Action::ToggleOrbit),
                'l' => Some(Action::AddLight),
                'k' => Some(Action::RemoveLight),
                'r' => Some(Action::ResetCamera),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_movement_and_sprint() {
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(Action::Move {
                forward: 1.0,
                right: 0.0,
                up: 0.0,
                sprint: false
            })
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(Action::Move {
                forward: 0.0,
                right: 1.0,
                up: 0.0,
                sprint: true
            })
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'))),
            Some(Action::Move {
                forward: 0.0,
                right: 0.0,
                up: -1.0,
                sprint: false
            })
        );
    }

    #[test]
    fn test_look_and_toggles() {
        assert_eq!(map_key(press(KeyCode::Left)), Some(Action::Look(-LOOK_STEP, 0.0)));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Action::ToggleOrthographic));
        assert_eq!(map_key(press(KeyCode::Char('+'))), Some(Action::Zoom(1.0)));
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char('w'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
