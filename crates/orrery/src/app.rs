use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use orrery_config::Config;
use orrery_core::Bounds;
use orrery_scenes::driver::{self, FrameClock, FrameSource};
use orrery_scenes::{PixelCanvas, SceneOptions, SceneState};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{info, warn};

use crate::login::{FormAction, LoginForm};

const KEY_COLOR: Color = Color::Rgb(102, 126, 234);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Both animations.
    scenes: SceneState,
    /// Terminal pixels the scenes draw into.
    canvas: PixelCanvas,
    clock: FrameClock,
    login: LoginForm,
    show_login: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let options = SceneOptions {
            kind: config.scene,
            speed: config.speed,
            seed: config.seed.unwrap_or_else(clock_seed),
            particles: config.particles,
            solar: config.solar,
        };
        Self {
            running: false,
            scenes: SceneState::new(options, Bounds::default()),
            canvas: PixelCanvas::new(0, 0, config.cell_scale),
            clock: FrameClock::new(config.fps),
            login: LoginForm::new(),
            show_login: config.show_login,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!(seed = self.scenes.seed(), "starting");
        while self.running && self.clock.next_frame().is_some() {
            self.login.poll(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.remember_choices();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.canvas.resize(area.width, area.height);
        driver::step(&mut self.scenes, &mut self.canvas);
        frame.render_widget(&self.canvas, area);

        if self.show_login {
            self.login.render(frame, area);
        }

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(self.help_line(), help_area);
    }

    fn help_line(&self) -> Line<'static> {
        let key = |k: &'static str| k.bold().fg(KEY_COLOR);
        let label = |l: &'static str| l.dark_gray();
        if self.show_login {
            return Line::from(vec![
                key("tab"),
                label(" next field  "),
                key("enter"),
                label(" log in  "),
                key("esc"),
                label(" hide login"),
            ])
            .centered();
        }
        Line::from(vec![
            key("q"),
            label(" quit  "),
            key("s"),
            format!(" {}  ", self.scenes.kind().next().name()).dark_gray(),
            key("a"),
            label(" speed  "),
            key("r"),
            label(" reseed  "),
            key("l"),
            label(" login"),
        ])
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time left before the next frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        while self.running && event::poll(self.clock.time_until_next())? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            // The next frame picks up the new size from the frame area
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) =
            (key.modifiers, key.code)
        {
            self.quit();
            return;
        }

        if self.show_login {
            if self.login.handle_key(key, Instant::now()) == FormAction::Close {
                self.show_login = false;
            }
            return;
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::Char('s')) => self.switch_scene(),
            (_, KeyCode::Char('a')) => self.cycle_speed(),
            (_, KeyCode::Char('r')) => self.scenes.reseed(clock_seed()),
            (_, KeyCode::Char('l')) => self.show_login = true,
            _ => {}
        }
    }

    /// Mouse movement steers the particle field.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let position = self.canvas.cell_center(mouse.column, mouse.row);
            self.scenes.set_pointer(Some(position));
        }
    }

    fn switch_scene(&mut self) {
        self.scenes.set_kind(self.scenes.kind().next());
    }

    fn cycle_speed(&mut self) {
        let speed = self.scenes.speed().next();
        info!(speed = speed.name(), "changing speed");
        self.scenes.set_speed(speed);
    }

    /// Keep the last scene and speed for the next start.
    fn remember_choices(&mut self) {
        if self.config.scene == self.scenes.kind() && self.config.speed == self.scenes.speed() {
            return;
        }
        self.config.scene = self.scenes.kind();
        self.config.speed = self.scenes.speed();
        if let Err(err) = self.config.save() {
            warn!("could not save config: {err:#}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
        self.clock.stop();
    }
}

/// Seed from the wall clock when none is configured.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{AnimationSpeed, SceneKind, Vec2};

    use crate::login::Focus;

    fn app() -> App {
        let mut app = App::new(Config {
            seed: Some(5),
            show_login: false,
            ..Config::default()
        });
        app.running = true;
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn configured_seed_is_used() {
        assert_eq!(app().scenes.seed(), 5);
    }

    #[test]
    fn keys_switch_scene_and_speed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.scenes.kind(), SceneKind::SolarSystem);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.scenes.speed(), AnimationSpeed::Fast);
    }

    #[test]
    fn reseed_picks_a_new_seed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert_ne!(app.scenes.seed(), 5);
    }

    #[test]
    fn escape_closes_login_before_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert!(app.show_login);

        // Typed keys go to the form, not the app
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.login.username(), "q");
        assert_eq!(app.login.focus(), Focus::Username);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_login);
        assert!(app.running);
        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
        assert!(app.clock.is_stopped());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        app.show_login = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn mouse_moves_the_pointer() {
        let mut app = app();
        app.canvas.resize(10, 5);
        app.on_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 2,
            row: 1,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.scenes.pointer().position, Some(app.canvas.cell_center(2, 1)));
        assert_ne!(app.scenes.pointer().position, Some(Vec2::ZERO));
    }
}
