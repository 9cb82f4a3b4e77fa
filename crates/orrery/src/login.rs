//! Demo login panel drawn over the animation.
//!
//! Nothing is authenticated: submitting shows a busy state for two seconds,
//! clears the form and pops up a success dialog.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
};

/// How long a submission stays busy.
pub const SUBMIT_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_MESSAGE: &str = "Login successful! (This is a demo)";

const PANEL_WIDTH: u16 = 40;
const PANEL_HEIGHT: u16 = 12;
const ACCENT: Color = Color::Rgb(102, 126, 234);
const SUBMITTING: Color = Color::Rgb(76, 175, 80);

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Username,
    Password,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Username => Focus::Password,
            Focus::Password => Focus::Button,
            Focus::Button => Focus::Username,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Username => Focus::Button,
            Focus::Password => Focus::Username,
            Focus::Button => Focus::Password,
        }
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting { since: Instant },
    /// Success dialog shown until a key is pressed.
    Dialog,
}

/// What the caller should do after a key reached the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// The form used the key.
    Consumed,
    /// The user asked to hide the form.
    Close,
}

/// The login form.
#[derive(Debug)]
pub struct LoginForm {
    username: String,
    password: String,
    focus: Focus,
    phase: Phase,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: Focus::default(),
            phase: Phase::Editing,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Label on the submit button.
    pub fn button_label(&self) -> &'static str {
        match self.phase {
            Phase::Submitting { .. } => "Logging in...",
            _ => "Login",
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> FormAction {
        match self.phase {
            Phase::Dialog => {
                self.phase = Phase::Editing;
                return FormAction::Consumed;
            }
            Phase::Submitting { .. } => return FormAction::Consumed,
            Phase::Editing => {}
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return FormAction::Close,
            (_, KeyCode::Tab | KeyCode::Down) => self.focus = self.focus.next(),
            (_, KeyCode::BackTab | KeyCode::Up) => self.focus = self.focus.previous(),
            (_, KeyCode::Enter) => self.submit(now),
            (_, KeyCode::Backspace) => {
                if let Some(field) = self.focused_field() {
                    field.pop();
                }
            }
            (modifiers, KeyCode::Char(c))
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(field) = self.focused_field() {
                    field.push(c);
                }
            }
            _ => {}
        }
        FormAction::Consumed
    }

    fn focused_field(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Username => Some(&mut self.username),
            Focus::Password => Some(&mut self.password),
            Focus::Button => None,
        }
    }

    /// Start the fake login.
    pub fn submit(&mut self, now: Instant) {
        if self.phase == Phase::Editing {
            tracing::info!(user = %self.username, "login submitted");
            self.phase = Phase::Submitting { since: now };
        }
    }

    /// Finish a submission once its delay has passed. Returns true on the
    /// call that completes it.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Phase::Submitting { since } = self.phase else {
            return false;
        };
        if now.saturating_duration_since(since) < SUBMIT_DELAY {
            return false;
        }
        self.username.clear();
        self.password.clear();
        self.focus = Focus::Username;
        self.phase = Phase::Dialog;
        true
    }

    /// Render the panel centered in `area`, and the dialog when open.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
        let busy = matches!(self.phase, Phase::Submitting { .. });

        frame.render_widget(Clear, panel);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(ACCENT))
            .title(Line::from(" Login ").bold().centered());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let rows = Layout::vertical([
            Constraint::Length(1), // Spacing
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Button
        ])
        .split(inner);

        let masked = "•".repeat(self.password.chars().count());
        self.render_field(frame, rows[1], "Username", &self.username, Focus::Username, busy);
        self.render_field(frame, rows[2], "Password", &masked, Focus::Password, busy);

        let button_style = if busy {
            Style::new().fg(Color::White).bg(SUBMITTING).bold()
        } else if self.focus == Focus::Button {
            Style::new().fg(Color::White).bg(ACCENT).bold()
        } else {
            Style::new().fg(ACCENT)
        };
        let button = Paragraph::new(format!("[ {} ]", self.button_label()))
            .style(button_style)
            .alignment(Alignment::Center);
        frame.render_widget(button, rows[4]);

        if self.phase == Phase::Dialog {
            render_dialog(frame, area);
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        focus: Focus,
        busy: bool,
    ) {
        let focused = self.focus == focus && !busy;
        let border = if focused {
            Style::new().fg(Color::White)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let text = if busy {
            Style::new().fg(Color::DarkGray)
        } else {
            Style::new().fg(Color::White)
        };
        let cursor = if focused { "▏" } else { "" };
        let field = Paragraph::new(format!("{value}{cursor}"))
            .style(text)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(format!(" {label} ")),
            );
        frame.render_widget(field, area);
    }
}

fn render_dialog(frame: &mut Frame, area: Rect) {
    let width = SUCCESS_MESSAGE.chars().count() as u16 + 6;
    let dialog = centered_rect(width, 5, area);
    frame.render_widget(Clear, dialog);
    let text = vec![
        Line::from(SUCCESS_MESSAGE).bold(),
        Line::from("press any key").dark_gray(),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::new().fg(SUBMITTING)),
    );
    frame.render_widget(paragraph, dialog);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
