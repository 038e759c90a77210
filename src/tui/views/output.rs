//! Script output view — placeholder, progress, script text, or error.
//!
//! Holds the transient result of the current generation cycle. Each new
//! submission replaces whatever was here; nothing is persisted unless
//! the user saves explicitly.

use std::io::{self, Write};
use std::path::PathBuf;

use base64::Engine;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::request::OutputShell;
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;

const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

const PLACEHOLDER: &str = "Fill in the request and press Ctrl+G.\n\n\
The generated script will appear here with copy (y) and save (s) actions.";

/// Lifecycle of one generation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPhase {
    /// Nothing generated yet this session.
    Empty,
    /// A request is in flight.
    Generating,
    /// Script text ready for display/copy/save.
    Script { text: String, shell: OutputShell },
    /// Human-readable failure description.
    Error(String),
}

pub struct OutputState {
    pub phase: OutputPhase,
    scroll: u16,
    spinner_frame: usize,
}

impl OutputState {
    pub fn new() -> Self {
        Self {
            phase: OutputPhase::Empty,
            scroll: 0,
            spinner_frame: 0,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.phase == OutputPhase::Generating
    }

    /// Enter the in-flight state, discarding the previous result.
    pub fn begin(&mut self) {
        self.phase = OutputPhase::Generating;
        self.scroll = 0;
        self.spinner_frame = 0;
    }

    pub fn set_script(&mut self, text: String, shell: OutputShell) {
        self.phase = OutputPhase::Script { text, shell };
        self.scroll = 0;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.phase = OutputPhase::Error(message.into());
        self.scroll = 0;
    }

    /// Script text, when one is displayed.
    pub fn script(&self) -> Option<&str> {
        match &self.phase {
            OutputPhase::Script { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Advance the spinner; called on every app tick.
    pub fn on_tick(&mut self) {
        if self.is_generating() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    // ── Input handling ──────────────────────────────────────────────────

    /// Handle a terminal event. Returns true if consumed.
    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll = 0;
                true
            }
            KeyCode::Char('y') => {
                self.copy_script(services);
                true
            }
            KeyCode::Char('s') => {
                self.save_script(services);
                true
            }
            _ => false,
        }
    }

    /// Copy the displayed script to the terminal clipboard via OSC 52.
    pub fn copy_script(&self, services: &Services) {
        let Some(text) = self.script() else {
            notify(services, "No script to copy", NotificationLevel::Warning);
            return;
        };
        match write_osc52(text) {
            Ok(()) => notify(services, "Script copied to clipboard", NotificationLevel::Success),
            Err(e) => {
                log::warn!("OSC 52 write failed: {e}");
                notify(services, "Copy failed — try saving instead", NotificationLevel::Error);
            }
        }
    }

    /// Save the displayed script under `<data>/scripts` with a
    /// timestamped, shell-appropriate filename.
    pub fn save_script(&self, services: &Services) {
        let OutputPhase::Script { text, shell } = &self.phase else {
            notify(services, "No script to save", NotificationLevel::Warning);
            return;
        };
        match write_script_file(services.config.data_dir(), text, *shell) {
            Ok(path) => {
                log::info!("Script saved to {}", path.display());
                notify(
                    services,
                    format!("Saved to {}", path.display()),
                    NotificationLevel::Success,
                );
            }
            Err(e) => {
                log::warn!("Failed to save script: {e}");
                notify(services, format!("Save failed: {e}"), NotificationLevel::Error);
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = match &self.phase {
            OutputPhase::Script { shell, .. } => format!("Generated Script — {}", shell.label()),
            _ => "Generated Script".to_string(),
        };
        let block = if focused {
            theme::block_focused(&title)
        } else {
            theme::block_default(&title)
        };

        let paragraph = match &self.phase {
            OutputPhase::Empty => Paragraph::new(PLACEHOLDER)
                .style(theme::dim())
                .wrap(Wrap { trim: false }),
            OutputPhase::Generating => Paragraph::new(vec![
                Line::raw(""),
                Line::styled(
                    format!(
                        "  {} Generating script... this may take a moment.",
                        SPINNER_FRAMES[self.spinner_frame]
                    ),
                    theme::accent(),
                ),
            ]),
            OutputPhase::Script { text, .. } => Paragraph::new(text.as_str())
                .style(theme::text())
                .scroll((self.scroll, 0)),
            OutputPhase::Error(message) => Paragraph::new(message.as_str())
                .style(theme::error_text())
                .wrap(Wrap { trim: false }),
        };

        frame.render_widget(paragraph.block(block), area);
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::new()
    }
}

fn notify(services: &Services, message: impl Into<String>, level: NotificationLevel) {
    let _ = services.event_tx.send(AppEvent::Notification(Notification {
        id: 0, // assigned by AppState
        message: message.into(),
        level,
        ttl_ticks: 40,
    }));
}

/// Emit an OSC 52 clipboard-set sequence. Works in most modern terminal
/// emulators, including over SSH.
fn write_osc52(text: &str) -> io::Result<()> {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]52;c;{payload}\x07")?;
    stdout.flush()
}

fn write_script_file(
    data_dir: PathBuf,
    text: &str,
    shell: OutputShell,
) -> io::Result<PathBuf> {
    let dir = data_dir.join("scripts");
    std::fs::create_dir_all(&dir)?;
    let filename = format!(
        "grant-{}.{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        shell.extension()
    );
    let path = dir.join(filename);
    std::fs::write(&path, text)?;
    Ok(path)
}
