//! Full-screen Gemini API key prompt.
//!
//! Shown at startup when no key is stored, and again whenever the key
//! is removed or rejected. Input is masked; the raw value never touches
//! the screen or the logs.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// What the key entry screen resolved to on a given input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEntryOutcome {
    /// User submitted a non-empty key.
    Submitted(String),
    /// User backed out; only offered when a key is already stored.
    Cancelled,
}

pub struct KeyEntryState {
    buffer: InputBuffer,
    /// Whether a key already exists, making Esc a valid exit.
    pub can_cancel: bool,
    error: Option<String>,
}

impl KeyEntryState {
    pub fn new(can_cancel: bool) -> Self {
        Self {
            buffer: InputBuffer::masked(),
            can_cancel,
            error: None,
        }
    }

    /// Handle a terminal event. Returns an outcome when the screen is
    /// done, `None` while editing continues.
    pub fn handle_input(&mut self, event: &Event) -> Option<KeyEntryOutcome> {
        match event {
            Event::Paste(text) => {
                self.buffer.insert_str(text.trim());
                self.error = None;
                None
            }
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Enter => {
                    let key = self.buffer.text().trim().to_string();
                    if key.is_empty() {
                        self.error = Some("API key cannot be empty".to_string());
                        None
                    } else {
                        self.buffer.clear();
                        self.error = None;
                        Some(KeyEntryOutcome::Submitted(key))
                    }
                }
                KeyCode::Esc if self.can_cancel => {
                    self.buffer.clear();
                    self.error = None;
                    Some(KeyEntryOutcome::Cancelled)
                }
                KeyCode::Char(c) => {
                    self.buffer.insert_char(*c);
                    self.error = None;
                    None
                }
                KeyCode::Backspace => {
                    self.buffer.backspace();
                    None
                }
                KeyCode::Delete => {
                    self.buffer.delete();
                    None
                }
                KeyCode::Left => {
                    self.buffer.move_left();
                    None
                }
                KeyCode::Right => {
                    self.buffer.move_right();
                    None
                }
                KeyCode::Home => {
                    self.buffer.move_home();
                    None
                }
                KeyCode::End => {
                    self.buffer.move_end();
                    None
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [box_area] = Layout::horizontal([Constraint::Length(64)])
            .flex(Flex::Center)
            .areas(area);
        let [box_area] = Layout::vertical([Constraint::Length(9)])
            .flex(Flex::Center)
            .areas(box_area);

        let mut lines = vec![
            Line::styled("Enter your Gemini API key to continue.", theme::text()),
            Line::raw(""),
            Line::styled(format!("  {}█", self.buffer.display()), theme::accent()),
            Line::raw(""),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::styled(error.clone(), theme::error_text()));
        } else {
            lines.push(Line::styled(
                "The key is stored locally in your system keychain and",
                theme::muted(),
            ));
            lines.push(Line::styled(
                "sent only to Google's Gemini API.",
                theme::muted(),
            ));
        }
        lines.push(Line::raw(""));
        let hint = if self.can_cancel {
            "Enter saves · Esc keeps the current key"
        } else {
            "Enter saves"
        };
        lines.push(Line::styled(hint, theme::dim()));

        let block = theme::block_focused("API Key Required");
        frame.render_widget(Paragraph::new(lines).block(block), box_area);
    }
}
