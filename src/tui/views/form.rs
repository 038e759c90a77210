//! Request form view — the seven fields of an access request.
//!
//! Three selects (platform, principal kind, shell), three free-text
//! inputs (principal name, permissions, environment), and a bounded
//! duration stepper. Changing the platform resets the principal kind to
//! that platform's first valid choice, so the selection can never fall
//! outside the platform's allowed set.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::request::{
    AccessRequest, OutputShell, RequestError, TargetPlatform, MAX_DURATION_HOURS,
    MIN_DURATION_HOURS,
};
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Fields in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Platform,
    PrincipalKind,
    PrincipalName,
    Permissions,
    Duration,
    Shell,
    Environment,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Platform,
        FormField::PrincipalKind,
        FormField::PrincipalName,
        FormField::Permissions,
        FormField::Duration,
        FormField::Shell,
        FormField::Environment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Platform => "Target platform",
            FormField::PrincipalKind => "Principal kind",
            FormField::PrincipalName => "Principal name",
            FormField::Permissions => "Required permissions",
            FormField::Duration => "Duration (hours)",
            FormField::Shell => "Output shell",
            FormField::Environment => "Target environment",
        }
    }

    fn is_text(self) -> bool {
        matches!(
            self,
            FormField::PrincipalName | FormField::Permissions | FormField::Environment
        )
    }

    fn next(self) -> FormField {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> FormField {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Form state: current field values plus which field has focus.
pub struct FormState {
    pub platform: TargetPlatform,
    /// Index into `platform.principal_kinds()`. Kept as an index so a
    /// platform change trivially snaps back to the first valid kind.
    kind_index: usize,
    pub principal_name: InputBuffer,
    pub permissions: InputBuffer,
    pub duration_hours: u8,
    pub shell: OutputShell,
    pub environment: InputBuffer,
    pub focused: FormField,
    /// Last validation failure, cleared on the next edit.
    pub error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            platform: TargetPlatform::KubernetesRbac,
            kind_index: 0,
            principal_name: InputBuffer::new(),
            permissions: InputBuffer::new(),
            duration_hours: MIN_DURATION_HOURS,
            shell: OutputShell::Bash,
            environment: InputBuffer::new(),
            focused: FormField::Platform,
            error: None,
        }
    }

    /// Currently selected principal kind — always within the platform's
    /// valid set by construction.
    pub fn principal_kind(&self) -> crate::core::request::PrincipalKind {
        let kinds = self.platform.principal_kinds();
        kinds[self.kind_index.min(kinds.len() - 1)]
    }

    /// Switch platform and reset the principal kind to the platform's
    /// first valid choice.
    pub fn set_platform(&mut self, platform: TargetPlatform) {
        if platform != self.platform {
            self.platform = platform;
            self.kind_index = 0;
        }
    }

    fn cycle_kind(&mut self, forward: bool) {
        let len = self.platform.principal_kinds().len();
        self.kind_index = if forward {
            (self.kind_index + 1) % len
        } else {
            (self.kind_index + len - 1) % len
        };
    }

    /// Snapshot the form into a validated [`AccessRequest`].
    pub fn build_request(&self) -> Result<AccessRequest, RequestError> {
        let request = AccessRequest {
            platform: self.platform,
            principal_kind: self.principal_kind(),
            principal_name: self.principal_name.text().trim().to_string(),
            permissions: self.permissions.text().trim().to_string(),
            duration_hours: self.duration_hours,
            shell: self.shell,
            environment: self.environment.text().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    // ── Input handling ──────────────────────────────────────────────────

    /// Handle a terminal event. Returns true if consumed.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        if let Event::Paste(text) = event {
            if let Some(buffer) = self.focused_buffer() {
                buffer.insert_str(text);
                self.error = None;
            }
            return true;
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        // Field navigation
        match code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.focused = self.focused.next();
                return true;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = self.focused.prev();
                return true;
            }
            _ => {}
        }

        match self.focused {
            FormField::Platform => match code {
                KeyCode::Left => {
                    self.set_platform(self.platform.prev());
                    true
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.set_platform(self.platform.next());
                    true
                }
                _ => false,
            },
            FormField::PrincipalKind => match code {
                KeyCode::Left => {
                    self.cycle_kind(false);
                    true
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.cycle_kind(true);
                    true
                }
                _ => false,
            },
            FormField::Duration => match code {
                KeyCode::Left | KeyCode::Char('-') => {
                    self.duration_hours =
                        self.duration_hours.saturating_sub(1).max(MIN_DURATION_HOURS);
                    true
                }
                KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.duration_hours =
                        self.duration_hours.saturating_add(1).min(MAX_DURATION_HOURS);
                    true
                }
                _ => false,
            },
            FormField::Shell => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.shell = self.shell.next();
                    true
                }
                _ => false,
            },
            _ => self.handle_text_input(*code, *modifiers),
        }
    }

    fn handle_text_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(buffer) = self.focused_buffer() else {
            return false;
        };
        match code {
            KeyCode::Char(c)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                buffer.insert_char(c);
            }
            KeyCode::Backspace => buffer.backspace(),
            KeyCode::Delete => buffer.delete(),
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_home(),
            KeyCode::End => buffer.move_end(),
            _ => return false,
        }
        self.error = None;
        true
    }

    fn focused_buffer(&mut self) -> Option<&mut InputBuffer> {
        match self.focused {
            FormField::PrincipalName => Some(&mut self.principal_name),
            FormField::Permissions => Some(&mut self.permissions),
            FormField::Environment => Some(&mut self.environment),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = if focused {
            theme::block_focused("Access Request")
        } else {
            theme::block_default("Access Request")
        };

        let mut lines: Vec<Line> = Vec::with_capacity(FormField::ALL.len() * 2 + 4);
        lines.push(Line::raw(""));

        for field in FormField::ALL {
            lines.push(self.field_line(field, focused));
            lines.push(Line::raw(""));
        }

        if let Some(ref error) = self.error {
            lines.push(Line::styled(format!(" ✗ {error}"), theme::error_text()));
        } else {
            lines.push(Line::styled(
                " Ctrl+G generates the script",
                theme::dim(),
            ));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn field_line(&self, field: FormField, pane_focused: bool) -> Line<'_> {
        let active = pane_focused && self.focused == field;
        let label_style = if active { theme::accent() } else { theme::muted() };
        let marker = if active { "▸ " } else { "  " };

        let value = match field {
            FormField::Platform => format!("◂ {} ▸", self.platform.label()),
            FormField::PrincipalKind => format!(
                "◂ {} ▸",
                self.platform.principal_kind_label(self.principal_kind())
            ),
            FormField::PrincipalName => self.text_value(&self.principal_name, "e.g. temp-user-01"),
            FormField::Permissions => {
                self.text_value(&self.permissions, "e.g. pods/get, namespaces/list")
            }
            FormField::Duration => format!("◂ {} ▸", self.duration_hours),
            FormField::Shell => format!("◂ {} ▸", self.shell.label()),
            FormField::Environment => self.text_value(&self.environment, "e.g. staging-cluster"),
        };

        let showing_placeholder = field.is_text()
            && self
                .text_buffer(field)
                .map(|b| b.is_empty())
                .unwrap_or(false);
        let value_style = if showing_placeholder {
            theme::dim()
        } else {
            theme::text()
        };

        Line::from(vec![
            Span::styled(format!("{marker}{:<21}", field.label()), label_style),
            Span::styled(value, value_style),
        ])
    }

    fn text_buffer(&self, field: FormField) -> Option<&InputBuffer> {
        match field {
            FormField::PrincipalName => Some(&self.principal_name),
            FormField::Permissions => Some(&self.permissions),
            FormField::Environment => Some(&self.environment),
            _ => None,
        }
    }

    fn text_value(&self, buffer: &InputBuffer, placeholder: &str) -> String {
        if buffer.is_empty() {
            placeholder.to_string()
        } else {
            buffer.display()
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
