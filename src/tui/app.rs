//! Application controller and event loop.
//!
//! Elm-style: a single [`AppState`] owns every view, input becomes
//! [`AppEvent`]s, and all mutation happens in `handle_event`. Generation
//! runs on a spawned task and reports back through the event channel,
//! so the UI never blocks and at most one request is in flight.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::core::llm::GeminiClient;
use crate::core::prompt::build_prompt;
use crate::core::request::OutputShell;

use super::events::{
    AppEvent, Focus, GenerationOutcome, Notification, NotificationLevel, Screen,
};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::form::FormState;
use super::views::key_entry::{KeyEntryOutcome, KeyEntryState};
use super::views::output::OutputState;

/// Ticks between keychain re-reads (~2s at the default tick rate).
const CREDENTIAL_REFRESH_TICKS: u64 = 8;

const NOTIFICATION_TTL_TICKS: u32 = 16;
const MAX_VISIBLE_NOTIFICATIONS: usize = 4;

pub struct AppState {
    running: bool,
    pub screen: Screen,
    pub focus: Focus,
    pub form: FormState,
    pub output: OutputState,
    pub key_entry: KeyEntryState,
    pub notifications: Vec<Notification>,
    notification_counter: u64,
    tick_count: u64,
    /// Shell selected when the in-flight request was submitted; the
    /// completion is labeled/saved with this even if the form changed.
    submitted_shell: OutputShell,
    pub services: Services,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl AppState {
    pub fn new(services: Services, event_rx: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        let configured = services.credentials.is_configured();
        Self {
            running: true,
            screen: if configured { Screen::Main } else { Screen::KeyEntry },
            focus: Focus::Form,
            form: FormState::new(),
            output: OutputState::new(),
            key_entry: KeyEntryState::new(configured),
            notifications: Vec::new(),
            notification_counter: 0,
            tick_count: 0,
            submitted_shell: OutputShell::Bash,
            services,
            event_rx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Receive the next application event. The main loop multiplexes
    /// this with the tick timer; tests drive it directly.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    // ========================================================================
    // Main Loop
    // ========================================================================

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut ticker = interval(Duration::from_millis(self.services.config.tui.tick_rate_ms));
        let mut input = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = ticker.tick() => self.handle_event(AppEvent::Tick),
                Some(event) = self.event_rx.recv() => self.handle_event(event),
                Some(Ok(event)) = input.next() => self.handle_event(AppEvent::Input(event)),
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Handling
    // ========================================================================

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Input(input) => self.handle_input(input),
            AppEvent::GenerationComplete(outcome) => self.on_generation_complete(outcome),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level)
            }
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_input(&mut self, event: Event) {
        // Global bindings take precedence over whichever view has focus
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = &event
        {
            if modifiers.contains(KeyModifiers::CONTROL) {
                match code {
                    // Ctrl+C always quits, even from the key prompt
                    KeyCode::Char('c') => {
                        self.running = false;
                        return;
                    }
                    KeyCode::Char('g') if self.screen == Screen::Main => {
                        return self.submit();
                    }
                    KeyCode::Char('o') if self.screen == Screen::Main => {
                        self.focus = self.focus.toggled();
                        return;
                    }
                    KeyCode::Char('k') if self.screen == Screen::Main => {
                        self.key_entry = KeyEntryState::new(true);
                        self.screen = Screen::KeyEntry;
                        return;
                    }
                    _ => {}
                }
            }
        }

        if self.screen == Screen::KeyEntry {
            match self.key_entry.handle_input(&event) {
                Some(KeyEntryOutcome::Submitted(key)) => {
                    self.services.credentials.set(Some(&key));
                    self.screen = Screen::Main;
                    self.push_notification("API key saved", NotificationLevel::Success);
                }
                Some(KeyEntryOutcome::Cancelled) => self.screen = Screen::Main,
                None => {}
            }
            return;
        }

        let consumed = match self.focus {
            Focus::Form => self.form.handle_input(&event),
            Focus::Output => {
                let services = self.services.clone();
                self.output.handle_input(&event, &services)
            }
        };
        if consumed {
            return;
        }

        // Unconsumed fallback: q quits from the output pane
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            if self.focus == Focus::Output {
                self.running = false;
            }
        }
    }

    /// Validate the form and launch a generation task.
    ///
    /// Exactly one request may be in flight; a missing key short-circuits
    /// to the key prompt without any network traffic.
    fn submit(&mut self) {
        if self.output.is_generating() {
            self.push_notification(
                "A generation is already in progress",
                NotificationLevel::Warning,
            );
            return;
        }

        let request = match self.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.form.error = Some(e.to_string());
                self.focus = Focus::Form;
                return;
            }
        };

        let Some(key) = self.services.credentials.get() else {
            self.output
                .set_error("No API key configured. Enter one to continue.");
            self.key_entry = KeyEntryState::new(false);
            self.screen = Screen::KeyEntry;
            return;
        };

        let prompt = build_prompt(&request);
        self.submitted_shell = request.shell;
        self.output.begin();
        self.focus = Focus::Output;

        log::info!(
            "Submitting generation request (platform: {}, duration: {}h)",
            request.platform.label(),
            request.duration_hours
        );

        let model = self.services.config.llm.model.clone();
        let base_url = self.services.client_base_url.clone();
        let event_tx = self.services.event_tx.clone();
        tokio::spawn(async move {
            let outcome = run_generation(key, model, base_url, prompt).await;
            let _ = event_tx.send(AppEvent::GenerationComplete(outcome));
        });
    }

    fn on_generation_complete(&mut self, outcome: GenerationOutcome) {
        match outcome {
            GenerationOutcome::Script(text) => {
                self.output.set_script(text, self.submitted_shell);
                self.push_notification(
                    "Script ready — y to copy, s to save",
                    NotificationLevel::Success,
                );
            }
            GenerationOutcome::Failed {
                message,
                credential_rejected: true,
            } => {
                log::warn!("Credential rejected by the API, clearing stored key");
                // A rejected key is useless to every future request
                self.services.credentials.set(None);
                self.output
                    .set_error("The API key was rejected. Enter a new key to continue.");
                self.key_entry = KeyEntryState::new(false);
                self.screen = Screen::KeyEntry;
                self.push_notification(message, NotificationLevel::Error);
            }
            GenerationOutcome::Failed { message, .. } => {
                self.output
                    .set_error(format!("Failed to generate script: {message}"));
                self.push_notification(message, NotificationLevel::Error);
            }
        }
    }

    fn on_tick(&mut self) {
        self.tick_count += 1;
        self.output.on_tick();

        for notification in &mut self.notifications {
            notification.ttl_ticks = notification.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        if self.tick_count % CREDENTIAL_REFRESH_TICKS == 0 {
            self.services.credentials.refresh();
            self.converge_screen();
        }
    }

    /// Align the visible screen with credential availability after an
    /// external keychain change.
    fn converge_screen(&mut self) {
        let configured = self.services.credentials.is_configured();
        match self.screen {
            // Forced prompt resolves itself when a key shows up from
            // elsewhere. A voluntary prompt (Ctrl+K) stays open.
            Screen::KeyEntry if configured && !self.key_entry.can_cancel => {
                self.screen = Screen::Main;
                self.push_notification("API key detected", NotificationLevel::Info);
            }
            Screen::Main if !configured && !self.output.is_generating() => {
                self.key_entry = KeyEntryState::new(false);
                self.screen = Screen::KeyEntry;
            }
            _ => {}
        }
    }

    pub fn push_notification(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message: message.into(),
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render(&self, frame: &mut Frame) {
        if self.screen == Screen::KeyEntry {
            self.key_entry.render(frame, frame.area());
            return;
        }

        let layout = AppLayout::compute(frame.area(), self.focus);
        self.render_header(frame, layout.header);
        if let Some(area) = layout.form {
            self.form.render(frame, area, self.focus == Focus::Form);
        }
        if let Some(area) = layout.output {
            self.output.render(frame, area, self.focus == Focus::Output);
        }
        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, frame.area());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("  grantgen", theme::title()),
                Span::styled(
                    "  temporary access script generator",
                    theme::muted(),
                ),
            ]),
        ]);
        frame.render_widget(header, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.focus {
            Focus::Form => {
                " Tab next field · Ctrl+G generate · Ctrl+O output pane · Ctrl+K api key · Ctrl+C quit"
            }
            Focus::Output => {
                " j/k scroll · y copy · s save · Ctrl+G regenerate · Ctrl+O form pane · q quit"
            }
        };
        frame.render_widget(Paragraph::new(hints).style(theme::muted()), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        for (i, notification) in self
            .notifications
            .iter()
            .rev()
            .take(MAX_VISIBLE_NOTIFICATIONS)
            .enumerate()
        {
            let width = (notification.message.len() as u16 + 4).min(area.width / 2);
            let rect = Rect {
                x: area.right().saturating_sub(width + 1),
                y: area.y + 1 + i as u16,
                width,
                height: 1,
            };
            let color = match notification.level {
                NotificationLevel::Info => theme::INFO,
                NotificationLevel::Success => theme::SUCCESS,
                NotificationLevel::Warning => theme::WARNING,
                NotificationLevel::Error => theme::ERROR,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(format!(" {} ", notification.message))
                    .style(ratatui::style::Style::default().fg(color)),
                rect,
            );
        }
    }
}

async fn run_generation(
    key: String,
    model: String,
    base_url: Option<String>,
    prompt: String,
) -> GenerationOutcome {
    let client = match GeminiClient::new(key, model) {
        Ok(client) => client,
        Err(e) => return GenerationOutcome::from(Err(e)),
    };
    let client = match base_url {
        Some(url) => client.with_base_url(url),
        None => client,
    };
    GenerationOutcome::from(client.generate(&prompt).await)
}
