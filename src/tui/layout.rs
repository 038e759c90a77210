//! Root layout computation for header + form/output panes + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

use super::events::Focus;

/// Below this terminal width the two panes stack into one, showing only
/// the focused pane.
pub const SINGLE_PANE_THRESHOLD: u16 = 80;
/// Fixed width of the form column when both panes are visible.
pub const FORM_WIDTH: u16 = 46;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Title/header row.
    pub header: Rect,
    /// Request form pane (None when collapsed away).
    pub form: Option<Rect>,
    /// Script output pane (None when collapsed away).
    pub output: Option<Rect>,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area and pane focus.
    ///
    /// Wide terminals show the form and output side by side; narrow
    /// ones show only the focused pane.
    pub fn compute(area: Rect, focus: Focus) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let header = rows[0];
        let content = rows[1];
        let status = rows[2];

        if area.width < SINGLE_PANE_THRESHOLD {
            return match focus {
                Focus::Form => AppLayout {
                    header,
                    form: Some(content),
                    output: None,
                    status,
                },
                Focus::Output => AppLayout {
                    header,
                    form: None,
                    output: Some(content),
                    status,
                },
            };
        }

        let cols =
            Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(1)]).split(content);

        AppLayout {
            header,
            form: Some(cols[0]),
            output: Some(cols[1]),
            status,
        }
    }
}
