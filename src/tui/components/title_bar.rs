//! # TitleBar Component
//!
//! Top status line: application name, the current status message and a
//! short key legend.
//!
//! TitleBar is purely presentational. It receives everything as props and
//! keeps no state of its own:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone(), app.recording);
//! title_bar.render(frame, title_area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEY_HINTS: &str = "Enter send · ^E help now · ^R record · ^C quit";

/// Top status bar component.
pub struct TitleBar {
    /// Status message (e.g., "Thinking...", "Recording...")
    pub status_message: String,
    /// Shows a red recording marker
    pub recording: bool,
}

impl TitleBar {
    pub fn new(status_message: String, recording: bool) -> Self {
        Self {
            status_message,
            recording,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Wellcheck | {KEY_HINTS}")
        } else {
            format!("Wellcheck | {} | {KEY_HINTS}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if self.recording {
            spans.push(Span::styled("● ", Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw(self.text()));
        frame.render_widget(Line::from(spans), area);
    }
}
