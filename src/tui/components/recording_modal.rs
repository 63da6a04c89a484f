//! # RecordingModal Component
//!
//! Overlay shown while the mock voice recording is active. Nothing is
//! captured; the overlay only tells the user how to stop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::Component;

const MODAL_WIDTH: u16 = 44;
const MODAL_HEIGHT: u16 = 5;

pub struct RecordingModal {
    /// Drives the pulsing record dot
    pub spinner_frame: usize,
}

impl RecordingModal {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }
}

/// Compute a rect of at most `width` x `height` centered in `outer`.
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}

impl Component for RecordingModal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let dot = if (self.spinner_frame / 6) % 2 == 0 { "●" } else { "○" };
        let red = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        let body = Paragraph::new(vec![
            Line::styled(format!("{dot} Recording..."), red).centered(),
            Line::from("press Ctrl+R or Esc to stop").centered(),
        ])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(red)
                .title("Voice message"),
        );
        frame.render_widget(body, overlay);
    }
}
