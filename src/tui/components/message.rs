use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::messages::{Message, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat bubble with sender-based styling.
///
/// Created fresh each frame by `MessageList`. The typing indicator is drawn
/// as an animated row of dots driven by `spinner_frame`.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub spinner_frame: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, spinner_frame: usize) -> Self {
        Self {
            message,
            spinner_frame,
        }
    }

    /// Predicts the rendered height for `width` without rendering.
    ///
    /// The wrapping options must match ratatui's `Paragraph` wrapping so the
    /// scroll view and the rendered bubbles agree.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        if message.sender.is_transient() {
            return 1 + VERTICAL_OVERHEAD;
        }

        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot | Sender::Typing => "wellcheck",
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::Magenta),
        Sender::Typing => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    }
}

fn typing_dots(frame: usize) -> String {
    let lit = frame % 4;
    (0..3)
        .map(|i| if i < lit { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let title = if self.message.sender.is_transient() {
            sender_label(self.message.sender).to_string()
        } else {
            format!(
                "{} · {}",
                sender_label(self.message.sender),
                self.message.sent_at.format("%H:%M")
            )
        };

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let content = if self.message.sender.is_transient() {
            typing_dots(self.spinner_frame)
        } else {
            self.message.text.trim().to_string()
        };

        Paragraph::new(content)
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Bubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
