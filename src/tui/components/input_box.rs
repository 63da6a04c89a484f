//! # InputBox Component
//!
//! Single-line text entry at the bottom of the screen.
//!
//! The buffer and cursor are internal state. `locked` is a prop set from the
//! orchestrator state: while a request is in flight Enter does nothing and the
//! typed text stays put, so the user can send it once the reply arrives.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::mood::MoodTag;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// While true, Enter is ignored (prop)
    pub locked: bool,
    /// Dim the box while a modal is open (prop)
    pub dimmed: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            locked: false,
            dimmed: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn title(&self) -> String {
        let moods = MoodTag::ALL
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("F{} {}", i + 1, tag.emoji()))
            .collect::<Vec<_>>()
            .join(" ");
        if self.locked {
            format!("Message (waiting for reply...) | {moods}")
        } else {
            format!("Message | {moods}")
        }
    }

    /// Byte offset of the first visible character so the cursor stays in view.
    ///
    /// Walks back from the cursor, so the cost depends on the box width and
    /// not on the buffer length.
    fn visible_start(&self, inner_width: u16) -> usize {
        let width = inner_width as usize;
        let mut start = self.cursor;
        let mut used = 0usize;
        for (i, c) in self.buffer[..self.cursor].char_indices().rev() {
            used += c.width().unwrap_or(0);
            if used >= width {
                break;
            }
            start = i;
        }
        start
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let start = self.visible_start(inner_width);
        let visible: String = {
            let mut used = 0usize;
            self.buffer[start..]
                .chars()
                .take_while(|c| {
                    used += c.width().unwrap_or(0);
                    used <= inner_width as usize
                })
                .collect()
        };

        let mut style = Style::default().fg(Color::Green);
        if self.dimmed {
            style = style.add_modifier(Modifier::DIM);
        }

        let input = Paragraph::new(visible).style(style).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(self.title()),
        );
        frame.render_widget(input, area);

        if !self.dimmed {
            let cursor_x = area.x + 1 + self.buffer[start..self.cursor()].width() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line box: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome if self.cursor > 0 => {
                self.cursor = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd if self.cursor < self.buffer.len() => {
                self.cursor = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit if !self.locked && !self.buffer.trim().is_empty() => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
