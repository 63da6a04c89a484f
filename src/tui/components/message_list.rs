//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `MessageStore` (props).
//!
//! Appending to the store bumps its revision. When the list sees a new
//! revision it re-attaches to the bottom, which is how "scroll to latest on
//! append" reaches the terminal.
//!
//! ## Virtualization
//!
//! Bubble heights are cached in a [`LayoutCache`] and only rebuilt when the
//! store or the width changes. Each frame renders just the bubbles that
//! overlap the viewport (plus half a screen either side) into a `ScrollView`
//! sized to that window. Content coordinates are `u32`, so a conversation
//! taller than `u16::MAX` rows still scrolls correctly.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::messages::MessageStore;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Bubble;
use crate::tui::event::TuiEvent;

/// Per-message heights for one store revision and width.
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// `(revision, message count, content width)` the heights were built for
    key: Option<(u64, usize, u16)>,
    pub heights: Vec<u16>,
    /// Running totals: `prefix_heights[i]` is the bottom row of message `i`
    pub prefix_heights: Vec<u32>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds heights if the store or width changed since the last call.
    pub fn update(&mut self, store: &MessageStore, content_width: u16) {
        let key = (store.revision(), store.len(), content_width);
        if self.key == Some(key) {
            return;
        }
        self.key = Some(key);
        self.heights = store
            .messages()
            .iter()
            .map(|m| Bubble::calculate_height(m, content_width))
            .collect();
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top row of message `index` in content coordinates.
    fn top_of(&self, index: usize) -> u32 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Messages overlapping the viewport, buffered by half a viewport on each side.
    pub fn visible_range(&self, scroll_offset: u32, viewport_height: u16) -> Range<usize> {
        let buffer = u32::from(viewport_height / 2);
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(u32::from(viewport_height))
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

/// Scroll state for the message list. Persisted in the parent `TuiState`.
pub struct MessageListState {
    pub layout: LayoutCache,
    /// Top row of the viewport in content coordinates
    pub offset: u32,
    /// When true, keep the newest message in view
    pub stick_to_bottom: bool,
    /// Store revision seen on the last render
    pub seen_revision: u64,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Offset within the rendered window
    scroll_state: ScrollViewState,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            layout: LayoutCache::new(),
            offset: 0,
            stick_to_bottom: true,
            seen_revision: 0,
            viewport_height: 0,
            scroll_state: ScrollViewState::default(),
        }
    }

    fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.offset >= max_y {
            self.stick_to_bottom = true;
            self.offset = max_y;
        }
    }

    fn scroll_up_by(&mut self, rows: u32) {
        self.offset = self.offset.min(self.max_offset()).saturating_sub(rows);
        self.stick_to_bottom = false;
    }

    fn scroll_down_by(&mut self, rows: u32) {
        self.offset = self.offset.saturating_add(rows);
        self.repin_if_at_bottom();
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub store: &'a MessageStore,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, store: &'a MessageStore, spinner_frame: usize) -> Self {
        Self {
            state,
            store,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        if self.store.revision() != self.state.seen_revision {
            self.state.seen_revision = self.store.revision();
            self.state.stick_to_bottom = true;
        }

        self.state.layout.update(self.store, content_width);
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.offset = self.state.max_offset();
        } else {
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        let range = layout.visible_range(self.state.offset, area.height);
        let window_top = layout.top_of(range.start);
        let window_bottom = layout.top_of(range.end);
        let window_height = u16::try_from(window_bottom - window_top).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in range {
            let y = layout.top_of(i) - window_top;
            let Ok(y) = u16::try_from(y) else { break };
            let rect = Rect::new(0, y, content_width, layout.heights[i]);
            scroll_view.render_widget(Bubble::new(&self.store.messages()[i], self.spinner_frame), rect);
        }

        let window_offset = self.state.offset.saturating_sub(window_top);
        self.state.scroll_state.set_offset(Position {
            x: 0,
            y: u16::try_from(window_offset).unwrap_or(u16::MAX),
        });
        let view_area = Rect {
            width: content_width,
            ..area
        };
        frame.render_stateful_widget(scroll_view, view_area, &mut self.state.scroll_state);

        let max_offset = self.state.max_offset();
        let mut scrollbar_state = ScrollbarState::new(max_offset as usize)
            .position(self.state.offset as usize)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = u32::from(self.viewport_height.max(1));
        match event {
            TuiEvent::ScrollUp => self.scroll_up_by(1),
            TuiEvent::ScrollDown => self.scroll_down_by(1),
            TuiEvent::ScrollPageUp => self.scroll_up_by(page),
            TuiEvent::ScrollPageDown => self.scroll_down_by(page),
            _ => {}
        }
        None
    }
}
