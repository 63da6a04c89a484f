//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (typing indicator, recording modal): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::analysis::{AnalysisService, HttpAnalysisService};
use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::mood::MoodTag;
use crate::core::state::App;
use crate::dispatch::Dispatcher;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Report key releases so they can be filtered out; terminals without
        // the protocol ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Maps a terminal event onto a core action, or hands it to a component.
///
/// Returns `None` when the event was purely presentational.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Emergency => Some(Action::Escalate),
        TuiEvent::ToggleRecording if app.recording => Some(Action::StopRecording),
        TuiEvent::ToggleRecording => Some(Action::StartRecording),
        TuiEvent::Escape if app.recording => Some(Action::StopRecording),
        TuiEvent::MoodKey(index) => MoodTag::ALL.get(index).copied().map(Action::MoodReaction),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            None
        }
        TuiEvent::Resize | TuiEvent::Escape => None,
        // The modal swallows typing
        _ if app.recording => None,
        _ => {
            tui.input_box.locked = app.is_waiting();
            match tui.input_box.handle_event(&event)? {
                InputEvent::Submit(text) => Some(Action::Submit(text)),
                InputEvent::ContentChanged => None,
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service: Arc<dyn AnalysisService> = Arc::new(
        HttpAnalysisService::new(config.base_url.clone(), config.request_timeout)
            .map_err(std::io::Error::other)?,
    );
    info!("Analysis service at {}", config.base_url);

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    let (mut dispatcher, mut rx) = Dispatcher::new(service, &config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_waiting() || app.recording;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event)
                && dispatcher.dispatch(&mut app, action) == Effect::Quit
            {
                break 'main;
            }
        }

        // Handle background task actions (replies, follow-ups, audio)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatcher.dispatch(&mut app, action) == Effect::Quit {
                break 'main;
            }
        }
    }

    info!(
        "Shutting down with {} delayed task(s) outstanding",
        dispatcher.pending_tasks()
    );
    drop(dispatcher);
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn type_text(app: &App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert_eq!(route_event(app, tui, TuiEvent::InputChar(c)), None);
        }
    }

    #[test]
    fn test_shortcuts_map_to_actions() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&app, &mut tui, TuiEvent::ForceQuit), Some(Action::Quit));
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Emergency), Some(Action::Escalate));
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::ToggleRecording),
            Some(Action::StartRecording)
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::MoodKey(2)),
            Some(Action::MoodReaction(MoodTag::Sad))
        );
        assert_eq!(route_event(&app, &mut tui, TuiEvent::MoodKey(9)), None);
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Escape), None);
    }

    #[test]
    fn test_typing_then_enter_submits() {
        let app = test_app();
        let mut tui = TuiState::new();
        type_text(&app, &mut tui, "hello");
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Submit),
            Some(Action::Submit("hello".to_string()))
        );
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_enter_while_waiting_keeps_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        crate::core::action::update(&mut app, Action::Submit("first".to_string()));

        type_text(&app, &mut tui, "second");
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Submit), None);
        assert_eq!(tui.input_box.buffer, "second");
    }

    #[test]
    fn test_recording_swallows_typing_and_escape_stops() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        app.recording = true;

        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('x')), None);
        assert!(tui.input_box.buffer.is_empty());
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Escape),
            Some(Action::StopRecording)
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::ToggleRecording),
            Some(Action::StopRecording)
        );
    }
}
