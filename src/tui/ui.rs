use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    MessageList, MoodChart, RecordingModal, ResourcePanelView, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the mood chart in the right-hand column.
const CHART_HEIGHT: u16 = 12;

/// Screen regions for one frame.
pub struct ScreenLayout {
    pub title: Rect,
    pub chat: Rect,
    pub chart: Rect,
    pub resources: Rect,
    pub input: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min, Percentage};
    let [title, main, input] = Layout::vertical([Length(1), Min(0), Length(3)]).areas(area);
    let [chat, side] = Layout::horizontal([Percentage(62), Percentage(38)]).areas(main);
    let [chart, resources] = Layout::vertical([Length(CHART_HEIGHT), Min(0)]).areas(side);
    ScreenLayout {
        title,
        chat,
        chart,
        resources,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let layout = screen_layout(frame.area());

    TitleBar::new(app.status_message.clone(), app.recording).render(frame, layout.title);

    MessageList::new(&mut tui.message_list, &app.messages, spinner_frame)
        .render(frame, layout.chat);
    MoodChart::new(&app.mood).render(frame, layout.chart);
    ResourcePanelView::new(&app.resources).render(frame, layout.resources);

    tui.input_box.locked = app.is_waiting();
    tui.input_box.dimmed = app.recording;
    tui.input_box.render(frame, layout.input);

    if app.recording {
        RecordingModal::new(spinner_frame).render(frame, frame.area());
    }
}
