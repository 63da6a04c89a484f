use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that knows how to draw itself.
///
/// Components take their data as struct fields ("props") and render into
/// whatever `Rect` the parent layout hands them. `render` takes `&mut self`
/// so stateful components can update caches such as scroll offsets while
/// drawing, in the spirit of ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The higher-level event emitted to the parent, if any.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
