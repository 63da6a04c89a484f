//! # ResourcePanelView Component
//!
//! Renders the current support resources as a bulleted list. When the list
//! holds the crisis set the border and text turn red.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::resources::ResourcePanel;
use crate::tui::component::Component;

pub struct ResourcePanelView<'a> {
    pub panel: &'a ResourcePanel,
}

impl<'a> ResourcePanelView<'a> {
    pub fn new(panel: &'a ResourcePanel) -> Self {
        Self { panel }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        if self.panel.items().is_empty() {
            return self
                .panel
                .display_lines()
                .into_iter()
                .map(|text| {
                    Line::from(Span::styled(
                        text,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ))
                })
                .collect();
        }
        self.panel
            .display_lines()
            .into_iter()
            .map(|text| Line::from(vec![Span::raw("• "), Span::raw(text)]))
            .collect()
    }
}

impl<'a> Component for ResourcePanelView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, style) = if self.panel.is_crisis() {
            (
                "Get help now",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            ("Resources", Style::default().fg(Color::Yellow))
        };

        let paragraph = Paragraph::new(self.lines())
            .style(style)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style.add_modifier(Modifier::DIM))
                    .title(title),
            );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::{CRISIS_RESOURCES, EMPTY_PLACEHOLDER};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(panel: &ResourcePanel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 10)).unwrap();
        terminal
            .draw(|f| ResourcePanelView::new(panel).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_panel_shows_placeholder() {
        let text = rendered(&ResourcePanel::new());
        assert!(text.contains("Resources"));
        assert!(text.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_lists_resources() {
        let mut panel = ResourcePanel::new();
        panel.set_resources(["Breathing exercise", "Talk to a friend"]);
        let text = rendered(&panel);
        assert!(text.contains("• Breathing exercise"));
        assert!(text.contains("• Talk to a friend"));
        assert!(!text.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_crisis_title() {
        let mut panel = ResourcePanel::new();
        panel.set_resources(CRISIS_RESOURCES);
        let text = rendered(&panel);
        assert!(text.contains("Get help now"));
        assert!(text.contains("Crisis Text Line"));
    }
}
