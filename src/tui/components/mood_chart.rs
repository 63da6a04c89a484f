//! # MoodChart Component
//!
//! Line chart of the rolling seven-sample mood trend, one point per day
//! label, y axis fixed to the 1..=5 mood scale.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, BorderType, Chart, Dataset, GraphType};

use crate::core::mood::{DAY_LABELS, MoodSample, MoodTrend, TREND_LEN};
use crate::tui::component::Component;

pub const DATASET_NAME: &str = "Mood Level";

/// Stateless chart over a borrowed trend (props).
pub struct MoodChart<'a> {
    pub trend: &'a MoodTrend,
}

impl<'a> MoodChart<'a> {
    pub fn new(trend: &'a MoodTrend) -> Self {
        Self { trend }
    }
}

fn latest_color(sample: MoodSample) -> Color {
    match sample.value() {
        1 => Color::Red,
        2 => Color::LightRed,
        3 => Color::Yellow,
        _ => Color::Green,
    }
}

impl<'a> Component for MoodChart<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let points = self.trend.points();
        let dataset = Dataset::default()
            .name(DATASET_NAME)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points);

        let y_labels: Vec<String> = (MoodSample::MIN..=MoodSample::MAX)
            .map(|v| v.to_string())
            .collect();

        let latest = self.trend.latest();
        let title = format!("Mood trend (today: {})", latest.value());

        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(latest_color(latest))
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, (TREND_LEN - 1) as f64])
                    .labels(DAY_LABELS),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([f64::from(MoodSample::MIN), f64::from(MoodSample::MAX)])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}
