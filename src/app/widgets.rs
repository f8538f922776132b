//! Small rendering helpers shared by the panels and gauges.

use super::theme::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// The last `height` items, so a growing log stays pinned to its newest lines.
pub fn tail<T>(items: &[T], height: u16) -> &[T] {
    let keep = items.len().min(height as usize);
    &items[items.len() - keep..]
}

/// Draws a bold centered title on the first row of `area` and returns the rows below
/// it, or `None` when there is no room left for a body.
pub fn heading(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Option<Rect> {
    if area.height == 0 {
        return None;
    }
    let title_row = Rect { height: 1, ..area };
    let line = Line::styled(title, theme.base_style().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(line), title_row);

    (area.height > 1).then(|| Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    })
}

#[cfg(test)]
#[path = "../../tests/unit/app/widgets.rs"]
mod tests;
