use super::script::{command_script, SequentialLog};
use crate::app::widgets::tail;
use crate::app::theme::Theme;
use crate::runtime::{TimerHandle, TimerTable};
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

pub const COMMAND_PERIOD: Duration = Duration::from_millis(800);
pub const CARET_PERIOD: Duration = Duration::from_millis(500);
pub const CARET: &str = "█";

/// Fake remote shell session, one line every 800 ms, with a blinking caret.
pub struct CommandLog {
    log: SequentialLog,
    caret_visible: bool,
    content_timer: TimerHandle,
    caret_timer: TimerHandle,
}

impl CommandLog {
    pub fn mount(timers: &TimerTable, now: Instant, login_at: DateTime<Local>) -> Self {
        Self {
            log: SequentialLog::new(command_script(login_at)),
            caret_visible: true,
            content_timer: timers.every(COMMAND_PERIOD, now),
            caret_timer: timers.every(CARET_PERIOD, now),
        }
    }

    pub fn advance(&mut self, now: Instant) -> bool {
        let steps = self.content_timer.fired(now);
        for _ in 0..steps {
            self.log.step();
        }

        let blinks = self.caret_timer.fired(now);
        if blinks % 2 == 1 {
            self.caret_visible = !self.caret_visible;
        }

        steps > 0 || blinks > 0
    }

    pub fn log(&self) -> &SequentialLog {
        &self.log
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = self.log.lines();
        let visible = tail(lines, area.height);
        let newest = lines.len().saturating_sub(1);
        let first = lines.len() - visible.len();

        let rendered: Vec<Line> = visible
            .iter()
            .enumerate()
            .map(|(offset, line)| {
                let index = first + offset;
                if index != newest {
                    return Line::styled(line.as_ref(), theme.base_style());
                }
                let mut spans = vec![Span::styled(line.as_ref(), theme.glow_style())];
                if self.caret_visible {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(CARET, Style::default().fg(theme.accent)));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(rendered).style(theme.base_style()), area);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/panels/command.rs"]
mod tests;
