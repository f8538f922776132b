use super::script::{code_script, SequentialLog};
use crate::app::widgets::{heading, tail};
use crate::app::theme::Theme;
use crate::runtime::{TimerHandle, TimerTable};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

pub const CODE_PERIOD: Duration = Duration::from_millis(200);
pub const CODE_TITLE: &str = "PAYLOAD ANALYSIS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Comment,
    Keyword,
    Plain,
}

/// Crude highlighting: comments win over declarations.
pub fn line_role(line: &str) -> LineRole {
    if line.contains("//") {
        LineRole::Comment
    } else if ["function", "const", "let"].iter().any(|kw| line.contains(kw)) {
        LineRole::Keyword
    } else {
        LineRole::Plain
    }
}

pub struct CodeStream {
    log: SequentialLog,
    timer: TimerHandle,
}

impl CodeStream {
    pub fn mount(timers: &TimerTable, now: Instant) -> Self {
        Self {
            log: SequentialLog::new(code_script()),
            timer: timers.every(CODE_PERIOD, now),
        }
    }

    pub fn advance(&mut self, now: Instant) -> bool {
        let steps = self.timer.fired(now);
        for _ in 0..steps {
            self.log.step();
        }
        steps > 0
    }

    pub fn log(&self) -> &SequentialLog {
        &self.log
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(body) = heading(frame, area, CODE_TITLE, theme) else {
            return;
        };
        let lines: Vec<Line> = tail(self.log.lines(), body.height)
            .iter()
            .map(|line| {
                let fg = match line_role(line) {
                    LineRole::Comment => theme.secondary,
                    LineRole::Keyword => theme.accent,
                    LineRole::Plain => theme.text,
                };
                Line::styled(line.as_ref(), Style::default().fg(fg))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).style(theme.base_style()), body);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/panels/code.rs"]
mod tests;
