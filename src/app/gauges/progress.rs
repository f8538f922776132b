use super::meter::{bar, labelled};
use crate::app::theme::Theme;
use crate::app::widgets::heading;
use crate::runtime::{Entropy, TimerHandle, TimerTable};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

pub const PROGRESS_PERIOD: Duration = Duration::from_millis(300);
pub const PROGRESS_TITLE: &str = "OPERATION STATUS";

pub struct Operation {
    pub label: &'static str,
    pub max_step: f64,
    pub working: &'static str,
    pub done: &'static str,
}

pub const OPERATIONS: [Operation; 4] = [
    Operation {
        label: "DECRYPTION",
        max_step: 5.0,
        working: "PROCESSING...",
        done: "COMPLETE",
    },
    Operation {
        label: "DATA DOWNLOAD",
        max_step: 3.0,
        working: "DOWNLOADING...",
        done: "COMPLETE",
    },
    Operation {
        label: "THREAT ANALYSIS",
        max_step: 4.0,
        working: "ANALYZING...",
        done: "COMPLETE",
    },
    Operation {
        label: "SYSTEM INFILTRATION",
        max_step: 2.0,
        working: "PENETRATING...",
        done: "ACCESS GRANTED",
    },
];

/// Four monotone counters that creep toward 100 and then stay there.
pub struct OperationProgress {
    values: [f64; 4],
    timer: TimerHandle,
}

impl OperationProgress {
    pub fn mount(timers: &TimerTable, now: Instant) -> Self {
        Self {
            values: [0.0; 4],
            timer: timers.every(PROGRESS_PERIOD, now),
        }
    }

    pub fn advance(&mut self, now: Instant, entropy: &mut dyn Entropy) -> bool {
        let due = self.timer.fired(now);
        for _ in 0..due {
            for (value, op) in self.values.iter_mut().zip(&OPERATIONS) {
                let step = entropy.fraction() * op.max_step;
                *value = (*value + step).min(100.0);
            }
        }
        due > 0
    }

    pub fn values(&self) -> [f64; 4] {
        self.values
    }

    pub fn status(&self, index: usize) -> &'static str {
        let op = &OPERATIONS[index];
        if self.values[index] >= 100.0 {
            op.done
        } else {
            op.working
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(body) = heading(frame, area, PROGRESS_TITLE, theme) else {
            return;
        };
        let width = body.width;
        let mut lines = Vec::with_capacity(OPERATIONS.len() * 2);
        for (i, op) in OPERATIONS.iter().enumerate() {
            let value = self.values[i];
            let done = value >= 100.0;
            let right = format!("{} {}%", self.status(i), value.floor() as u32);
            let label_style = if done { theme.accent_style() } else { theme.base_style() };
            let bar_color = if done { theme.accent } else { theme.primary };
            lines.push(Line::styled(labelled(op.label, &right, width), label_style));
            lines.push(Line::styled(
                bar(value, width),
                Style::default().fg(bar_color).bg(theme.background),
            ));
        }
        frame.render_widget(Paragraph::new(lines).style(theme.base_style()), body);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/gauges/progress.rs"]
mod tests;
