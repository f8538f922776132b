use super::script::NETWORK_EVENTS;
use crate::app::theme::Theme;
use crate::app::widgets::heading;
use crate::runtime::{Entropy, TimerHandle, TimerTable, WallClock};
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const NETWORK_PERIOD: Duration = Duration::from_millis(600);
pub const NETWORK_CAPACITY: usize = 15;
pub const NETWORK_TITLE: &str = "NETWORK TRACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetEvent {
    pub at: DateTime<Local>,
    pub line: &'static str,
}

impl NetEvent {
    pub fn display(&self) -> String {
        format!("[{}] {}", self.at.format("%H:%M:%S"), self.line)
    }
}

/// Randomly sampled packet log, newest first, capped at [`NETWORK_CAPACITY`].
pub struct NetworkTrace {
    script: &'static [&'static str],
    events: VecDeque<NetEvent>,
    timer: TimerHandle,
}

impl NetworkTrace {
    pub fn mount(timers: &TimerTable, now: Instant) -> Self {
        Self::with_script(timers, now, &NETWORK_EVENTS)
    }

    pub fn with_script(timers: &TimerTable, now: Instant, script: &'static [&'static str]) -> Self {
        Self {
            script,
            events: VecDeque::with_capacity(NETWORK_CAPACITY + 1),
            timer: timers.every(NETWORK_PERIOD, now),
        }
    }

    pub fn advance(
        &mut self,
        now: Instant,
        entropy: &mut dyn Entropy,
        clock: &dyn WallClock,
    ) -> bool {
        let due = self.timer.fired(now);
        for _ in 0..due {
            self.record(entropy, clock.now());
        }
        due > 0
    }

    fn record(&mut self, entropy: &mut dyn Entropy, at: DateTime<Local>) {
        if self.script.is_empty() {
            return;
        }
        let line = self.script[entropy.below(self.script.len())];
        self.events.push_front(NetEvent { at, line });
        self.events.truncate(NETWORK_CAPACITY);
    }

    pub fn events(&self) -> &VecDeque<NetEvent> {
        &self.events
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(body) = heading(frame, area, NETWORK_TITLE, theme) else {
            return;
        };
        let lines: Vec<Line> = self
            .events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let style = if i == 0 {
                    theme.accent_style()
                } else {
                    theme.base_style()
                };
                Line::styled(event.display(), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).style(theme.base_style()), body);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/panels/network.rs"]
mod tests;
