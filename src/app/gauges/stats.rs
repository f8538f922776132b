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

pub const STATS_PERIOD: Duration = Duration::from_millis(1000);
pub const STATS_TITLE: &str = "SYSTEM STATUS";
pub const METRICS: [&str; 4] = ["CPU USAGE", "MEMORY", "NETWORK I/O", "DISK USAGE"];

/// Above this a bar switches to the accent color.
const HOT: u8 = 80;

/// Secondary figures, re-rolled whenever the monitor or its host refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    pub processes: usize,
    pub connections: usize,
    pub uptime_hours: usize,
    pub uptime_minutes: usize,
}

impl Readout {
    pub fn roll(entropy: &mut dyn Entropy) -> Self {
        Self {
            processes: 100 + entropy.below(200),
            connections: 10 + entropy.below(50),
            uptime_hours: entropy.below(48),
            uptime_minutes: entropy.below(60),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("PROCESSES: {}", self.processes),
            format!("CONNECTIONS: {}", self.connections),
            format!("UPTIME: {}h {}m", self.uptime_hours, self.uptime_minutes),
        ]
    }
}

pub struct SystemMonitor {
    values: [u8; 4],
    readout: Readout,
    timer: TimerHandle,
}

impl SystemMonitor {
    pub fn mount(timers: &TimerTable, now: Instant, entropy: &mut dyn Entropy) -> Self {
        Self {
            values: [0; 4],
            readout: Readout::roll(entropy),
            timer: timers.every(STATS_PERIOD, now),
        }
    }

    /// Replaces the four values once per due tick and rolls a new readout if any fired.
    pub fn advance(&mut self, now: Instant, entropy: &mut dyn Entropy) -> bool {
        let due = self.timer.fired(now);
        for _ in 0..due {
            for value in &mut self.values {
                *value = entropy.below(100) as u8;
            }
        }
        if due > 0 {
            self.reroll(entropy);
        }
        due > 0
    }

    /// Rolls a new readout without touching the four values.
    pub fn reroll(&mut self, entropy: &mut dyn Entropy) {
        self.readout = Readout::roll(entropy);
    }

    pub fn values(&self) -> [u8; 4] {
        self.values
    }

    pub fn readout(&self) -> Readout {
        self.readout
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(body) = heading(frame, area, STATS_TITLE, theme) else {
            return;
        };
        let width = body.width;
        let mut lines = Vec::with_capacity(METRICS.len() * 2 + 5);
        for (label, value) in METRICS.iter().zip(self.values) {
            let bar_color = if value > HOT { theme.accent } else { theme.primary };
            lines.push(Line::styled(
                labelled(label, &format!("{value}%"), width),
                theme.base_style(),
            ));
            lines.push(Line::styled(
                bar(value as f64, width),
                Style::default().fg(bar_color).bg(theme.background),
            ));
        }

        lines.push(Line::raw(""));
        for text in self.readout.lines() {
            lines.push(Line::styled(text, theme.base_style()));
        }
        lines.push(Line::styled("STATUS: ACTIVE", theme.glow_style()));

        frame.render_widget(Paragraph::new(lines).style(theme.base_style()), body);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/gauges/stats.rs"]
mod tests;
