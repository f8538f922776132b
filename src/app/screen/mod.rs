//! 根屏幕：持有主题选择、墙钟和全部子面板，按固定网格布局

use super::gauges::{OperationProgress, SystemMonitor};
use super::panels::{CodeStream, CommandLog, NetworkTrace};
use super::rain::{DigitalRain, RAIN_PERIOD};
use super::theme::{self, TerminalColorSupport, Theme};
use super::theme_picker::ThemePicker;
use crate::core::event::InputEvent;
use crate::runtime::{Entropy, RngEntropy, SystemClock, TimerHandle, TimerTable, WallClock};
use crate::tui::view::{EventResult, View};
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::time::{Duration, Instant};

mod input;
mod render;
mod tick;

pub const CLOCK_PERIOD: Duration = Duration::from_millis(1000);
const HEADER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenOptions {
    pub theme_index: usize,
    pub rain_enabled: bool,
    pub rain_opacity: f32,
    pub scanlines: bool,
    pub color_support: TerminalColorSupport,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            theme_index: 0,
            rain_enabled: true,
            rain_opacity: 0.2,
            scanlines: false,
            color_support: TerminalColorSupport::TrueColor,
        }
    }
}

/// Everything that only exists between `mount` and `unmount`.
struct Mounted {
    clock_timer: TimerHandle,
    rain: Option<DigitalRain>,
    command: CommandLog,
    monitor: SystemMonitor,
    network: NetworkTrace,
    code: CodeStream,
    progress: OperationProgress,
}

pub struct HackerScreen {
    options: ScreenOptions,
    theme_index: usize,
    theme: Theme,
    picker: ThemePicker,
    timers: TimerTable,
    entropy: Box<dyn Entropy>,
    clock: Box<dyn WallClock>,
    now: DateTime<Local>,
    size: (u16, u16),
    last_advance: Option<Instant>,
    mounted: Option<Mounted>,
}

impl HackerScreen {
    pub fn new(options: ScreenOptions) -> Self {
        Self::with_sources(
            options,
            Box::new(RngEntropy::from_os()),
            Box::new(SystemClock),
        )
    }

    pub fn with_sources(
        options: ScreenOptions,
        entropy: Box<dyn Entropy>,
        clock: Box<dyn WallClock>,
    ) -> Self {
        let theme_index = options.theme_index.min(theme::list().len() - 1);
        let now = clock.now();
        Self {
            options,
            theme_index,
            theme: theme::get(theme_index).adapted(options.color_support),
            picker: ThemePicker::new(),
            timers: TimerTable::new(),
            entropy,
            clock,
            now,
            size: (0, 0),
            last_advance: None,
            mounted: None,
        }
    }

    /// Starts every timer and child. Mounting twice restarts from scratch.
    pub fn mount(&mut self, now: Instant, size: (u16, u16)) {
        self.unmount();
        self.size = size;
        self.now = self.clock.now();
        self.last_advance = Some(now);

        let rain = self.mount_rain(now);
        let monitor = SystemMonitor::mount(&self.timers, now, &mut *self.entropy);
        let timers = &self.timers;
        self.mounted = Some(Mounted {
            clock_timer: timers.every(CLOCK_PERIOD, now),
            rain,
            command: CommandLog::mount(timers, now, self.now),
            monitor,
            network: NetworkTrace::mount(timers, now),
            code: CodeStream::mount(timers, now),
            progress: OperationProgress::mount(timers, now),
        });
        tracing::info!(
            width = size.0,
            height = size.1,
            theme = self.theme.name,
            timers = self.timers.active(),
            "screen mounted"
        );
    }

    /// Drops every child and with them every timer handle.
    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            self.picker.close();
            tracing::info!("screen unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn picker(&self) -> &ThemePicker {
        &self.picker
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }

    pub fn rain(&self) -> Option<&DigitalRain> {
        self.mounted.as_ref()?.rain.as_ref()
    }

    pub fn command(&self) -> Option<&CommandLog> {
        self.mounted.as_ref().map(|m| &m.command)
    }

    pub fn monitor(&self) -> Option<&SystemMonitor> {
        self.mounted.as_ref().map(|m| &m.monitor)
    }

    pub fn network(&self) -> Option<&NetworkTrace> {
        self.mounted.as_ref().map(|m| &m.network)
    }

    pub fn code(&self) -> Option<&CodeStream> {
        self.mounted.as_ref().map(|m| &m.code)
    }

    pub fn progress(&self) -> Option<&OperationProgress> {
        self.mounted.as_ref().map(|m| &m.progress)
    }

    /// Switches the palette. Only the rain restarts; text buffers and gauges carry over.
    /// Selecting the active theme again changes nothing.
    pub fn select_theme(&mut self, index: usize) {
        if index >= theme::list().len() {
            tracing::debug!(index, "ignoring out-of-range theme index");
            return;
        }
        if index == self.theme_index {
            return;
        }
        self.theme_index = index;
        self.theme = theme::get(index).adapted(self.options.color_support);
        self.remount_rain();
        if let Some(m) = self.mounted.as_mut() {
            m.monitor.reroll(&mut *self.entropy);
        }
        tracing::info!(theme = self.theme.name, "theme selected");
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.remount_rain();
        tracing::debug!(width, height, "screen resized");
    }

    fn mount_rain(&self, now: Instant) -> Option<DigitalRain> {
        if !self.options.rain_enabled {
            return None;
        }
        let (width, height) = self.size;
        DigitalRain::mount(&self.timers, now, width, height, RAIN_PERIOD)
    }

    fn remount_rain(&mut self) {
        if self.mounted.is_none() {
            return;
        }
        let now = self.last_advance.unwrap_or_else(Instant::now);
        // Release the old surface first so its timer never overlaps the new one.
        if let Some(m) = self.mounted.as_mut() {
            m.rain = None;
        }
        let rain = self.mount_rain(now);
        tracing::debug!(size = ?self.size, active = rain.is_some(), "rain reinitialised");
        if let Some(m) = self.mounted.as_mut() {
            m.rain = rain;
        }
    }
}

impl View for HackerScreen {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    fn advance(&mut self, now: Instant) -> bool {
        self.tick(now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/screen.rs"]
mod tests;
