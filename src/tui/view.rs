use crate::core::event::InputEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::time::Instant;

/// A timer-driven, renderable surface hosted by the event loop.
pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Fires every tick due at `now`; returns whether a redraw is needed.
    fn advance(&mut self, _now: Instant) -> bool {
        false
    }

    /// When the loop should wake up next even without input.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

#[cfg(test)]
#[path = "../../tests/unit/tui/view.rs"]
mod tests;
