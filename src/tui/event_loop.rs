//! Main loop: sleep until the next tick or input, fire due ticks, redraw when dirty.

use super::terminal_guard::TerminationSignal;
use super::view::{EventResult, View};
use crate::core::event::InputEvent;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Longest the loop blocks on input, so termination signals are noticed promptly.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

pub trait EventSource {
    /// Waits at most `timeout` for the next input event.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if crossterm::event::poll(timeout)? {
            return Ok(Some(crossterm::event::read()?.into()));
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Signal(TerminationSignal),
}

impl LoopExit {
    pub fn exit_code(self) -> i32 {
        match self {
            LoopExit::Quit => 0,
            LoopExit::Signal(signal) => signal.exit_code(),
        }
    }
}

pub fn run<B, V, E>(
    terminal: &mut Terminal<B>,
    view: &mut V,
    events: &mut E,
    signals: &Receiver<TerminationSignal>,
) -> io::Result<LoopExit>
where
    B: Backend,
    V: View,
    E: EventSource,
{
    let mut dirty = true;
    let mut frames: u64 = 0;

    loop {
        match signals.try_recv() {
            Ok(signal) => return Ok(LoopExit::Signal(signal)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
        }

        dirty |= view.advance(Instant::now());
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                view.render(frame, area);
            })?;
            frames += 1;
            dirty = false;
        }

        let timeout = view
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        let Some(event) = events.next_event(timeout)? else {
            continue;
        };
        match view.handle_input(&event) {
            EventResult::Quit => {
                tracing::info!(frames, "event loop finished");
                return Ok(LoopExit::Quit);
            }
            EventResult::Consumed => dirty = true,
            EventResult::Ignored => {}
        }
    }
}
