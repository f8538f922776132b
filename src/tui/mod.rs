//! TUI integration layer (crossterm + ratatui).
//!
//! The screen in `app` only knows about ratatui frames and `InputEvent`s; everything
//! that touches the real terminal (raw mode, signals, the blocking event poll) lives
//! here.

pub mod event_loop;
pub mod terminal_guard;
pub mod view;
