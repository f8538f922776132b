use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::cell::Cell;

/// Source of wall-clock time for the header clock and log timestamps.
pub trait WallClock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock; shared between a test and the screen it drives.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: std::rc::Rc<Cell<DateTime<Local>>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self {
            at: std::rc::Rc::new(Cell::new(at)),
        }
    }

    pub fn set(&self, at: DateTime<Local>) {
        self.at.set(at);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.at.set(self.at.get() + ChronoDuration::milliseconds(ms));
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.at.get()
    }
}
