use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input as the screen sees it. Mouse and paste events carry nothing it reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Other,
}

impl InputEvent {
    /// A key press with no modifiers.
    pub fn key(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn ctrl(ch: char) -> Self {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    /// The key event, if this is a press or auto-repeat (releases are dropped).
    pub fn as_key_press(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(e) if e.kind != KeyEventKind::Release => Some(e),
            _ => None,
        }
    }
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(e) => InputEvent::Key(e),
            Event::Resize(w, h) => InputEvent::Resize(w, h),
            Event::FocusGained => InputEvent::FocusGained,
            Event::FocusLost => InputEvent::FocusLost,
            _ => InputEvent::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
