use super::HackerScreen;
use crate::app::theme;
use crate::app::theme_picker::PickerOutcome;
use crate::core::event::InputEvent;
use crate::tui::view::EventResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn handle_input(screen: &mut HackerScreen, event: &InputEvent) -> EventResult {
    if let InputEvent::Resize(width, height) = *event {
        screen.resize(width, height);
        return EventResult::Consumed;
    }
    let Some(key) = event.as_key_press() else {
        return EventResult::Ignored;
    };

    match screen.picker.handle_key(key) {
        PickerOutcome::Selected(index) => {
            screen.select_theme(index);
            return EventResult::Consumed;
        }
        PickerOutcome::Consumed => return EventResult::Consumed,
        PickerOutcome::Ignored => {}
    }

    handle_global_key(screen, key)
}

fn handle_global_key(screen: &mut HackerScreen, key: &KeyEvent) -> EventResult {
    let count = theme::list().len();
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => EventResult::Quit,
        (KeyCode::Char('t'), KeyModifiers::NONE) | (KeyCode::F(2), _) => {
            screen.picker.open(screen.theme_index);
            EventResult::Consumed
        }
        (KeyCode::Tab, _) => {
            screen.select_theme((screen.theme_index + 1) % count);
            EventResult::Consumed
        }
        (KeyCode::Char(ch @ '1'..='9'), KeyModifiers::NONE) => {
            let index = (ch as usize) - ('1' as usize);
            if index < count {
                screen.select_theme(index);
                EventResult::Consumed
            } else {
                EventResult::Ignored
            }
        }
        _ => EventResult::Ignored,
    }
}
