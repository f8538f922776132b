use super::*;

struct Inert;

impl View for Inert {
    fn handle_input(&mut self, _event: &InputEvent) -> EventResult {
        EventResult::Ignored
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect) {}
}

#[test]
fn default_view_has_no_timers() {
    let mut view = Inert;
    assert_eq!(
        view.handle_input(&InputEvent::key(crossterm::event::KeyCode::Enter)),
        EventResult::Ignored
    );
    assert!(!view.advance(Instant::now()));
    assert_eq!(view.next_deadline(), None);
}
