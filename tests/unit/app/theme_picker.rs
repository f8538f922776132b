use super::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

#[test]
fn closed_picker_ignores_keys() {
    let mut picker = ThemePicker::new();
    assert_eq!(picker.handle_key(&key(KeyCode::Down)), PickerOutcome::Ignored);
    assert_eq!(picker.handle_key(&key(KeyCode::Enter)), PickerOutcome::Ignored);
}

#[test]
fn open_highlights_current_theme() {
    let mut picker = ThemePicker::new();
    picker.open(2);
    assert!(picker.is_open());
    assert_eq!(picker.highlighted(), 2);
}

#[test]
fn navigation_wraps_and_enter_selects() {
    let mut picker = ThemePicker::new();
    picker.open(0);

    assert_eq!(picker.handle_key(&key(KeyCode::Up)), PickerOutcome::Consumed);
    assert_eq!(picker.highlighted(), 3);
    picker.handle_key(&key(KeyCode::Char('j')));
    assert_eq!(picker.highlighted(), 0);
    picker.handle_key(&key(KeyCode::Down));
    picker.handle_key(&key(KeyCode::Char('k')));
    picker.handle_key(&key(KeyCode::Down));
    assert_eq!(picker.highlighted(), 1);

    assert_eq!(
        picker.handle_key(&key(KeyCode::Enter)),
        PickerOutcome::Selected(1)
    );
    assert!(!picker.is_open());
}

#[test]
fn escape_closes_without_selecting() {
    let mut picker = ThemePicker::new();
    picker.open(1);
    picker.handle_key(&key(KeyCode::Down));
    assert_eq!(picker.handle_key(&key(KeyCode::Esc)), PickerOutcome::Consumed);
    assert!(!picker.is_open());
}

#[test]
fn open_picker_swallows_other_keys_but_not_ctrl_c() {
    let mut picker = ThemePicker::new();
    picker.open(0);
    assert_eq!(picker.handle_key(&key(KeyCode::Char('q'))), PickerOutcome::Consumed);
    assert_eq!(picker.handle_key(&ctrl('c')), PickerOutcome::Ignored);
    assert!(picker.is_open());
}

#[test]
fn render_lists_every_theme_with_marker() {
    let mut picker = ThemePicker::new();
    picker.open(3);
    let theme = theme::get(0);

    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            picker.render(frame, area, 1, theme);
        })
        .unwrap();

    let buf = terminal.backend().buffer();
    let row = |y: u16| -> String { (0..40).map(|x| buf[(x, y)].symbol().to_string()).collect() };
    assert!(row(2).contains("  Matrix"));
    assert!(row(3).contains("  Amber"));
    assert!(row(5).contains("▸ Red Alert"));
    assert!(row(1).trim_end().ends_with('╮'));

    // Popup hugs the right edge: "Red Alert" is 9 wide, plus marker and borders.
    assert_eq!(buf[(25, 1)].symbol(), "╭");
    assert_eq!(buf[(28, 5)].bg, theme.primary);
}

#[test]
fn closed_picker_draws_nothing() {
    let picker = ThemePicker::new();
    let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            picker.render(frame, area, 1, theme::get(0));
        })
        .unwrap();
    let buf = terminal.backend().buffer();
    assert!((0..20).all(|x| buf[(x, 1)].symbol() == " "));
}
