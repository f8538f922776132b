use super::render::{HEADER_STATUS, HEADER_TITLE};
use super::*;
use crate::runtime::{FixedClock, RngEntropy, ScriptedEntropy};
use crate::tui::view::View;
use chrono::TimeZone;
use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const ALL_TIMERS: usize = 8;

fn clock() -> FixedClock {
    FixedClock::new(Local.with_ymd_and_hms(2024, 12, 15, 10, 42, 7).unwrap())
}

fn screen_with(options: ScreenOptions, clock: &FixedClock) -> HackerScreen {
    HackerScreen::with_sources(
        options,
        Box::new(ScriptedEntropy::constant(0.5)),
        Box::new(clock.clone()),
    )
}

fn mounted(options: ScreenOptions) -> (HackerScreen, FixedClock, Instant) {
    let clock = clock();
    let mut screen = screen_with(options, &clock);
    let start = Instant::now();
    screen.mount(start, (120, 32));
    (screen, clock, start)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn press(screen: &mut HackerScreen, code: KeyCode) -> EventResult {
    screen.handle_input(&InputEvent::key(code))
}

fn draw(screen: &mut HackerScreen, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            screen.render(frame, area);
        })
        .unwrap();
    terminal
}

fn screen_text(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buf = terminal.backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn mount_acquires_one_timer_per_tick_source() {
    let (screen, _, _) = mounted(ScreenOptions::default());
    assert!(screen.is_mounted());
    assert_eq!(screen.active_timers(), ALL_TIMERS);
    assert_eq!(screen.rain().map(|r| r.size()), Some((120, 32)));
}

#[test]
fn disabled_rain_owns_no_timer() {
    let (screen, _, _) = mounted(ScreenOptions {
        rain_enabled: false,
        ..ScreenOptions::default()
    });
    assert!(screen.rain().is_none());
    assert_eq!(screen.active_timers(), ALL_TIMERS - 1);
}

#[test]
fn zero_sized_terminal_skips_rain() {
    let clock = clock();
    let mut screen = screen_with(ScreenOptions::default(), &clock);
    screen.mount(Instant::now(), (0, 0));
    assert!(screen.rain().is_none());
    assert_eq!(screen.active_timers(), ALL_TIMERS - 1);
}

#[test]
fn unmount_releases_every_timer() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.unmount();
    assert!(!screen.is_mounted());
    assert_eq!(screen.active_timers(), 0);
    assert!(screen.next_deadline().is_none());
    assert!(!screen.advance(start + ms(5000)));
}

#[test]
fn remount_does_not_leak_timers() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.mount(start + ms(10), (80, 24));
    assert_eq!(screen.active_timers(), ALL_TIMERS);
}

#[test]
fn next_deadline_is_the_fastest_timer() {
    let (screen, _, start) = mounted(ScreenOptions::default());
    assert_eq!(screen.next_deadline(), Some(start + ms(50)));

    let (screen, _, start) = mounted(ScreenOptions {
        rain_enabled: false,
        ..ScreenOptions::default()
    });
    assert_eq!(screen.next_deadline(), Some(start + ms(200)));
}

#[test]
fn clock_updates_once_per_second() {
    let (mut screen, clock, start) = mounted(ScreenOptions::default());
    let mounted_at = screen.now();

    clock.advance_ms(999);
    screen.advance(start + ms(999));
    assert_eq!(screen.now(), mounted_at);

    clock.advance_ms(1);
    screen.advance(start + ms(1000));
    assert_eq!(screen.now(), clock.now());
}

#[test]
fn advance_drives_every_child() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    assert!(screen.advance(start + ms(1200)));

    assert_eq!(screen.command().unwrap().log().lines().len(), 1);
    assert_eq!(screen.code().unwrap().log().lines().len(), 6);
    assert_eq!(screen.network().unwrap().events().len(), 2);
    assert_eq!(screen.monitor().unwrap().values(), [50; 4]);
    assert_eq!(screen.progress().unwrap().values(), [10.0, 6.0, 8.0, 4.0]);
}

#[test]
fn theme_change_keeps_buffers_and_restarts_rain() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.advance(start + ms(2400));
    let command_lines = screen.command().unwrap().log().lines().len();
    let progress = screen.progress().unwrap().values();
    assert!(screen.rain().unwrap().drops().iter().all(|&d| d > 1));

    screen.select_theme(2);
    assert_eq!(screen.theme_index(), 2);
    assert_eq!(screen.theme().name, "Blue");
    assert_eq!(screen.command().unwrap().log().lines().len(), command_lines);
    assert_eq!(screen.progress().unwrap().values(), progress);
    assert!(screen.rain().unwrap().drops().iter().all(|&d| d == 1));
    assert_eq!(screen.active_timers(), ALL_TIMERS);
    assert_eq!(screen.next_deadline(), Some(start + ms(2450)));
}

#[test]
fn reselecting_active_theme_keeps_rain() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.advance(start + ms(2400));
    let drops = screen.rain().unwrap().drops().to_vec();

    screen.select_theme(0);
    assert_eq!(screen.rain().unwrap().drops(), drops.as_slice());

    press(&mut screen, KeyCode::Char('t'));
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.theme_index(), 0);
    assert_eq!(screen.rain().unwrap().drops(), drops.as_slice());
}

#[test]
fn readout_follows_clock_and_theme_only() {
    let clock = clock();
    let mut screen = HackerScreen::with_sources(
        ScreenOptions::default(),
        Box::new(RngEntropy::seeded(7)),
        Box::new(clock.clone()),
    );
    let start = Instant::now();
    screen.mount(start, (120, 32));
    let mounted_with = screen.monitor().unwrap().readout();

    let processes_row = |terminal: &Terminal<TestBackend>| {
        screen_text(terminal)
            .into_iter()
            .find(|r| r.contains("PROCESSES:"))
    };
    let mut seen = Vec::new();
    for step in 1..20u64 {
        assert!(screen.advance(start + ms(50 * step)));
        assert_eq!(screen.monitor().unwrap().readout(), mounted_with);
        let terminal = draw(&mut screen, 120, 32);
        seen.push(processes_row(&terminal));
    }
    assert!(seen[0].is_some());
    assert!(seen.iter().all(|r| *r == seen[0]));

    screen.advance(start + ms(1000));
    let after_tick = screen.monitor().unwrap().readout();
    assert_ne!(after_tick, mounted_with);

    screen.select_theme(1);
    assert_ne!(screen.monitor().unwrap().readout(), after_tick);
}

#[test]
fn out_of_range_theme_is_ignored() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    screen.select_theme(4);
    assert_eq!(screen.theme_index(), 0);
}

#[test]
fn theme_is_adapted_to_color_support() {
    let (screen, _, _) = mounted(ScreenOptions {
        theme_index: 1,
        color_support: TerminalColorSupport::Ansi16,
        ..ScreenOptions::default()
    });
    assert_eq!(
        *screen.theme(),
        theme::get(1).adapted(TerminalColorSupport::Ansi16)
    );
}

#[test]
fn digit_keys_and_tab_select_themes() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    assert_eq!(press(&mut screen, KeyCode::Char('3')), EventResult::Consumed);
    assert_eq!(screen.theme_index(), 2);
    assert_eq!(press(&mut screen, KeyCode::Char('9')), EventResult::Ignored);
    assert_eq!(screen.theme_index(), 2);

    press(&mut screen, KeyCode::Tab);
    assert_eq!(screen.theme_index(), 3);
    press(&mut screen, KeyCode::Tab);
    assert_eq!(screen.theme_index(), 0);
}

#[test]
fn picker_flow_selects_highlighted_theme() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    assert_eq!(press(&mut screen, KeyCode::Char('t')), EventResult::Consumed);
    assert!(screen.picker().is_open());

    // Keys that would quit are swallowed while the list is open.
    assert_eq!(press(&mut screen, KeyCode::Char('q')), EventResult::Consumed);
    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Down);
    assert_eq!(press(&mut screen, KeyCode::Enter), EventResult::Consumed);
    assert!(!screen.picker().is_open());
    assert_eq!(screen.theme_index(), 2);
}

#[test]
fn escape_closes_picker_before_quitting() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    press(&mut screen, KeyCode::F(2));
    assert!(screen.picker().is_open());
    assert_eq!(press(&mut screen, KeyCode::Esc), EventResult::Consumed);
    assert!(!screen.picker().is_open());
    assert_eq!(press(&mut screen, KeyCode::Esc), EventResult::Quit);
}

#[test]
fn quit_keys() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    assert_eq!(press(&mut screen, KeyCode::Char('q')), EventResult::Quit);
    assert_eq!(screen.handle_input(&InputEvent::ctrl('c')), EventResult::Quit);
    assert_eq!(press(&mut screen, KeyCode::Char('x')), EventResult::Ignored);
}

#[test]
fn resize_reinitialises_rain_only() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.advance(start + ms(800));
    assert_eq!(
        screen.handle_input(&InputEvent::Resize(60, 20)),
        EventResult::Consumed
    );
    assert_eq!(screen.size(), (60, 20));
    assert_eq!(screen.rain().unwrap().size(), (60, 20));
    assert_eq!(screen.command().unwrap().log().lines().len(), 1);
    assert_eq!(screen.active_timers(), ALL_TIMERS);
}

#[test]
fn render_lays_out_header_and_windows() {
    let (mut screen, _, start) = mounted(ScreenOptions {
        rain_enabled: false,
        ..ScreenOptions::default()
    });
    screen.advance(start + ms(1000));
    let terminal = draw(&mut screen, 120, 32);
    let rows = screen_text(&terminal);

    assert!(rows[1].contains(HEADER_TITLE));
    assert!(rows[1].contains(HEADER_STATUS));
    assert!(rows[1].contains("10:42:07 | 2024-12-15"));
    assert!(rows[1].contains("⚙ Matrix ▾"));
    for title in ["MAIN_TERMINAL.exe", "SYS_MONITOR", "NET_TRACE"] {
        assert!(rows[3].contains(title), "missing {title}");
    }
    let bottom_titles = rows.iter().skip(4).find(|r| r.contains("DATA_STREAM")).unwrap();
    assert!(bottom_titles.contains("INTRUSION_DETECT"));
    assert!(rows[3].contains("● ● ●"));
    assert!(rows[4].contains("ssh root@192.168.1.100"));
    assert!(rows.iter().any(|r| r.contains("SYSTEM STATUS")));
    assert!(rows.iter().any(|r| r.contains("PAYLOAD ANALYSIS")));
    assert!(rows.iter().any(|r| r.contains("OPERATION STATUS")));
}

#[test]
fn render_uses_selected_theme_colors() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    screen.select_theme(3);
    let terminal = draw(&mut screen, 120, 32);
    let buf = terminal.backend().buffer();
    assert_eq!(buf[(0, 0)].fg, theme::get(3).primary);
    assert_eq!(buf[(0, 0)].bg, theme::get(3).background);
}

#[test]
fn render_shows_open_picker() {
    let (mut screen, _, _) = mounted(ScreenOptions::default());
    press(&mut screen, KeyCode::Char('t'));
    let terminal = draw(&mut screen, 120, 32);
    let rows = screen_text(&terminal);
    assert!(rows.iter().any(|r| r.contains("▸ Matrix")));
    assert!(rows.iter().any(|r| r.contains("  Red Alert")));
}

#[test]
fn rain_fills_blank_cells_only() {
    let (mut screen, _, start) = mounted(ScreenOptions {
        rain_opacity: 1.0,
        ..ScreenOptions::default()
    });
    screen.advance(start + ms(50));
    let terminal = draw(&mut screen, 120, 32);
    let rows = screen_text(&terminal);

    // Border corners and header text are never overwritten.
    assert!(rows[0].starts_with('╭'));
    assert!(rows[1].contains(HEADER_TITLE));
}

/// Interiors of every rounded window below the header, with the text of its title row.
fn window_interiors(terminal: &Terminal<TestBackend>) -> Vec<(Rect, String)> {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut found = Vec::new();
    for y in 1..area.height {
        for x in 0..area.width {
            if buf[(x, y)].symbol() != "╭" {
                continue;
            }
            let Some(right) = (x + 1..area.width).find(|&cx| buf[(cx, y)].symbol() == "╮") else {
                continue;
            };
            let Some(bottom) = (y + 1..area.height).find(|&cy| buf[(x, cy)].symbol() == "╰") else {
                continue;
            };
            let title = (x..=right).map(|cx| buf[(cx, y)].symbol().to_string()).collect();
            found.push((Rect::new(x + 1, y + 1, right - x - 1, bottom - y - 1), title));
        }
    }
    found
}

/// Counts interior cells drawn in `color`, skipping the code window whose comments use it.
fn cells_in_windows_with_fg(terminal: &Terminal<TestBackend>, color: ratatui::style::Color) -> usize {
    let buf = terminal.backend().buffer();
    window_interiors(terminal)
        .into_iter()
        .filter(|(_, title)| !title.contains("DATA_STREAM"))
        .map(|(inner, _)| {
            (inner.top()..inner.bottom())
                .flat_map(|y| (inner.left()..inner.right()).map(move |x| (x, y)))
                .filter(|&cell| buf[cell].fg == color)
                .count()
        })
        .sum()
}

#[test]
fn window_rain_stays_dimmer_than_gap_rain() {
    let palette = ScreenOptions {
        color_support: TerminalColorSupport::Ansi16,
        ..ScreenOptions::default()
    };
    let (mut faint, _, start) = mounted(palette);
    let secondary = faint.theme().secondary;
    assert_ne!(secondary, faint.theme().text);
    faint.advance(start + ms(400));
    let terminal = draw(&mut faint, 120, 32);
    assert_eq!(window_interiors(&terminal).len(), 5);
    assert_eq!(cells_in_windows_with_fg(&terminal, secondary), 0);

    let (mut strong, _, start) = mounted(ScreenOptions {
        rain_opacity: 1.0,
        ..palette
    });
    strong.advance(start + ms(400));
    let terminal = draw(&mut strong, 120, 32);
    assert!(cells_in_windows_with_fg(&terminal, secondary) > 0);
}

#[test]
fn tiny_terminal_renders_without_panicking() {
    let (mut screen, _, start) = mounted(ScreenOptions::default());
    screen.resize(3, 2);
    screen.advance(start + ms(3000));
    draw(&mut screen, 3, 2);
    press(&mut screen, KeyCode::Char('t'));
    draw(&mut screen, 3, 2);
}
