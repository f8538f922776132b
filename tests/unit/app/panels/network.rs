use super::*;
use crate::app::theme;
use crate::runtime::{FixedClock, RngEntropy, ScriptedEntropy};
use chrono::TimeZone;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn clock() -> FixedClock {
    FixedClock::new(Local.with_ymd_and_hms(2024, 12, 15, 10, 42, 7).unwrap())
}

fn tick(n: u64) -> Duration {
    NETWORK_PERIOD * n as u32
}

#[test]
fn newest_event_is_first() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let clock = clock();
    let mut trace = NetworkTrace::mount(&timers, start);
    // Picks index 0, then index 14.
    let mut entropy = ScriptedEntropy::new(vec![0.0, 0.99]);

    trace.advance(start + tick(1), &mut entropy, &clock);
    assert_eq!(trace.events()[0].line, NETWORK_EVENTS[0]);

    trace.advance(start + tick(2), &mut entropy, &clock);
    assert_eq!(trace.events().len(), 2);
    assert_eq!(trace.events()[0].line, NETWORK_EVENTS[14]);
    assert_eq!(trace.events()[1].line, NETWORK_EVENTS[0]);
}

#[test]
fn buffer_is_capped_at_fifteen() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let clock = clock();
    let mut trace = NetworkTrace::mount(&timers, start);
    let mut entropy = RngEntropy::seeded(3);

    for n in 1..=40 {
        trace.advance(start + tick(n), &mut entropy, &clock);
        assert!(trace.events().len() <= NETWORK_CAPACITY);
    }
    assert_eq!(trace.events().len(), NETWORK_CAPACITY);
}

#[test]
fn first_element_tracks_latest_pick() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let clock = clock();
    let mut trace = NetworkTrace::mount(&timers, start);

    for n in 1..=20u64 {
        let fraction = (n % 15) as f64 / 15.0 + 0.01;
        let mut entropy = ScriptedEntropy::constant(fraction);
        let expected = NETWORK_EVENTS[(fraction * 15.0) as usize];
        clock.advance_ms(600);
        trace.advance(start + tick(n), &mut entropy, &clock);
        assert_eq!(trace.events()[0].line, expected);
        assert_eq!(trace.events()[0].at, clock.now());
    }
}

#[test]
fn events_are_stamped_with_wall_clock() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let clock = clock();
    let mut trace = NetworkTrace::mount(&timers, start);
    trace.advance(start + tick(1), &mut ScriptedEntropy::constant(0.15), &clock);

    assert_eq!(
        trace.events()[0].display(),
        "[10:42:07] HTTP GET /admin/login.php"
    );
}

#[test]
fn empty_script_records_nothing() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let mut trace = NetworkTrace::with_script(&timers, start, &[]);
    assert!(trace.advance(start + tick(1), &mut ScriptedEntropy::constant(0.5), &clock()));
    assert!(trace.events().is_empty());
}

#[test]
fn render_highlights_newest_line() {
    let timers = TimerTable::new();
    let start = Instant::now();
    let clock = clock();
    let mut trace = NetworkTrace::mount(&timers, start);
    let mut entropy = ScriptedEntropy::new(vec![0.0, 0.57]);
    trace.advance(start + tick(2), &mut entropy, &clock);

    let theme = theme::get(3);
    let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            trace.render(frame, area, theme);
        })
        .unwrap();

    let buf = terminal.backend().buffer();
    let newest: String = (0..60).map(|x| buf[(x, 1)].symbol().to_string()).collect();
    assert!(newest.starts_with("[10:42:07] SSL Handshake failed"));
    assert_eq!(buf[(1, 1)].fg, theme.accent);
    assert_eq!(buf[(1, 2)].fg, theme.text);
}
