use super::{HackerScreen, HEADER_HEIGHT};
use crate::app::theme::{blend, TerminalColorSupport, Theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::Title;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub const HEADER_TITLE: &str = "◈ NEURAL INTERFACE v2.1.7";
pub const HEADER_STATUS: &str = "● CONNECTED";
const STATUS_DOTS: &str = "●";

/// Rain inside a window is dimmer than in the gaps between windows.
const WINDOW_RAIN_FACTOR: f32 = 0.5;
const SCANLINE_TINT: f32 = 0.06;

pub(super) fn render(screen: &mut HackerScreen, frame: &mut Frame, area: Rect) {
    let theme = screen.theme;
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Ratio(4, 7),
            Constraint::Ratio(3, 7),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(5, 12),
            Constraint::Ratio(3, 12),
            Constraint::Ratio(4, 12),
        ])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[2]);

    render_header(screen, frame, rows[0], &theme);

    let windows = [
        window(frame, top[0], "MAIN_TERMINAL.exe", &theme),
        window(frame, top[1], "SYS_MONITOR", &theme),
        window(frame, top[2], "NET_TRACE", &theme),
        window(frame, bottom[0], "DATA_STREAM", &theme),
        window(frame, bottom[1], "INTRUSION_DETECT", &theme),
    ];

    if let Some(m) = screen.mounted.as_ref() {
        m.command.render(frame, windows[0], &theme);
        m.monitor.render(frame, windows[1], &theme);
        m.network.render(frame, windows[2], &theme);
        m.code.render(frame, windows[3], &theme);
        m.progress.render(frame, windows[4], &theme);

        if let Some(rain) = m.rain.as_ref() {
            let opacity = screen.options.rain_opacity;
            let buf = frame.buffer_mut();
            for inner in windows {
                rain.render_behind(buf, inner, &theme, opacity * WINDOW_RAIN_FACTOR);
            }
            rain.render_around(buf, area, &windows, &theme, opacity);
        }
    }

    if screen.options.scanlines && screen.options.color_support == TerminalColorSupport::TrueColor {
        tint_scanlines(frame.buffer_mut(), area, &theme);
    }

    screen
        .picker
        .render(frame, area, area.y.saturating_add(HEADER_HEIGHT), &theme);
}

fn render_header(screen: &HackerScreen, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary).bg(theme.background))
        .style(theme.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let left = Line::from(vec![
        Span::styled(HEADER_TITLE, theme.glow_style()),
        Span::raw("  "),
        Span::styled(HEADER_STATUS, Style::default().fg(theme.accent)),
    ]);
    frame.render_widget(Paragraph::new(left), inner);

    let clock = screen.now.format("%H:%M:%S | %Y-%m-%d").to_string();
    let control = format!("⚙ {} ▾", screen.theme.name);
    let control_style = if screen.picker.is_open() {
        Style::default()
            .fg(theme.background)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        theme.accent_style()
    };
    let right = Line::from(vec![
        Span::styled(clock, theme.base_style()),
        Span::raw("  "),
        Span::styled(control, control_style),
    ])
    .alignment(Alignment::Right);
    // Only overwrite the left text when both halves fit side by side.
    let needed = HEADER_TITLE.width() + HEADER_STATUS.width() + 2 + right.width() + 1;
    if needed <= inner.width as usize {
        frame.render_widget(Paragraph::new(right), inner);
    }
}

/// Draws a titled window frame and returns the area inside it.
fn window(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    let dots = Line::from(vec![
        Span::styled(STATUS_DOTS, Style::default().fg(theme.accent)),
        Span::raw(" "),
        Span::styled(STATUS_DOTS, Style::default().fg(theme.primary)),
        Span::raw(" "),
        Span::styled(STATUS_DOTS, Style::default().fg(theme.secondary)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary).bg(theme.background))
        .title(Span::styled(
            format!(" {title} "),
            theme.base_style().add_modifier(Modifier::BOLD),
        ))
        .title(Title::from(dots).alignment(Alignment::Right))
        .style(theme.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn tint_scanlines(buf: &mut Buffer, area: Rect, theme: &Theme) {
    for y in (area.top()..area.bottom()).skip(1).step_by(2) {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let bg = blend(cell.bg, theme.primary, SCANLINE_TINT);
                cell.set_bg(bg);
            }
        }
    }
}
