//! Drop-down list opened from the header's theme control.

use super::theme::{self, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Ignored,
    Consumed,
    Selected(usize),
}

#[derive(Debug, Default, Clone)]
pub struct ThemePicker {
    open: bool,
    highlighted: usize,
}

impl ThemePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Opens the list with the active theme highlighted.
    pub fn open(&mut self, current: usize) {
        self.open = true;
        self.highlighted = current.min(theme::list().len().saturating_sub(1));
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PickerOutcome {
        if !self.open {
            return PickerOutcome::Ignored;
        }
        let count = theme::list().len();
        match (key.code, key.modifiers) {
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                self.highlighted = (self.highlighted + count - 1) % count;
                PickerOutcome::Consumed
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                self.highlighted = (self.highlighted + 1) % count;
                PickerOutcome::Consumed
            }
            (KeyCode::Enter, _) => {
                self.open = false;
                PickerOutcome::Selected(self.highlighted)
            }
            (KeyCode::Esc, _) => {
                self.open = false;
                PickerOutcome::Consumed
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => PickerOutcome::Ignored,
            // Modal while open: swallow everything else.
            _ => PickerOutcome::Consumed,
        }
    }

    /// Draws the list hanging from the top-right corner of `screen`, just below `anchor_y`.
    pub fn render(&self, frame: &mut Frame, screen: Rect, anchor_y: u16, theme: &Theme) {
        if !self.open || screen.width < 3 || screen.height < 3 {
            return;
        }
        let themes = theme::list();
        let max_label_w = themes.iter().map(|t| t.name.width()).max().unwrap_or(0);

        let width = (max_label_w as u16 + 4 + 2).min(screen.width).max(3);
        let height = (themes.len() as u16 + 2).min(screen.height).max(3);
        let right = screen.x + screen.width;
        let bottom = screen.y + screen.height;
        let x = right.saturating_sub(width).max(screen.x);
        let mut y = anchor_y.max(screen.y);
        if y + height > bottom {
            y = bottom.saturating_sub(height);
        }
        let popup = Rect::new(x, y, width, height);

        let base = theme.base_style();
        let selected = Style::default()
            .fg(theme.background)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.primary).bg(theme.background))
            .style(base);
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let pad_to = inner.width as usize;
        let rows: Vec<Line> = themes
            .iter()
            .enumerate()
            .take(inner.height as usize)
            .map(|(idx, t)| {
                let is_selected = idx == self.highlighted;
                let prefix = if is_selected { "▸ " } else { "  " };
                let text = pad_or_truncate(&format!("{prefix}{}", t.name), pad_to);
                Line::styled(text, if is_selected { selected } else { base })
            })
            .collect();
        frame.render_widget(Paragraph::new(rows), inner);
    }
}

fn pad_or_truncate(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme_picker.rs"]
mod tests;
