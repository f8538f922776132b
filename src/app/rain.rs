//! Digital rain background.
//!
//! A persistent cell surface sized to the terminal. Every tick fades what is already
//! there and drops one fresh glyph per column; columns that have scrolled past the
//! bottom restart at the top with a small per-tick chance so they drift out of step.

use super::theme::{blend, Theme};
use crate::runtime::{Entropy, TimerHandle, TimerTable};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use std::time::{Duration, Instant};

pub const RAIN_PERIOD: Duration = Duration::from_millis(50);

/// Half-width katakana keep every glyph one cell wide.
pub const GLYPHS: &str = "ｱｶｻﾀﾅﾊﾏﾔﾗﾜﾝABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()";

/// Cells per glyph, horizontally and vertically.
pub const GLYPH_SIZE: u16 = 1;

/// Share of the background painted over the surface each tick (`0x0a` alpha).
const FADE: f32 = 10.0 / 255.0;

/// Below this a trail cell is dropped instead of fading forever.
const MIN_INTENSITY: f32 = 0.03;

/// A column past the bottom restarts when the draw exceeds this.
const RESET_THRESHOLD: f64 = 0.975;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainCell {
    pub glyph: char,
    pub intensity: f32,
}

pub struct DigitalRain {
    width: u16,
    height: u16,
    drops: Vec<u32>,
    cells: Vec<Option<RainCell>>,
    glyphs: Vec<char>,
    timer: TimerHandle,
}

impl DigitalRain {
    /// Sets up a surface of `width` x `height` cells.
    ///
    /// Returns `None` when the surface has no area yet; the caller retries on the next
    /// resize instead of treating it as an error.
    pub fn mount(
        timers: &TimerTable,
        now: Instant,
        width: u16,
        height: u16,
        period: Duration,
    ) -> Option<Self> {
        let columns = (width / GLYPH_SIZE) as usize;
        let rows = (height / GLYPH_SIZE) as usize;
        if columns == 0 || rows == 0 {
            tracing::debug!(width, height, "rain surface unavailable, skipping setup");
            return None;
        }

        tracing::debug!(columns, rows, "rain mounted");
        Some(Self {
            width,
            height,
            drops: vec![1; columns],
            cells: vec![None; columns * rows],
            glyphs: GLYPHS.chars().collect(),
            timer: timers.every(period, now),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn rows(&self) -> usize {
        (self.height / GLYPH_SIZE) as usize
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<RainCell> {
        if column >= self.columns() || row >= self.rows() {
            return None;
        }
        self.cells[row * self.columns() + column]
    }

    pub fn advance(&mut self, now: Instant, entropy: &mut dyn Entropy) -> bool {
        let due = self.timer.fired(now);
        for _ in 0..due {
            self.tick(entropy);
        }
        due > 0
    }

    pub fn tick(&mut self, entropy: &mut dyn Entropy) {
        self.fade();

        let columns = self.columns();
        let rows = self.rows();
        for column in 0..columns {
            let glyph = self.glyphs[entropy.below(self.glyphs.len())];
            let drop = self.drops[column];

            // Drops count from 1; the glyph sits on the row above the drop position.
            let row = drop.saturating_sub(1) as usize;
            if drop >= 1 && row < rows {
                self.cells[row * columns + column] = Some(RainCell {
                    glyph,
                    intensity: 1.0,
                });
            }

            if drop as usize > rows && entropy.fraction() > RESET_THRESHOLD {
                self.drops[column] = 0;
            }
            self.drops[column] = self.drops[column].saturating_add(1);
        }
    }

    fn fade(&mut self) {
        for slot in &mut self.cells {
            if let Some(cell) = slot {
                cell.intensity *= 1.0 - FADE;
                if cell.intensity < MIN_INTENSITY {
                    *slot = None;
                }
            }
        }
    }

    /// Paints the surface into blank cells of `buf` inside `clip`, leaving anything
    /// already drawn there untouched.
    pub fn render_behind(&self, buf: &mut Buffer, clip: Rect, theme: &Theme, opacity: f32) {
        self.render_around(buf, clip, &[], theme, opacity);
    }

    /// Like [`Self::render_behind`], but never touches cells inside `holes`.
    pub fn render_around(
        &self,
        buf: &mut Buffer,
        clip: Rect,
        holes: &[Rect],
        theme: &Theme,
        opacity: f32,
    ) {
        let clip = clip.intersection(buf.area);
        for y in clip.top()..clip.bottom() {
            let row = (y / GLYPH_SIZE) as usize;
            for x in clip.left()..clip.right() {
                if holes.iter().any(|hole| covers(*hole, x, y)) {
                    continue;
                }
                let column = (x / GLYPH_SIZE) as usize;
                let Some(rain) = self.cell(column, row) else {
                    continue;
                };
                let Some(color) = rain_color(theme, rain.intensity * opacity) else {
                    continue;
                };
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                if cell.symbol() != " " {
                    continue;
                }
                let mut style = Style::default().fg(color);
                if rain.intensity >= 0.99 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                cell.set_char(rain.glyph);
                cell.set_style(style);
            }
        }
    }
}

fn covers(area: Rect, x: u16, y: u16) -> bool {
    x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom()
}

/// Trail color for a cell at `strength` (intensity times opacity).
///
/// True-color themes blend from the background; palette themes cannot, so only the
/// strong part of the trail is drawn, in the secondary color.
fn rain_color(theme: &Theme, strength: f32) -> Option<Color> {
    match (theme.background, theme.primary) {
        (Color::Rgb(..), Color::Rgb(..)) => {
            let color = blend(theme.background, theme.primary, strength);
            (color != theme.background).then_some(color)
        }
        _ if strength >= 0.15 => Some(theme.secondary),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/rain.rs"]
mod tests;
