//! 主题注册表：固定的命名调色板，按下标选择，运行期间不可变。

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub text: Color,
    /// Color of the bold "glow" highlight used for the newest line and hot gauges.
    pub glow: Color,
}

pub const THEMES: [Theme; 4] = [
    Theme {
        name: "Matrix",
        primary: Color::Rgb(0x00, 0xff, 0x41),
        secondary: Color::Rgb(0x00, 0x8f, 0x11),
        accent: Color::Rgb(0x00, 0xff, 0x41),
        background: Color::Rgb(0x00, 0x00, 0x00),
        text: Color::Rgb(0x00, 0xff, 0x41),
        glow: Color::Rgb(0x00, 0xff, 0x41),
    },
    Theme {
        name: "Amber",
        primary: Color::Rgb(0xff, 0xb0, 0x00),
        secondary: Color::Rgb(0xcc, 0x88, 0x00),
        accent: Color::Rgb(0xff, 0xd7, 0x00),
        background: Color::Rgb(0x1a, 0x0f, 0x00),
        text: Color::Rgb(0xff, 0xb0, 0x00),
        glow: Color::Rgb(0xff, 0xb0, 0x00),
    },
    Theme {
        name: "Blue",
        primary: Color::Rgb(0x00, 0xaa, 0xff),
        secondary: Color::Rgb(0x00, 0x77, 0xcc),
        accent: Color::Rgb(0x00, 0xcc, 0xff),
        background: Color::Rgb(0x00, 0x11, 0x22),
        text: Color::Rgb(0x00, 0xaa, 0xff),
        glow: Color::Rgb(0x00, 0xaa, 0xff),
    },
    Theme {
        name: "Red Alert",
        primary: Color::Rgb(0xff, 0x33, 0x33),
        secondary: Color::Rgb(0xcc, 0x00, 0x00),
        accent: Color::Rgb(0xff, 0x66, 0x66),
        background: Color::Rgb(0x22, 0x00, 0x00),
        text: Color::Rgb(0xff, 0x33, 0x33),
        glow: Color::Rgb(0xff, 0x33, 0x33),
    },
];

pub fn list() -> &'static [Theme] {
    &THEMES
}

/// Indexing outside `0..list().len()` is a caller bug and panics.
pub fn get(index: usize) -> &'static Theme {
    &THEMES[index]
}

/// Looks a theme up by case-insensitive name or by 1-based position.
pub fn find(query: &str) -> Option<usize> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Ok(n) = query.parse::<usize>() {
        return (1..=THEMES.len()).contains(&n).then(|| n - 1);
    }
    THEMES
        .iter()
        .position(|t| t.name.eq_ignore_ascii_case(query))
        .or_else(|| {
            let squashed = query.replace(['-', '_'], " ");
            THEMES
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(&squashed))
        })
}

impl Theme {
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn glow_style(&self) -> Style {
        Style::default()
            .fg(self.glow)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Copy of the theme with every color reduced to what the terminal can show.
    pub fn adapted(&self, support: TerminalColorSupport) -> Theme {
        if support == TerminalColorSupport::TrueColor {
            return *self;
        }
        Theme {
            name: self.name,
            primary: map_color_for_support(self.primary, support),
            secondary: map_color_for_support(self.secondary, support),
            accent: map_color_for_support(self.accent, support),
            background: map_color_for_support(self.background, support),
            text: map_color_for_support(self.text, support),
            glow: map_color_for_support(self.glow, support),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn parse_color_support(value: &str) -> Option<TerminalColorSupport> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" | "rgb" => Some(TerminalColorSupport::TrueColor),
        "256" | "ansi256" => Some(TerminalColorSupport::Ansi256),
        "16" | "ansi16" | "basic" => Some(TerminalColorSupport::Ansi16),
        _ => None,
    }
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Some(support) = std::env::var("HACKSCREEN_COLOR_SUPPORT")
        .ok()
        .as_deref()
        .and_then(parse_color_support)
    {
        return support;
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let direct = |s: &str| s.contains("truecolor") || s.contains("24bit") || s.contains("direct");
    if direct(&colorterm) || direct(&term) {
        return TerminalColorSupport::TrueColor;
    }

    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }

    TerminalColorSupport::Ansi16
}

/// Linear RGB interpolation, `amount` in `[0, 1]`.
///
/// Palette colors cannot be mixed; they snap to whichever endpoint is nearer.
pub fn blend(from: Color, to: Color, amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * amount).round() as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if amount >= 0.5 => to,
        _ => from,
    }
}

pub fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (_, value) => value,
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    nearest((0u8..=255).map(|i| (i, ansi256_index_to_rgb(i))), (r, g, b))
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    nearest(
        ANSI16_RGB.iter().copied().enumerate().map(|(i, c)| (i as u8, c)),
        (r, g, b),
    )
}

fn nearest(candidates: impl Iterator<Item = (u8, (u8, u8, u8))>, target: (u8, u8, u8)) -> u8 {
    candidates
        .min_by_key(|(_, c)| color_distance_sq(*c, target))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }

    if index <= 231 {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        return (
            level[(offset / 36) as usize],
            level[((offset / 6) % 6) as usize],
            level[(offset % 6) as usize],
        );
    }

    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
