use unicode_width::UnicodeWidthStr;

const FILLED: char = '█';
const EMPTY: char = '░';

/// A `width`-cell bar whose filled part is `floor(value / 100 * width)`.
pub fn bar(value: f64, width: u16) -> String {
    let width = width as usize;
    let value = value.clamp(0.0, 100.0);
    let filled = ((value / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    let mut out = String::with_capacity(width * FILLED.len_utf8());
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(width - filled));
    out
}

/// `left` and `right` on one row, pushed apart to fill `width` cells.
pub fn labelled(left: &str, right: &str, width: u16) -> String {
    let used = left.width() + right.width();
    let gap = (width as usize).saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

#[cfg(test)]
#[path = "../../../tests/unit/app/gauges/meter.rs"]
mod tests;
