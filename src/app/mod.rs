//! 应用层：黑客终端屏幕及其面板

pub mod gauges;
pub mod panels;
pub mod rain;
pub mod screen;
pub mod theme;
pub mod theme_picker;
pub mod widgets;

pub use screen::{HackerScreen, ScreenOptions};
