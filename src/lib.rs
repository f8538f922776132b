//! hackscreen - 装饰性的“黑客终端”仪表盘
//!
//! 模块结构：
//! - app: 屏幕、主题、数字雨、文本面板和仪表
//! - runtime: 定时器、随机源、墙钟
//! - core: 输入事件
//! - tui: 终端守卫、事件循环、View trait
//! - config: settings.json 与命令行参数

pub mod app;
pub mod config;
pub mod core;
pub mod runtime;
pub mod tui;
