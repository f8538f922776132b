//! 核心类型：与终端后端无关的输入事件

pub mod event;

pub use event::InputEvent;
