//! 滚动文本面板：命令会话、载荷代码流和网络跟踪日志

pub mod code;
pub mod command;
pub mod network;
pub mod script;

pub use code::CodeStream;
pub use command::CommandLog;
pub use network::NetworkTrace;
pub use script::{Script, SequentialLog};
