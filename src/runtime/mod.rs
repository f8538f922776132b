//! 运行时模块：单线程事件循环用到的定时器、随机源和墙钟

pub mod clock;
pub mod entropy;
pub mod timer;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use entropy::{Entropy, RngEntropy, ScriptedEntropy};
pub use timer::{TimerHandle, TimerTable};
