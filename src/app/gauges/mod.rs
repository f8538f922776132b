//! 数值仪表：系统监视器和入侵进度条

mod meter;
pub mod progress;
pub mod stats;

pub use progress::OperationProgress;
pub use stats::{Readout, SystemMonitor};
