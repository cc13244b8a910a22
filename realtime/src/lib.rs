pub mod adjustment;
pub mod config;
pub mod optimizer;
pub mod position;
pub mod prediction;

pub use adjustment::{AdjustmentKind, ScheduleAdjustment};
pub use config::RealTimeConfig;
pub use optimizer::{RealTimeOptimizer, RealtimeStats};
pub use position::{TrainDelay, TrainPosition};
pub use prediction::PredictedConflict;

#[cfg(test)]
mod tests;
