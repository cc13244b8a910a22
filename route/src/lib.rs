pub mod batch;
pub mod optimizer;

pub use batch::{BatchResult, BatchRouteOptimizer, BatchStats};
pub use optimizer::{RouteOptimizer, RouteOptimizerConfig, ScoredPath};

#[cfg(test)]
mod tests;
