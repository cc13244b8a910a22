//! `railway_core`: the facade crate external collaborators depend on.
//! Re-exports the planning (C1-C6) and real-time (C7) types behind one
//! construction-time [`CoreConfig`] and a [`Planner`] that wires them
//! together (SPEC_FULL.md §2, §6.4).

pub mod config;
pub mod error;
pub mod planner;

pub use config::CoreConfig;
pub use error::CoreError;
pub use planner::Planner;

pub use model::base_types::{self, ScheduleId};
pub use model::network::{self, RailwayNetwork};
pub use model::{Edge, ModelError, Node, NodeId, Path, Train, TrainId};
pub use realtime::{
    AdjustmentKind, PredictedConflict, RealTimeConfig, RealTimeOptimizer, RealtimeStats,
    ScheduleAdjustment, TrainDelay, TrainPosition,
};
pub use route::{BatchResult, BatchRouteOptimizer, BatchStats, RouteOptimizer, RouteOptimizerConfig, ScoredPath};
pub use solution::{ScheduleError, ScheduleStop, TrainSchedule};
pub use solver::{
    Conflict, ConflictDetector, ConflictKind, DetectorConfig, DetectorStats, RailwayAiResolver,
    ResolutionResult, ResolverConfig, Strategy,
};
pub use time::{Instant, Span};
