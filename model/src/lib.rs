pub mod base_types;
pub mod edge;
pub mod error;
pub mod network;
pub mod node;
pub mod path;
pub mod platform;
pub mod train;

pub use base_types::{Distance, NodeId, TrainId};
pub use edge::Edge;
pub use error::ModelError;
pub use network::{NetworkStats, RailwayNetwork, Weight};
pub use node::Node;
pub use path::{Path, RankedPath};
pub use platform::PlatformLedger;
pub use train::Train;

#[cfg(test)]
mod tests;
