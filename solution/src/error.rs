use model::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("index {0} out of bounds for schedule of length {1}")]
    IndexOutOfBounds(usize, usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("mutation would violate schedule invariants at node {0}: {1}")]
    InvariantViolation(NodeId, String),
}
