use crate::base_types::{NodeId, Platform};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("node id already present: {0}")]
    DuplicateId(NodeId),

    #[error("unknown node id: {0}")]
    UnknownNode(NodeId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("platform {platform} busy at node {node}")]
    PlatformBusy { node: NodeId, platform: Platform },
}
