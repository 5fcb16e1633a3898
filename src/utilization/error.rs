use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilizationError {
    /// Node object does not describe a usable amount of some resource. Retrying with the same
    /// node state gives the same answer, so callers should skip the node for this cycle.
    #[error("invalid {resource} capacity on node {node}: {reason}")]
    InvalidCapacity {
        node: String,
        resource: String,
        reason: String,
    },
}

pub type UtilizationResult<T> = Result<T, UtilizationError>;
