//! Error types for gravsim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Rejected input at construction or call time. Never raised mid-step.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No body at index {index} (collection holds {len})")]
    BodyIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;
