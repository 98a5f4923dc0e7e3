//! Errors raised at the input boundary (scene files).
//!
//! The geometry core itself never fails; these only cover documents handed
//! to the crate from outside.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The scene document is neither valid JSON nor valid JSON5.
    #[error("scene parse failed: {0}")]
    SceneParse(String),

    #[error("scene contains no tokens")]
    EmptyScene,

    /// A token entry violates the scene contract.
    #[error("token #{index} ({id:?}): {reason}")]
    InvalidToken {
        index: usize,
        id: String,
        reason: String,
    },
}
