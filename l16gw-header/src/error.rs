//! Header codec errors

use thiserror::Error;

/// TDL header codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Buffer shorter than the header it should carry
    #[error("buffer too short for TDL header: need {needed} bytes, have {available}")]
    Truncated {
        /// Number of bytes needed
        needed: usize,
        /// Number of bytes available
        available: usize,
    },
}
