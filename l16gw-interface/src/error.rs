//! Pipeline errors
//!
//! Neither error is fatal to the host simulation. A failed send drops that
//! one transmission; a failed receive drops that one PDU.

use thiserror::Error;

/// Outbound pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Header, message words and fill do not fit the transmit buffer
    #[error("transmission of {size} bytes exceeds the {capacity}-byte buffer")]
    TooLarge {
        /// Bytes the transmission would need
        size: usize,
        /// Buffer capacity in bytes
        capacity: usize,
    },
    /// Pre-encoded words did not yield a single J-series message
    #[error("pre-encoded data contains no decodable J-series message")]
    Undecodable,
}

/// Inbound pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiveError {
    /// TDL type other than 6 or 100
    #[error("unsupported TDL type {0}")]
    UnsupportedType(u8),
    /// Empty, oversized, or shorter than the declared header
    #[error("invalid signal data length {0} bytes")]
    InvalidLength(usize),
}

impl From<SendError> for l16gw_common::Error {
    fn from(err: SendError) -> Self {
        l16gw_common::Error::Protocol(err.to_string())
    }
}

impl From<ReceiveError> for l16gw_common::Error {
    fn from(err: ReceiveError) -> Self {
        l16gw_common::Error::Protocol(err.to_string())
    }
}
