//! Link interface counters
//!
//! Counters are kept per interface instance and can be dumped as YAML for
//! end-of-run reports.

use serde::{Deserialize, Serialize};

/// Outbound and inbound traffic counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Signal records handed to the transport
    #[serde(rename = "sent")]
    pub sent: u64,
    /// Transmissions built while transport output was suppressed
    #[serde(rename = "suppressed")]
    pub suppressed: u64,
    /// Outbound messages dropped by a filter
    #[serde(rename = "filtered-outbound")]
    pub filtered_outbound: u64,
    /// Sends from platforms without a transport entity
    #[serde(rename = "unknown-sender")]
    pub unknown_sender: u64,
    /// Sends rejected for exceeding the buffer
    #[serde(rename = "oversize")]
    pub oversize: u64,
    /// Transmitter state records handed to the transport
    #[serde(rename = "transmitter-states")]
    pub transmitter_states: u64,
    /// Signal records accepted for decoding
    #[serde(rename = "received")]
    pub received: u64,
    /// Signal records rejected for type or length
    #[serde(rename = "rejected")]
    pub rejected: u64,
    /// Inbound messages delivered to subscribers
    #[serde(rename = "published")]
    pub published: u64,
    /// Inbound J11 messages routed to weapon coordination
    #[serde(rename = "forwarded-j11")]
    pub forwarded_j11: u64,
    /// Inbound messages dropped by configuration or filter
    #[serde(rename = "ignored-inbound")]
    pub ignored_inbound: u64,
    /// Message positions the codec could not decode
    #[serde(rename = "decode-failures")]
    pub decode_failures: u64,
}

impl LinkStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters as a YAML string.
    pub fn to_yaml(&self) -> Result<String, l16gw_common::Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
