//! Distributed simulation transport contract
//!
//! Outbound transmissions leave the gateway as signal records carrying the
//! TDL type tag, a raw-binary encoding scheme with the J-word count, and the
//! header plus message bytes. Transmitter state records accompany them when
//! the host reports radio activity.

use std::fmt;

use bytes::Bytes;

/// Encoding class marker for raw binary signal data
pub const ENCODING_RAW_BINARY: u16 = 0x4000;

/// Mask of the word-count field in the encoding scheme
pub const ENCODING_WORD_COUNT_MASK: u16 = 0x3FFF;

/// Outbound buffer capacity: 64 32-bit words
pub const MAX_OUTBOUND_BYTES: usize = 64 * 4;

/// Largest accepted inbound signal data: 80 32-bit words
pub const MAX_INBOUND_BYTES: usize = 80 * 4;

/// Index of a platform in the host simulation
pub type PlatformIndex = usize;

/// Distributed simulation entity identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntityId {
    /// Site number
    pub site: u16,
    /// Application number within the site
    pub application: u16,
    /// Entity number within the application
    pub entity: u16,
}

impl EntityId {
    /// Creates an entity identifier.
    pub fn new(site: u16, application: u16, entity: u16) -> Self {
        Self {
            site,
            application,
            entity,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.site, self.application, self.entity)
    }
}

/// Originator of an outbound transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sender {
    /// Sending platform
    pub index: PlatformIndex,
    /// Terminal on the platform, stamped into the signal record
    pub radio_id: u16,
}

impl Sender {
    /// Creates a sender on radio 0.
    pub fn new(index: PlatformIndex) -> Self {
        Self { index, radio_id: 0 }
    }

    /// Sets the radio (terminal) id.
    pub fn with_radio_id(mut self, radio_id: u16) -> Self {
        self.radio_id = radio_id;
        self
    }
}

/// Signal record exchanged with the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalPdu {
    /// Entity that transmitted the signal
    pub entity_id: EntityId,
    pub radio_id: u16,
    /// 6 (no header) or 100 (20-byte header)
    pub tdl_type: u8,
    /// Encoding class OR'd with the J-series word count
    pub encoding_scheme: u16,
    pub sample_rate: u32,
    pub sample_count: u16,
    /// Header bytes followed by big-endian message words
    pub data: Bytes,
}

impl SignalPdu {
    /// Creates a raw-binary signal record with zeroed radio and sample fields.
    pub fn new(entity_id: EntityId, tdl_type: u8, word_count: u16, data: Bytes) -> Self {
        Self {
            entity_id,
            radio_id: 0,
            tdl_type,
            encoding_scheme: ENCODING_RAW_BINARY | (word_count & ENCODING_WORD_COUNT_MASK),
            sample_rate: 0,
            sample_count: 0,
            data,
        }
    }

    /// J-series word count carried in the encoding scheme.
    pub fn word_count(&self) -> usize {
        usize::from(self.encoding_scheme & ENCODING_WORD_COUNT_MASK)
    }
}

/// Radio transmit state reported alongside signal traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    /// Radio on and keyed
    OnAndTransmitting,
    /// Radio on, transmission ended
    OnNotTransmitting,
}

/// Transmitter state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitterPdu {
    pub entity_id: EntityId,
    pub radio_id: u16,
    pub state: TransmitState,
}

/// Transport the gateway publishes to.
///
/// Calls are made synchronously from the host's event dispatch and must not
/// block.
pub trait Transport {
    /// Entity id of a local platform, or `None` if the platform is not
    /// published on the transport.
    fn entity_id_for(&self, platform: PlatformIndex) -> Option<EntityId>;

    /// Publishes a signal record.
    fn put_signal(&mut self, sim_time: f64, pdu: SignalPdu);

    /// Publishes a transmitter state record.
    fn put_transmitter(&mut self, sim_time: f64, pdu: TransmitterPdu);

    /// True while transport output is globally suppressed.
    fn output_suppressed(&self) -> bool {
        false
    }

    /// Simulation time before which no transmitter state is published.
    fn initial_distribution_interval(&self) -> f64 {
        0.0
    }
}
