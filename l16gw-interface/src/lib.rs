//! Link-16 gateway interface
//!
//! Connects a host simulation to a distributed simulation transport:
//! J-series messages from local platforms are framed with the TDL header and
//! published as signal records; inbound signal records are decoded and
//! republished, with J11 weapon coordination traffic routed to its own
//! handler.
//!
//! The J-series bit encoding, the transport and the weapon coordination
//! handler are supplied by the host through the [`MessageCodec`],
//! [`Transport`] and [`WeaponCoordinator`] traits.

pub mod coordination;
pub mod error;
pub mod filter;
pub mod inbound;
pub mod interface;
pub mod message;
pub mod npg;
pub mod outbound;
pub mod specific_types;
pub mod stats;
pub mod transport;

pub use coordination::{WeaponCoordinator, WeaponEngagement};
pub use error::{ReceiveError, SendError};
pub use filter::{FilterTable, MessageFilter};
pub use interface::{LinkInterface, MessageCallback};
pub use message::{JMessage, MessageCodec, J_WORD_BITS, LABEL_WEAPON_COORDINATION};
pub use npg::{NpgTable, DEFAULT_NPG};
pub use specific_types::SpecificTypeTable;
pub use stats::LinkStats;
pub use transport::{
    EntityId, PlatformIndex, Sender, SignalPdu, TransmitState, TransmitterPdu, Transport,
    ENCODING_RAW_BINARY, ENCODING_WORD_COUNT_MASK, MAX_INBOUND_BYTES, MAX_OUTBOUND_BYTES,
};
