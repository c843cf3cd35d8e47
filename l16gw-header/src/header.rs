//! TDL header encoding and decoding
//!
//! Header type 100 carries a 20-byte header ahead of the message words;
//! header type 6 carries none. The 20 bytes hold the same nine logical
//! fields under either swap method, only the byte placement differs:
//!
//! ```text
//! fields_only (offsets in bytes):
//!   0  npg (16)      2 net_number   3 tsec   4 msec   5 message_type   6 spare (16)
//!   8  time_slot_id (32)
//!   12 transmit_int (32)
//!   16 transmit_frac (32)
//!
//! fields_then_word_boundary:
//!   the legacy field order
//!     spare (16), npg (16) | message_type, msec, tsec, net_number | time_slot_id
//!     | transmit_int | transmit_frac
//!   written big-endian, then the four bytes of every 32-bit word reversed.
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use l16gw_common::{HeaderType, SwapMethod};

use crate::error::HeaderError;
use crate::time_slot::TimeSlotClock;

/// Size of the header type 100 header in bytes
pub const HEADER_SIZE: usize = HeaderType::TDL_100_HEADER_SIZE;

/// Sentinel for TSEC/MSEC/net number when slot timing is not modelled
const UNASSIGNED_U8: u8 = 0xFF;

/// Sentinel for an unassigned slot number
const UNASSIGNED_SLOT: u32 = 0xFFFF_FFFF;

/// Per-send slot parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotParameters {
    /// Network participation group
    pub npg: u16,
    /// Net number
    pub net_number: u8,
    /// Time-second-of-frame
    pub tsec: u8,
    /// Millisecond-of-frame
    pub msec: u8,
    /// Local slot number
    pub slot_number: u32,
}

impl SlotParameters {
    /// Creates slot parameters from explicit values.
    pub fn new(npg: u16, net_number: u8, tsec: u8, msec: u8, slot_number: u32) -> Self {
        Self {
            npg,
            net_number,
            tsec,
            msec,
            slot_number,
        }
    }

    /// Parameters for a send without slot assignment: sentinel timing, given NPG.
    pub fn unassigned(npg: u16) -> Self {
        Self::new(npg, UNASSIGNED_U8, UNASSIGNED_U8, UNASSIGNED_U8, UNASSIGNED_SLOT)
    }

    /// Parameters for pre-encoded traffic: everything zero except the NPG.
    pub fn raw(npg: u16) -> Self {
        Self::new(npg, 0, 0, 0, 0)
    }
}

/// Logical content of the 20-byte header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Network participation group
    pub npg: u16,
    /// Net number
    pub net_number: u8,
    /// Time-second-of-frame
    pub tsec: u8,
    /// Millisecond-of-frame
    pub msec: u8,
    /// Message type (packing)
    pub message_type: u8,
    /// Unused, always 0 on transmit
    pub spare: u16,
    /// Low 24 bits slot index, high 8 bits epoch
    pub time_slot_id: u32,
    /// Seconds since 1900-01-01
    pub transmit_int: u32,
    /// Fraction of the second, scaled to the full `u32` range
    pub transmit_frac: u32,
}

impl HeaderRecord {
    /// Replaces the timing fields with their "not simulated" sentinels.
    ///
    /// Must run after the record is populated from slot parameters.
    pub fn apply_degraded_fidelity(&mut self) {
        self.tsec = UNASSIGNED_U8;
        self.msec = UNASSIGNED_U8;
        self.net_number = 0;
        self.time_slot_id = 0;
        self.transmit_int = u32::MAX;
        self.transmit_frac = u32::MAX;
    }

    /// Slot index within the epoch.
    pub fn slot_index(&self) -> u32 {
        self.time_slot_id & 0x00FF_FFFF
    }

    /// Epoch number.
    pub fn epoch(&self) -> u8 {
        (self.time_slot_id >> 24) as u8
    }
}

/// Header codec for one configured header type and swap method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCodec {
    header_type: HeaderType,
    swap_method: SwapMethod,
}

impl HeaderCodec {
    /// Creates a codec for the given header type and byte layout.
    pub fn new(header_type: HeaderType, swap_method: SwapMethod) -> Self {
        Self {
            header_type,
            swap_method,
        }
    }

    /// Configured header type.
    pub fn header_type(&self) -> HeaderType {
        self.header_type
    }

    /// Byte layout used for type-100 headers.
    pub fn swap_method(&self) -> SwapMethod {
        self.swap_method
    }

    /// Bytes the header occupies on the wire (0 or 20).
    pub fn header_size(&self) -> usize {
        self.header_type.header_size()
    }

    /// Populates a header record for a transmission at `sim_time`.
    ///
    /// A `tsa_level` of 0 replaces the timing fields with sentinels after
    /// the record has been filled in.
    pub fn build_record(
        &self,
        clock: &TimeSlotClock,
        tsa_level: i32,
        sim_time: f64,
        params: &SlotParameters,
    ) -> HeaderRecord {
        let link_time = clock.link_time(sim_time, params.slot_number);

        let mut record = HeaderRecord {
            npg: params.npg,
            net_number: params.net_number,
            tsec: params.tsec,
            msec: params.msec,
            message_type: 0,
            spare: 0,
            time_slot_id: link_time.time_slot_id(),
            transmit_int: link_time.seconds_since_1900,
            transmit_frac: link_time.fraction,
        };

        if tsa_level == 0 {
            record.apply_degraded_fidelity();
        }
        record
    }

    /// Serializes a header record. Header type 6 yields no bytes.
    pub fn encode(&self, record: &HeaderRecord) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.header_size());
        self.encode_into(record, &mut buf);
        buf.freeze()
    }

    /// Appends the serialized header to `buf`.
    pub fn encode_into(&self, record: &HeaderRecord, buf: &mut BytesMut) {
        match self.header_type {
            HeaderType::Tdl6 => {}
            HeaderType::Tdl100 => match self.swap_method {
                SwapMethod::FieldsOnly => encode_fields_only(record, buf),
                SwapMethod::FieldsThenWordBoundary => encode_word_boundary(record, buf),
            },
        }
    }

    /// Parses the header at the start of `data`.
    ///
    /// Returns the record and the number of bytes consumed. Header type 6
    /// consumes nothing and returns a default record.
    pub fn decode(&self, data: &[u8]) -> Result<(HeaderRecord, usize), HeaderError> {
        match self.header_type {
            HeaderType::Tdl6 => Ok((HeaderRecord::default(), 0)),
            HeaderType::Tdl100 => {
                if data.len() < HEADER_SIZE {
                    return Err(HeaderError::Truncated {
                        needed: HEADER_SIZE,
                        available: data.len(),
                    });
                }
                let header = &data[..HEADER_SIZE];
                let record = match self.swap_method {
                    SwapMethod::FieldsOnly => decode_fields_only(header),
                    SwapMethod::FieldsThenWordBoundary => decode_word_boundary(header),
                };
                Ok((record, HEADER_SIZE))
            }
        }
    }
}

fn encode_fields_only(record: &HeaderRecord, buf: &mut BytesMut) {
    buf.put_u16(record.npg);
    buf.put_u8(record.net_number);
    buf.put_u8(record.tsec);
    buf.put_u8(record.msec);
    buf.put_u8(record.message_type);
    buf.put_u16(record.spare);
    buf.put_u32(record.time_slot_id);
    buf.put_u32(record.transmit_int);
    buf.put_u32(record.transmit_frac);
}

fn decode_fields_only(mut buf: &[u8]) -> HeaderRecord {
    HeaderRecord {
        npg: buf.get_u16(),
        net_number: buf.get_u8(),
        tsec: buf.get_u8(),
        msec: buf.get_u8(),
        message_type: buf.get_u8(),
        spare: buf.get_u16(),
        time_slot_id: buf.get_u32(),
        transmit_int: buf.get_u32(),
        transmit_frac: buf.get_u32(),
    }
}

fn encode_word_boundary(record: &HeaderRecord, buf: &mut BytesMut) {
    let first = (u32::from(record.spare) << 16) | u32::from(record.npg);
    let second = u32::from_be_bytes([
        record.message_type,
        record.msec,
        record.tsec,
        record.net_number,
    ]);

    // Big-endian fields followed by a per-word byte reversal is little-endian words.
    for word in [
        first,
        second,
        record.time_slot_id,
        record.transmit_int,
        record.transmit_frac,
    ] {
        buf.put_u32_le(word);
    }
}

fn decode_word_boundary(mut buf: &[u8]) -> HeaderRecord {
    let first = buf.get_u32_le();
    let [message_type, msec, tsec, net_number] = buf.get_u32_le().to_be_bytes();

    HeaderRecord {
        npg: first as u16,
        net_number,
        tsec,
        msec,
        message_type,
        spare: (first >> 16) as u16,
        time_slot_id: buf.get_u32_le(),
        transmit_int: buf.get_u32_le(),
        transmit_frac: buf.get_u32_le(),
    }
}
