//! J-series message codec contract
//!
//! The gateway never looks inside a J-series message beyond its label,
//! sublabel and length. Bit-level encoding of each message family is the
//! codec's business; the gateway hands it a [`WordWriter`] to fill on the
//! way out and a [`WordReader`] to consume on the way in.

use l16gw_common::{WordReader, WordWriter};

/// Bits per J-series word on the wire (70 data bits plus parity and spare)
pub const J_WORD_BITS: usize = 80;

/// Label of the weapon coordination and management family (J11.x)
pub const LABEL_WEAPON_COORDINATION: u8 = 11;

/// A decoded or to-be-encoded J-series message.
pub trait JMessage {
    /// Message family label (0..=31).
    fn label(&self) -> u8;

    /// Sublabel within the family (0..=7).
    fn sublabel(&self) -> u8;

    /// J-series words the message occupies: initial word plus any extension
    /// and continuation words.
    fn word_count(&self) -> usize;

    /// Display name such as `J3.2`.
    fn name(&self) -> String {
        format!("J{}.{}", self.label(), self.sublabel())
    }
}

/// Bit-level codec for one J-series message set.
pub trait MessageCodec {
    /// Message handle produced and consumed by the codec
    type Message: JMessage;

    /// Appends the words of `message` to `writer`.
    ///
    /// `time_slot_type` is the configured value stamped into the message's
    /// own header word.
    fn write_message(&self, message: &Self::Message, time_slot_type: u32, writer: &mut WordWriter);

    /// Appends one J31.7 filler word to `writer`.
    fn write_filler(&self, time_slot_type: u32, writer: &mut WordWriter);

    /// Reads consecutive messages covering at most `word_budget` J-series
    /// words.
    ///
    /// Returns one entry per message position; `None` marks a position
    /// whose words could not be decoded.
    fn read_messages(
        &self,
        reader: &mut WordReader<'_>,
        word_budget: usize,
    ) -> Vec<Option<Self::Message>>;
}
