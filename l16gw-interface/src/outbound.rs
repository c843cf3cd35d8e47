//! Outbound pipeline
//!
//! Builds a signal record from a J-series message:
//!
//! 1. drop the message if it is filtered for the sender
//! 2. resolve the sender's transport entity
//! 3. take the caller's slot parameters or route by label
//! 4. header, message words, optional J31.7 fill
//! 5. hand the record to the transport unless output is suppressed
//!
//! Message words go on the wire as big-endian 32-bit words whatever swap
//! method the header uses.

use bytes::{BufMut, BytesMut};
use l16gw_common::{log_tdl_message, Direction, WordReader, WordWriter};
use l16gw_header::{fill_words_needed, SlotParameters};

use crate::error::SendError;
use crate::interface::LinkInterface;
use crate::message::{JMessage, MessageCodec, J_WORD_BITS};
use crate::transport::{
    EntityId, Sender, SignalPdu, TransmitState, TransmitterPdu, MAX_OUTBOUND_BYTES,
};

/// Body of a transmission
enum Payload<'a> {
    /// Host-order words from a codec, written big-endian
    Words(&'a [u32]),
    /// Bytes already in wire order
    Raw(&'a [u8]),
}

impl Payload<'_> {
    fn len(&self) -> usize {
        match self {
            Payload::Words(words) => words.len() * 4,
            Payload::Raw(bytes) => bytes.len(),
        }
    }

    fn write_to(&self, buf: &mut BytesMut) {
        match self {
            Payload::Words(words) => {
                for &word in words.iter() {
                    buf.put_u32(word);
                }
            }
            Payload::Raw(bytes) => buf.put_slice(bytes),
        }
    }
}

impl<C: MessageCodec> LinkInterface<C> {
    /// Sends one J-series message.
    ///
    /// Without `slot_params` the message goes out unassigned: sentinel
    /// timing, NPG from the label routing table. Filtered messages and
    /// senders without a transport entity are dropped and return `Ok`.
    pub fn send(
        &mut self,
        sim_time: f64,
        sender: &Sender,
        message: &C::Message,
        slot_params: Option<SlotParameters>,
    ) -> Result<(), SendError> {
        let (label, sublabel) = (message.label(), message.sublabel());

        if self.filters.is_filtered(Some(sender.index), label, sublabel) {
            self.stats.filtered_outbound += 1;
            if self.config.debug {
                tracing::debug!(platform = sender.index, "{} filtered", message.name());
            }
            return Ok(());
        }

        let Some(entity_id) = self.sender_entity(sender) else {
            return Ok(());
        };

        let params =
            slot_params.unwrap_or_else(|| SlotParameters::unassigned(self.npg_table.lookup(label)));

        let time_slot_type = self.config.time_slot_type;
        let mut writer = WordWriter::with_capacity(MAX_OUTBOUND_BYTES / 4);
        self.codec.write_message(message, time_slot_type, &mut writer);

        let message_words = message.word_count();
        let fill_words = if self.config.fill_with_31_7 {
            fill_words_needed(message_words)
        } else {
            0
        };
        for _ in 0..fill_words {
            self.codec.write_filler(time_slot_type, &mut writer);
        }

        let pdu = self.frame(
            sim_time,
            entity_id,
            sender.radio_id,
            &params,
            Payload::Words(writer.words()),
            message_words + fill_words,
        )?;

        let description = format!("{} npg {} fill {}", message.name(), params.npg, fill_words);
        self.transmit(sim_time, pdu, &description);
        Ok(())
    }

    /// Sends words already encoded by the caller.
    ///
    /// No filtering and no fill; `message_count` goes into the encoding
    /// scheme as given.
    pub fn send_user_defined(
        &mut self,
        sim_time: f64,
        sender: &Sender,
        words: &[u32],
        slot_params: SlotParameters,
        message_count: usize,
    ) -> Result<(), SendError> {
        let Some(entity_id) = self.sender_entity(sender) else {
            return Ok(());
        };

        let pdu = self.frame(
            sim_time,
            entity_id,
            sender.radio_id,
            &slot_params,
            Payload::Words(words),
            message_count,
        )?;

        self.transmit(sim_time, pdu, "user defined");
        Ok(())
    }

    /// Sends big-endian message bytes as they are.
    ///
    /// The header slot parameters are zero except for `npg`. The word count
    /// in the encoding scheme is taken from the first message the codec can
    /// decode from `data`.
    pub fn send_raw(
        &mut self,
        sim_time: f64,
        sender: &Sender,
        data: &[u8],
        npg: u16,
    ) -> Result<(), SendError> {
        let Some(entity_id) = self.sender_entity(sender) else {
            return Ok(());
        };
        self.check_size(data.len())?;

        let words = words_from_be_bytes(data);
        let mut reader = WordReader::new(&words);
        let budget = data.len() * 8 / J_WORD_BITS;
        let first = self
            .codec
            .read_messages(&mut reader, budget)
            .into_iter()
            .flatten()
            .next();

        let Some(first) = first else {
            self.stats.decode_failures += 1;
            tracing::debug!(len = data.len(), "Raw send without a decodable message");
            return Err(SendError::Undecodable);
        };

        let pdu = self.frame(
            sim_time,
            entity_id,
            sender.radio_id,
            &SlotParameters::raw(npg),
            Payload::Raw(data),
            first.word_count(),
        )?;

        let description = format!("raw {} npg {}", first.name(), npg);
        self.transmit(sim_time, pdu, &description);
        Ok(())
    }

    /// Reports that a terminal started transmitting.
    pub fn message_transmitted(&mut self, sim_time: f64, sender: &Sender) {
        self.report_transmitter(sim_time, sender, TransmitState::OnAndTransmitting);
    }

    /// Reports that a terminal finished transmitting.
    pub fn message_transmit_ended(&mut self, sim_time: f64, sender: &Sender) {
        self.report_transmitter(sim_time, sender, TransmitState::OnNotTransmitting);
    }

    /// Periodic transmitter report while a terminal is transmitting.
    pub fn message_transmitted_heartbeat(&mut self, sim_time: f64, sender: &Sender) {
        self.report_transmitter(sim_time, sender, TransmitState::OnAndTransmitting);
    }

    fn report_transmitter(&mut self, sim_time: f64, sender: &Sender, state: TransmitState) {
        if self.transport.output_suppressed()
            || sim_time < self.transport.initial_distribution_interval()
        {
            return;
        }
        let Some(entity_id) = self.transport.entity_id_for(sender.index) else {
            return;
        };

        if self.config.debug {
            tracing::debug!(
                platform = sender.index,
                radio_id = sender.radio_id,
                ?state,
                "Sending transmitter state"
            );
        }

        self.transport.put_transmitter(
            sim_time,
            TransmitterPdu {
                entity_id,
                radio_id: sender.radio_id,
                state,
            },
        );
        self.stats.transmitter_states += 1;
    }

    fn sender_entity(&mut self, sender: &Sender) -> Option<EntityId> {
        let entity_id = self.transport.entity_id_for(sender.index);
        if entity_id.is_none() {
            self.stats.unknown_sender += 1;
            if self.config.debug {
                tracing::debug!(platform = sender.index, "Sender has no transport entity");
            }
        }
        entity_id
    }

    /// Returns the transmission size for a body of `body_len` bytes.
    fn check_size(&mut self, body_len: usize) -> Result<usize, SendError> {
        let size = self.header_codec.header_size() + body_len;
        if size > MAX_OUTBOUND_BYTES {
            self.stats.oversize += 1;
            tracing::warn!(size, capacity = MAX_OUTBOUND_BYTES, "Transmission too large, dropped");
            return Err(SendError::TooLarge {
                size,
                capacity: MAX_OUTBOUND_BYTES,
            });
        }
        Ok(size)
    }

    /// Prefixes the header and wraps the result in a signal record.
    fn frame(
        &mut self,
        sim_time: f64,
        entity_id: EntityId,
        radio_id: u16,
        params: &SlotParameters,
        payload: Payload<'_>,
        word_count: usize,
    ) -> Result<SignalPdu, SendError> {
        let size = self.check_size(payload.len())?;

        let mut buf = BytesMut::with_capacity(size);
        let record =
            self.header_codec
                .build_record(&self.clock, self.config.tsa_level, sim_time, params);
        self.header_codec.encode_into(&record, &mut buf);
        payload.write_to(&mut buf);

        // Bounded by the buffer capacity
        let word_count = u16::try_from(word_count).unwrap_or(u16::MAX);
        let mut pdu = SignalPdu::new(
            entity_id,
            self.config.tdl_header.tdl_type(),
            word_count,
            buf.freeze(),
        );
        pdu.radio_id = radio_id;
        Ok(pdu)
    }

    fn transmit(&mut self, sim_time: f64, pdu: SignalPdu, description: &str) {
        log_tdl_message(Direction::Tx, pdu.tdl_type, description, &pdu.data);

        if self.transport.output_suppressed() {
            self.stats.suppressed += 1;
            return;
        }
        self.transport.put_signal(sim_time, pdu);
        self.stats.sent += 1;
    }
}

/// Reads big-endian words, zero-padding a trailing partial word.
pub(crate) fn words_from_be_bytes(data: &[u8]) -> Vec<u32> {
    data.chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .collect()
}
