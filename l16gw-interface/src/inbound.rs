//! Inbound pipeline
//!
//! Takes a signal record from the transport, strips the header named by its
//! TDL type, decodes the J-series words and routes each message: J11 to the
//! weapon coordination handler, everything else to subscribers.
//!
//! A message position the codec cannot decode is skipped; messages before
//! and after it in the same record are still delivered.

use l16gw_common::{log_tdl_message, Direction, HeaderType, WordReader};
use l16gw_header::HeaderCodec;

use crate::error::ReceiveError;
use crate::interface::LinkInterface;
use crate::message::{JMessage, MessageCodec, LABEL_WEAPON_COORDINATION};
use crate::outbound::words_from_be_bytes;
use crate::transport::{EntityId, SignalPdu, MAX_INBOUND_BYTES};

impl<C: MessageCodec> LinkInterface<C> {
    /// Processes one inbound signal record.
    ///
    /// Unsupported TDL types and bad lengths reject the whole record.
    pub fn receive(&mut self, sim_time: f64, pdu: &SignalPdu) -> Result<(), ReceiveError> {
        let data = &pdu.data[..];

        if self.config.debug {
            tracing::debug!(
                entity = %pdu.entity_id,
                len = data.len(),
                words = pdu.word_count(),
                "Received signal"
            );
        }

        let Some(header_type) = HeaderType::from_tdl_type(pdu.tdl_type) else {
            self.stats.rejected += 1;
            tracing::debug!(tdl_type = pdu.tdl_type, "Unsupported TDL type, signal dropped");
            return Err(ReceiveError::UnsupportedType(pdu.tdl_type));
        };

        if data.is_empty() || data.len() > MAX_INBOUND_BYTES {
            self.stats.rejected += 1;
            tracing::debug!(len = data.len(), "Invalid signal length, signal dropped");
            return Err(ReceiveError::InvalidLength(data.len()));
        }

        let header_codec = HeaderCodec::new(header_type, self.config.swap_method);
        let (header, consumed) = match header_codec.decode(data) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.stats.rejected += 1;
                tracing::debug!(error = %e, "Signal shorter than its header, signal dropped");
                return Err(ReceiveError::InvalidLength(data.len()));
            }
        };
        if header_type == HeaderType::Tdl100 {
            self.last_header = Some(header);
        }

        self.stats.received += 1;
        log_tdl_message(
            Direction::Rx,
            pdu.tdl_type,
            &format!("from {}", pdu.entity_id),
            data,
        );

        let words = words_from_be_bytes(&data[consumed..]);
        let mut reader = WordReader::new(&words);
        let messages = self.codec.read_messages(&mut reader, pdu.word_count());

        for message in messages {
            match message {
                Some(message) => self.dispatch(sim_time, pdu.entity_id, &message),
                None => {
                    self.stats.decode_failures += 1;
                    if self.config.debug {
                        tracing::debug!(entity = %pdu.entity_id, "Cannot decode message");
                    }
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, sim_time: f64, sender: EntityId, message: &C::Message) {
        let (label, sublabel) = (message.label(), message.sublabel());
        if self.config.debug {
            tracing::debug!(entity = %sender, "Received {}", message.name());
        }

        if label == LABEL_WEAPON_COORDINATION {
            match self.coordinator.as_mut() {
                Some(coordinator) => {
                    coordinator.on_j11_message(sim_time, sender, message, sublabel);
                    self.stats.forwarded_j11 += 1;
                }
                None => self.stats.ignored_inbound += 1,
            }
            return;
        }

        if self.config.ignore_inbound_messages || self.filters.is_globally_filtered(label, sublabel) {
            self.stats.ignored_inbound += 1;
            return;
        }

        for callback in self.subscribers.iter_mut() {
            callback(sim_time, message);
        }
        self.stats.published += 1;
    }
}
