//! Mock J-series codec
//!
//! Every J-series word is 80 bits. The initial word of a message carries:
//!
//! ```text
//! bits  0..5   label
//! bits  5..8   sublabel
//! bits  8..12  extension word count
//! bits 12..44  payload
//! bits 44..52  time slot type
//! ```
//!
//! Extension words are all zero. J31.7 filler words are skipped on read and
//! label 30 stands for a message the codec cannot decode.

use l16gw_common::{WordReader, WordWriter};
use l16gw_interface::{JMessage, MessageCodec, J_WORD_BITS};

/// Label of the filler message
pub const FILLER_LABEL: u8 = 31;

/// Sublabel of the filler message
pub const FILLER_SUBLABEL: u8 = 7;

/// Label the mock codec refuses to decode
pub const UNDECODABLE_LABEL: u8 = 30;

const INITIAL_WORD_BITS: usize = 52;

/// Message handled by [`MockCodec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMessage {
    pub label: u8,
    pub sublabel: u8,
    pub words: usize,
    pub payload: u32,
    /// Time slot type found in the initial word (decoded messages only)
    pub time_slot_type: u32,
}

impl TestMessage {
    pub fn new(label: u8, sublabel: u8, words: usize) -> Self {
        Self {
            label,
            sublabel,
            words: words.max(1),
            payload: 0,
            time_slot_type: 0,
        }
    }

    pub fn with_payload(mut self, payload: u32) -> Self {
        self.payload = payload;
        self
    }
}

impl JMessage for TestMessage {
    fn label(&self) -> u8 {
        self.label
    }

    fn sublabel(&self) -> u8 {
        self.sublabel
    }

    fn word_count(&self) -> usize {
        self.words
    }
}

/// Codec for [`TestMessage`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCodec;

impl MockCodec {
    fn write_initial(
        writer: &mut WordWriter,
        label: u8,
        sublabel: u8,
        extension_words: usize,
        payload: u32,
        time_slot_type: u32,
    ) {
        writer.write_bits(u64::from(label & 0x1F), 5);
        writer.write_bits(u64::from(sublabel & 0x07), 3);
        writer.write_bits((extension_words & 0x0F) as u64, 4);
        writer.write_bits(u64::from(payload), 32);
        writer.write_bits(u64::from(time_slot_type & 0xFF), 8);
        writer.skip(J_WORD_BITS - INITIAL_WORD_BITS);
    }
}

impl MessageCodec for MockCodec {
    type Message = TestMessage;

    fn write_message(&self, message: &TestMessage, time_slot_type: u32, writer: &mut WordWriter) {
        let extension_words = message.words.saturating_sub(1);
        Self::write_initial(
            writer,
            message.label,
            message.sublabel,
            extension_words,
            message.payload,
            time_slot_type,
        );
        writer.skip(extension_words * J_WORD_BITS);
    }

    fn write_filler(&self, time_slot_type: u32, writer: &mut WordWriter) {
        Self::write_initial(writer, FILLER_LABEL, FILLER_SUBLABEL, 0, 0, time_slot_type);
    }

    fn read_messages(&self, reader: &mut WordReader<'_>, word_budget: usize) -> Vec<Option<TestMessage>> {
        let mut messages = Vec::new();
        let mut used = 0;

        while used < word_budget && reader.remaining_bits() >= J_WORD_BITS {
            let start = reader.bit_offset();
            let label = reader.read_bits(5) as u8;
            let sublabel = reader.read_bits(3) as u8;
            let extension_words = reader.read_bits(4) as usize;
            let payload = reader.read_bits(32) as u32;
            let time_slot_type = reader.read_bits(8) as u32;

            let words = 1 + extension_words;
            reader.seek(start + words * J_WORD_BITS);
            used += words;

            if label == FILLER_LABEL && sublabel == FILLER_SUBLABEL {
                continue;
            }
            if label == UNDECODABLE_LABEL {
                messages.push(None);
                continue;
            }
            messages.push(Some(TestMessage {
                label,
                sublabel,
                words,
                payload,
                time_slot_type,
            }));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_extensions_spans_words() {
        let mut writer = WordWriter::new();
        MockCodec.write_message(&TestMessage::new(3, 2, 4).with_payload(0xDEAD_BEEF), 5, &mut writer);
        assert_eq!(writer.bit_offset(), 4 * J_WORD_BITS);
        assert_eq!(writer.word_count(), 10);

        let words = writer.into_words();
        let mut reader = WordReader::new(&words);
        let messages = MockCodec.read_messages(&mut reader, 4);
        assert_eq!(
            messages,
            vec![Some(TestMessage {
                label: 3,
                sublabel: 2,
                words: 4,
                payload: 0xDEAD_BEEF,
                time_slot_type: 5,
            })]
        );
    }

    #[test]
    fn test_fillers_are_skipped() {
        let mut writer = WordWriter::new();
        MockCodec.write_message(&TestMessage::new(2, 2, 1), 0, &mut writer);
        MockCodec.write_filler(0, &mut writer);
        MockCodec.write_filler(0, &mut writer);

        let words = writer.into_words();
        let messages = MockCodec.read_messages(&mut WordReader::new(&words), 3);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_budget_stops_reading() {
        let mut writer = WordWriter::new();
        for label in [2, 3, 7] {
            MockCodec.write_message(&TestMessage::new(label, 0, 1), 0, &mut writer);
        }
        let words = writer.into_words();
        let messages = MockCodec.read_messages(&mut WordReader::new(&words), 2);
        assert_eq!(messages.len(), 2);
    }
}
