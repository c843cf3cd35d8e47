//! `WordWriter` / `WordReader` - bit-level access to a sequence of 32-bit words.
//!
//! Message codecs pack J-series words into 32-bit host integers. Bit `n` of
//! the stream lives in word `n / 32` at bit position `n % 32` (LSB first),
//! matching the Link-16 convention of numbering word bits from the least
//! significant end. The pipelines put these integers on the wire big-endian.

/// Growable bit writer over 32-bit words.
///
/// # Example
/// ```
/// use l16gw_common::WordWriter;
///
/// let mut writer = WordWriter::new();
/// writer.write_bits(0b101, 3);
/// writer.skip(29);
/// writer.write_bits(0xFF, 8);
///
/// assert_eq!(writer.bit_offset(), 40);
/// assert_eq!(writer.words(), &[0b101, 0xFF]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordWriter {
    words: Vec<u32>,
    index: usize, // bit index
}

impl WordWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `words` 32-bit words.
    pub fn with_capacity(words: usize) -> Self {
        Self {
            words: Vec::with_capacity(words),
            index: 0,
        }
    }

    /// Returns the current bit offset.
    #[inline]
    pub fn bit_offset(&self) -> usize {
        self.index
    }

    /// Writes a single bit.
    #[inline]
    pub fn write(&mut self, bit: bool) {
        let word_index = self.index / 32;
        let bit_index = self.index % 32;
        if word_index >= self.words.len() {
            self.words.resize(word_index + 1, 0);
        }

        if bit {
            self.words[word_index] |= 1 << bit_index;
        } else {
            self.words[word_index] &= !(1 << bit_index);
        }
        self.index += 1;
    }

    /// Writes the low `len` bits of `value`, least significant bit first.
    ///
    /// # Panics
    /// Panics if `len` > 64.
    #[inline]
    pub fn write_bits(&mut self, value: u64, len: usize) {
        assert!(len <= 64, "len must be <= 64");
        for i in 0..len {
            self.write((value >> i) & 1 != 0);
        }
    }

    /// Advances the bit offset, leaving the skipped bits zero.
    pub fn skip(&mut self, len: usize) {
        self.index += len;
        let needed = self.word_count();
        if needed > self.words.len() {
            self.words.resize(needed, 0);
        }
    }

    /// Returns the number of 32-bit words touched so far (rounded up).
    #[inline]
    pub fn word_count(&self) -> usize {
        self.index.div_ceil(32)
    }

    /// Returns the written words.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words[..self.word_count()]
    }

    /// Consumes the writer and returns the written words.
    pub fn into_words(mut self) -> Vec<u32> {
        let count = self.word_count();
        self.words.truncate(count);
        self.words
    }
}

/// Bit reader over a borrowed slice of 32-bit words.
///
/// Reading past the end yields zero bits; callers check
/// [`remaining_bits`](Self::remaining_bits) when they need to know.
#[derive(Debug, Clone)]
pub struct WordReader<'a> {
    words: &'a [u32],
    index: usize, // bit index
}

impl<'a> WordReader<'a> {
    /// Creates a reader positioned at bit 0.
    pub fn new(words: &'a [u32]) -> Self {
        Self { words, index: 0 }
    }

    /// Returns the current bit offset.
    #[inline]
    pub fn bit_offset(&self) -> usize {
        self.index
    }

    /// Seeks to the specified bit offset.
    #[inline]
    pub fn seek(&mut self, index: usize) {
        self.index = index;
    }

    /// Total number of bits available.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.words.len() * 32
    }

    /// Bits left between the current offset and the end of the input.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits().saturating_sub(self.index)
    }

    /// Reads a single bit.
    #[inline]
    pub fn read(&mut self) -> bool {
        let word_index = self.index / 32;
        let bit_index = self.index % 32;
        self.index += 1;
        self.words
            .get(word_index)
            .is_some_and(|word| (word >> bit_index) & 1 != 0)
    }

    /// Reads `len` bits, least significant bit first.
    ///
    /// # Panics
    /// Panics if `len` > 64.
    #[inline]
    pub fn read_bits(&mut self, len: usize) -> u64 {
        assert!(len <= 64, "len must be <= 64");
        let mut result = 0u64;
        for i in 0..len {
            if self.read() {
                result |= 1 << i;
            }
        }
        result
    }

    /// Advances the bit offset without reading.
    #[inline]
    pub fn skip(&mut self, len: usize) {
        self.index += len;
    }
}
