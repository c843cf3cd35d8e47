//! J31.7 filler policy
//!
//! A transmission is padded with filler words up to the next standard block
//! length. Messages already longer than the largest block get no padding.

/// Standard block lengths in J-series words, ascending
pub const FILL_BOUNDARIES: [usize; 3] = [3, 6, 12];

/// Number of filler words needed after a message of `message_words` words.
///
/// # Example
/// ```
/// use l16gw_header::fill_words_needed;
///
/// assert_eq!(fill_words_needed(4), 2);
/// assert_eq!(fill_words_needed(13), 0);
/// ```
pub fn fill_words_needed(message_words: usize) -> usize {
    FILL_BOUNDARIES
        .iter()
        .find(|&&boundary| boundary >= message_words)
        .map_or(0, |&boundary| boundary - message_words)
}
