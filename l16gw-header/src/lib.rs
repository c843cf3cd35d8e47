//! Link-16 TDL header library
//!
//! Implements the link clock arithmetic (epoch, frame and time slot numbering
//! against a 1900-01-01 reference), the 20-byte TDL 100 header in both swap
//! conventions, and the J31.7 filler-word policy.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use l16gw_common::{HeaderType, SwapMethod};
//! use l16gw_header::{HeaderCodec, SlotParameters, TimeSlotClock};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .unwrap()
//!     .and_hms_opt(6, 0, 5)
//!     .unwrap();
//! let clock = TimeSlotClock::new(start);
//!
//! let codec = HeaderCodec::new(HeaderType::Tdl100, SwapMethod::FieldsOnly);
//! let params = SlotParameters::new(15, 1, 3, 4, 100);
//! let record = codec.build_record(&clock, 1, 42.5, &params);
//!
//! let encoded = codec.encode(&record);
//! let (decoded, consumed) = codec.decode(&encoded).unwrap();
//! assert_eq!(consumed, 20);
//! assert_eq!(decoded, record);
//! ```

pub mod error;
pub mod fill;
pub mod header;
pub mod time_slot;

pub use error::HeaderError;
pub use fill::{fill_words_needed, FILL_BOUNDARIES};
pub use header::{HeaderCodec, HeaderRecord, SlotParameters, HEADER_SIZE};
pub use time_slot::{
    LinkTime, TimeSlotClock, EPOCH_SECONDS, FRAMES_PER_EPOCH, FRAME_SECONDS, SLOTS_PER_FRAME,
};
