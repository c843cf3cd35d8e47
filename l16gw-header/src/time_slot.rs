//! Link clock arithmetic
//!
//! Converts simulation time plus a local slot index into the link's
//! representation: seconds and fractional seconds since 1900-01-01, the
//! epoch number, and the absolute time slot index within the epoch.
//!
//! One frame is 12 seconds and holds 1536 slots. One epoch is 64 frames
//! (768 seconds). Local slot 0 is aligned with the absolute slot that was
//! current inside the 12-second frame at simulation start, so local time and
//! an external link clock agree at t = 0.

use chrono::{NaiveDateTime, Timelike};

/// Time slots per 12-second frame
pub const SLOTS_PER_FRAME: u32 = 1536;

/// Seconds per frame
pub const FRAME_SECONDS: u32 = 12;

/// Seconds per epoch (12.8 minutes)
pub const EPOCH_SECONDS: u32 = 768;

/// Frames per epoch
pub const FRAMES_PER_EPOCH: u32 = EPOCH_SECONDS / FRAME_SECONDS;

/// Seconds between 1900-01-01 and the Unix epoch
const SECONDS_1900_TO_1970: f64 = 2_208_988_800.0;

/// Link time of one transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTime {
    /// Whole seconds since 1900-01-01 00:00:00
    pub seconds_since_1900: u32,
    /// Fraction of the current second scaled to the full `u32` range
    pub fraction: u32,
    /// Epoch number (768-second periods since midnight, modulo 256)
    pub epoch: u8,
    /// Absolute slot index within the epoch (frame * 1536 + slot)
    pub slot_index: u32,
}

impl LinkTime {
    /// Packs slot index (low 24 bits) and epoch (high 8 bits).
    pub fn time_slot_id(&self) -> u32 {
        (self.slot_index & 0x00FF_FFFF) | (u32::from(self.epoch) << 24)
    }

    /// Frame number within the epoch (0..64).
    pub fn frame_number(&self) -> u32 {
        self.slot_index / SLOTS_PER_FRAME
    }
}

/// Link clock anchored at the scenario's calendar start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlotClock {
    seconds_since_1900_at_start: f64,
    seconds_since_midnight_at_start: f64,
    slot_offset: u32,
}

impl TimeSlotClock {
    /// Creates the clock from the scenario start date and time (UTC).
    pub fn new(start: NaiveDateTime) -> Self {
        let unix_seconds = start.and_utc().timestamp_millis() as f64 / 1000.0;
        let time = start.time();
        // nanosecond() exceeds 1e9 only inside a leap second
        let sub_second = f64::from(time.nanosecond() % 1_000_000_000) * 1e-9;
        let since_midnight = f64::from(time.num_seconds_from_midnight()) + sub_second;

        Self::from_start_offsets(unix_seconds + SECONDS_1900_TO_1970, since_midnight)
    }

    /// Creates the clock from precomputed start offsets.
    ///
    /// # Arguments
    /// * `seconds_since_1900` - seconds from 1900-01-01 to simulation start
    /// * `seconds_since_midnight` - seconds from midnight of the start date to simulation start
    pub fn from_start_offsets(seconds_since_1900: f64, seconds_since_midnight: f64) -> Self {
        let seconds_after_frame = seconds_since_midnight % f64::from(FRAME_SECONDS);
        let slot_offset = (seconds_after_frame * f64::from(SLOTS_PER_FRAME) / f64::from(FRAME_SECONDS))
            .ceil() as u32;

        Self {
            seconds_since_1900_at_start: seconds_since_1900,
            seconds_since_midnight_at_start: seconds_since_midnight,
            slot_offset,
        }
    }

    /// Seconds from 1900-01-01 to simulation start.
    pub fn seconds_since_1900_at_start(&self) -> f64 {
        self.seconds_since_1900_at_start
    }

    /// Seconds from midnight of the start date to simulation start.
    pub fn seconds_since_midnight_at_start(&self) -> f64 {
        self.seconds_since_midnight_at_start
    }

    /// Absolute slot that local slot 0 maps to inside a frame.
    pub fn slot_offset(&self) -> u32 {
        self.slot_offset
    }

    /// Computes the link time for a transmission at `sim_time` in `local_slot`.
    ///
    /// The fractional second is scaled by `0xFFFFFFFF`. No authoritative
    /// definition of that field was available; the scaling is kept as-is
    /// for compatibility with existing recordings.
    pub fn link_time(&self, sim_time: f64, local_slot: u32) -> LinkTime {
        let seconds_now = sim_time + self.seconds_since_1900_at_start;
        // Wraps modulo 2^32 at the 2036-02-07 era rollover
        let seconds_since_1900 = seconds_now as u64 as u32;
        let fraction = (seconds_now.fract() * f64::from(u32::MAX)) as u32;

        let since_midnight = (self.seconds_since_midnight_at_start + sim_time) as u32;
        let epoch = ((since_midnight / EPOCH_SECONDS) % 256) as u8;
        let frame_number = (since_midnight % EPOCH_SECONDS) / FRAME_SECONDS;

        // Unassigned slots carry 0xFFFFFFFF, so the sum wraps.
        let slot_in_frame = local_slot.wrapping_add(self.slot_offset) % SLOTS_PER_FRAME;

        LinkTime {
            seconds_since_1900,
            fraction,
            epoch,
            slot_index: frame_number * SLOTS_PER_FRAME + slot_in_frame,
        }
    }

    /// Converts an absolute link slot number back to a local slot in `0..1536`.
    pub fn to_local_slot(&self, link_slot: u32) -> u32 {
        link_slot.wrapping_add(SLOTS_PER_FRAME - self.slot_offset) % SLOTS_PER_FRAME
    }
}
