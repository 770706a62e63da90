//! WAV format descriptor
//!
//! `WavHeader` is a plain value type. `byte_rate` and `block_align` are
//! derived fields, never independently authoritative: they are recomputed
//! from channels/sample_rate/bits_per_sample whenever the header changes and
//! again before every encode.

use serde::{Deserialize, Serialize};

/// Format fields of the fmt chunk, as decoded from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavHeader {
    /// Channel count as declared by the file. Processing keeps only the
    /// first channel regardless of this value.
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample; the byte width must be a positive integer
    pub bits_per_sample: u16,
    /// Bytes per second, derived
    pub byte_rate: u32,
    /// Bytes per frame, derived
    pub block_align: u16,
}

impl WavHeader {
    /// Create a header for the given format, with derived fields computed.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        WavHeader {
            channels,
            sample_rate,
            bits_per_sample,
            byte_rate: 0,
            block_align: 0,
        }
        .normalized()
    }

    /// Width of one sample in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Return a copy with `byte_rate` and `block_align` recomputed from the
    /// authoritative fields.
    pub fn normalized(&self) -> Self {
        let bytes = self.bytes_per_sample() as u32;
        WavHeader {
            byte_rate: self.sample_rate * self.channels as u32 * bytes,
            block_align: self.channels * bytes as u16,
            ..*self
        }
    }

    /// Return a new header with a different sample rate and the derived
    /// fields recomputed. The original header is left untouched so callers
    /// holding a pre-transform header never observe the change.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Self {
        WavHeader {
            sample_rate,
            ..*self
        }
        .normalized()
    }

    /// Representable sample range for this bit depth.
    pub fn sample_range(&self) -> SampleRange {
        SampleRange::for_bits(self.bits_per_sample)
    }
}

/// Closed range of representable sample values, derived once from the bit
/// depth at decode time and held constant for the processing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: i64,
    pub max: i64,
}

impl SampleRange {
    /// Range of a two's-complement integer of the given width. Widths of 64
    /// and above span the whole sample type; the shift form would overflow.
    pub fn for_bits(bits_per_sample: u16) -> Self {
        if bits_per_sample >= 64 {
            return SampleRange {
                min: i64::MIN,
                max: i64::MAX,
            };
        }
        let bits = u32::from(bits_per_sample).max(1);
        SampleRange {
            min: -(1i64 << (bits - 1)),
            max: (1i64 << (bits - 1)) - 1,
        }
    }

    /// Saturate a value into the range (cap, never wrap).
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Whether the value is representable without saturation.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
