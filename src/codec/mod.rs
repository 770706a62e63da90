//! RIFF/WAVE container codec
//!
//! Decodes a byte buffer into a [`WavHeader`] plus a sequence of signed
//! integer samples, and encodes a header + sample sequence back into bytes.
//! Only canonical 16-byte PCM fmt chunks are written; unknown chunks are
//! skipped on read and never re-emitted.

mod header;
mod wav;

pub use header::{SampleRange, WavHeader};
pub use wav::{decode, encode, DecodedWav, EncodedWav};
