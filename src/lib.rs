//! ClearWave - Mono PCM Audio Cleanup
//!
//! ClearWave reads an uncompressed mono WAV file into memory, runs a chain of
//! sample-domain transforms over it, and writes the result back out in the
//! same container format.
//!
//! # Architecture
//!
//! Two components, loaded in dependency order:
//! - [`codec`]: parses raw RIFF/WAVE bytes into a header plus integer samples
//!   and serializes them back. Knows nothing about any transform.
//! - [`dsp`]: [`dsp::SampleProcessor`] owns a decoded (header, samples) pair
//!   and applies transforms in sequence; each transform's output is the next
//!   one's input.
//!
//! Everything is synchronous and in-memory; the whole file is decoded before
//! any processing starts. Multi-channel input is tolerated but only the first
//! channel is kept, with a [`error::RangeWarning`] attached to the decode
//! result.

pub mod codec;
pub mod dsp;
pub mod error;

pub use codec::{decode, encode, DecodedWav, EncodedWav, WavHeader};
pub use dsp::SampleProcessor;
pub use error::{ClearWaveError, DomainError, FormatError, RangeWarning, Result};
