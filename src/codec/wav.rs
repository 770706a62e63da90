//! WAV decode/encode
//!
//! The decoder accepts any chunk layout that starts with RIFF/WAVE and a fmt
//! chunk, skipping unknown chunks until it finds `data`. The encoder always
//! emits the canonical 44-byte layout: RIFF header, 16-byte PCM fmt chunk,
//! one data chunk, nothing else.

use log::{info, warn};

use crate::codec::header::WavHeader;
use crate::error::{FormatError, RangeWarning};

/// Result of decoding a WAV byte buffer.
#[derive(Debug, Clone)]
pub struct DecodedWav {
    pub header: WavHeader,
    /// First-channel samples, one signed integer per frame
    pub samples: Vec<i64>,
    pub warnings: Vec<RangeWarning>,
}

/// Result of encoding a header + sample sequence.
#[derive(Debug, Clone)]
pub struct EncodedWav {
    pub bytes: Vec<u8>,
    pub warnings: Vec<RangeWarning>,
}

/// Byte cursor over the raw container, all reads little-endian.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if self.remaining() < n {
            return Err(FormatError::Truncated { offset: self.pos });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Take up to `n` bytes, tolerating a shortfall at end of buffer.
    fn take_at_most(&mut self, n: usize) -> &'a [u8] {
        let n = n.min(self.remaining());
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    fn skip(&mut self, n: usize) -> Result<(), FormatError> {
        self.take(n).map(|_| ())
    }

    fn tag(&mut self) -> Result<[u8; 4], FormatError> {
        let bytes = self.take(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn u16_le(&mut self) -> Result<u16, FormatError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn u32_le(&mut self) -> Result<u32, FormatError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decode `bytes[..width]` as a little-endian two's-complement integer.
fn read_sample_le(bytes: &[u8]) -> i64 {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        value |= u64::from(*byte) << (8 * i);
    }
    let unused = 64 - 8 * bytes.len() as u32;
    ((value << unused) as i64) >> unused
}

/// Decode a RIFF/WAVE byte buffer into a header and first-channel samples.
///
/// Unknown chunks between fmt and data are skipped. Multi-channel input is
/// not an error: only the first sample of each frame is kept and a
/// [`RangeWarning::MultiChannel`] is attached to the result.
///
/// # Errors
/// [`FormatError`] when the RIFF/WAVE/fmt signatures mismatch, the fixed
/// header is truncated, the declared format is unusable, or no data chunk is
/// found before the end of the buffer.
pub fn decode(bytes: &[u8]) -> Result<DecodedWav, FormatError> {
    let mut reader = Reader::new(bytes);

    if reader.tag().map_err(|_| FormatError::MissingRiff)? != *b"RIFF" {
        return Err(FormatError::MissingRiff);
    }
    // Declared RIFF size, unused: the chunk scan is bounded by the buffer.
    reader.u32_le().map_err(|_| FormatError::MissingWave)?;
    if reader.tag().map_err(|_| FormatError::MissingWave)? != *b"WAVE" {
        return Err(FormatError::MissingWave);
    }

    if reader.tag().map_err(|_| FormatError::MissingFmt)? != *b"fmt " {
        return Err(FormatError::MissingFmt);
    }
    let fmt_size = reader.u32_le()? as usize;
    let _audio_format = reader.u16_le()?;
    let channels = reader.u16_le()?;
    let sample_rate = reader.u32_le()?;
    let _byte_rate = reader.u32_le()?;
    let _block_align = reader.u16_le()?;
    let bits_per_sample = reader.u16_le()?;
    // Extension bytes of an oversized fmt chunk are not interpreted.
    if fmt_size > 16 {
        reader.skip(fmt_size - 16)?;
    }

    if channels == 0 {
        return Err(FormatError::ZeroChannels);
    }
    // Samples are held as i64, so widths beyond 64 bits are unrepresentable.
    if bits_per_sample == 0 || bits_per_sample % 8 != 0 || bits_per_sample > 64 {
        return Err(FormatError::UnsupportedBitDepth(bits_per_sample));
    }

    // Scan chunks until a data chunk turns up.
    let payload = loop {
        let id = reader.tag().map_err(|_| FormatError::NoDataChunk)?;
        let size = reader.u32_le().map_err(|_| FormatError::NoDataChunk)? as usize;
        if id == *b"data" {
            // A short final chunk yields the bytes actually present.
            break reader.take_at_most(size);
        }
        reader.skip(size).map_err(|_| FormatError::NoDataChunk)?;
    };

    let header = WavHeader::new(channels, sample_rate, bits_per_sample);
    let bytes_per_sample = header.bytes_per_sample();
    let stride = bytes_per_sample * channels as usize;

    // First channel only: decode the leading sample of each frame.
    let mut samples = Vec::with_capacity(payload.len() / stride + 1);
    let mut offset = 0;
    while offset + bytes_per_sample <= payload.len() {
        samples.push(read_sample_le(&payload[offset..offset + bytes_per_sample]));
        offset += stride;
    }

    let mut warnings = Vec::new();
    if channels != 1 {
        let warning = RangeWarning::MultiChannel { channels };
        warn!("{warning}");
        warnings.push(warning);
    }

    info!(
        "loaded WAV: {} samples, {}Hz, {}-bit",
        samples.len(),
        sample_rate,
        bits_per_sample
    );

    Ok(DecodedWav {
        header,
        samples,
        warnings,
    })
}

/// Data chunk size as a u32, rejecting payloads the RIFF size fields
/// cannot express (the RIFF length itself adds 36 bytes of header).
fn data_chunk_size(sample_count: usize, bytes_per_sample: usize) -> Result<u32, FormatError> {
    let bytes = sample_count as u64 * bytes_per_sample as u64;
    if bytes > u64::from(u32::MAX - 36) {
        return Err(FormatError::OversizedData { bytes });
    }
    Ok(bytes as u32)
}

/// Encode a header and sample sequence into a canonical WAV byte buffer.
///
/// Derived header fields are recomputed first. Samples outside the
/// representable range are saturated (never wrapped) and the count is
/// reported through a [`RangeWarning::Saturated`] on the result.
///
/// # Errors
/// [`FormatError::OversizedData`] when the payload cannot fit a RIFF
/// container's 32-bit size fields.
pub fn encode(header: &WavHeader, samples: &[i64]) -> Result<EncodedWav, FormatError> {
    let header = header.normalized();
    let range = header.sample_range();
    let bytes_per_sample = header.bytes_per_sample();
    let data_size = data_chunk_size(samples.len(), bytes_per_sample)?;

    let mut bytes = Vec::with_capacity(44 + data_size as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&header.channels.to_le_bytes());
    bytes.extend_from_slice(&header.sample_rate.to_le_bytes());
    bytes.extend_from_slice(&header.byte_rate.to_le_bytes());
    bytes.extend_from_slice(&header.block_align.to_le_bytes());
    bytes.extend_from_slice(&header.bits_per_sample.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());

    let mut clipped = 0usize;
    for &sample in samples {
        let value = range.clamp(sample);
        if value != sample {
            clipped += 1;
        }
        bytes.extend_from_slice(&(value as u64).to_le_bytes()[..bytes_per_sample]);
    }

    let mut warnings = Vec::new();
    if clipped > 0 {
        let warning = RangeWarning::Saturated {
            clipped,
            total: samples.len(),
        };
        warn!("{warning}");
        warnings.push(warning);
    }

    Ok(EncodedWav { bytes, warnings })
}
