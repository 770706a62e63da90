//! Transform pipeline over a decoded WAV
//!
//! `SampleProcessor` owns the header and sample sequence produced by a
//! decode and applies transforms one at a time, each consuming the previous
//! output. The representable sample range is frozen from the bit depth at
//! construction; the header is replaced wholesale (never mutated) when a
//! transform changes the sample rate.

use log::warn;

use crate::codec::{self, DecodedWav, EncodedWav, SampleRange, WavHeader};
use crate::dsp::{
    amplify, denoise_with_reference, noise_gate, resample, soft_clip, DenoiseReport, GateReport,
};
use crate::error::{DomainError, FormatError, RangeWarning};

/// Holds a decoded (header, samples) pair and runs transforms over it.
#[derive(Debug, Clone)]
pub struct SampleProcessor {
    header: WavHeader,
    samples: Vec<i64>,
    range: SampleRange,
}

impl SampleProcessor {
    /// Build a processor over decoded audio. The sample range is derived
    /// here, once, and not recomputed for the life of the session.
    pub fn new(header: WavHeader, samples: Vec<i64>) -> Self {
        let range = header.sample_range();
        SampleProcessor {
            header,
            samples,
            range,
        }
    }

    /// Convenience constructor from a decode result.
    pub fn from_decoded(decoded: DecodedWav) -> Self {
        Self::new(decoded.header, decoded.samples)
    }

    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn samples(&self) -> &[i64] {
        &self.samples
    }

    pub fn sample_range(&self) -> SampleRange {
        self.range
    }

    /// Multiply every sample by `gain`. With `limit` set the result is
    /// saturated into range; without it, out-of-range values survive until
    /// the final encode saturates and reports them.
    pub fn amplify(&mut self, gain: f64, limit: bool) {
        self.samples = amplify(&self.samples, self.range, gain, limit);
    }

    /// Compress peaks above `threshold` (fraction of full scale) along a
    /// tanh curve.
    pub fn soft_clip(&mut self, threshold: f64) -> Result<(), DomainError> {
        self.samples = soft_clip(&self.samples, self.range, threshold)?;
        Ok(())
    }

    /// Gate samples against `threshold_db` (dBFS), with a 100 ms release
    /// tail at the current sample rate.
    pub fn noise_gate(&mut self, threshold_db: f64) -> GateReport {
        let (samples, report) = noise_gate(
            &self.samples,
            self.range,
            threshold_db,
            self.header.sample_rate,
        );
        self.samples = samples;
        report
    }

    /// Suppress noise using a reference clip. A reference recorded at a
    /// different sample rate or bit depth still works; the mismatch is
    /// surfaced as warnings rather than an error.
    pub fn denoise_with_reference(
        &mut self,
        reference: &DecodedWav,
    ) -> Result<(DenoiseReport, Vec<RangeWarning>), DomainError> {
        let mut warnings = Vec::new();
        if reference.header.sample_rate != self.header.sample_rate {
            warnings.push(RangeWarning::ReferenceMismatch {
                field: "sample_rate",
                signal: self.header.sample_rate,
                reference: reference.header.sample_rate,
            });
        }
        if reference.header.bits_per_sample != self.header.bits_per_sample {
            warnings.push(RangeWarning::ReferenceMismatch {
                field: "bits_per_sample",
                signal: u32::from(self.header.bits_per_sample),
                reference: u32::from(reference.header.bits_per_sample),
            });
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        let (samples, report) =
            denoise_with_reference(&self.samples, self.range, &reference.samples)?;
        self.samples = samples;
        Ok((report, warnings))
    }

    /// Change playback speed by `speed_factor`. The sample rate scales by
    /// the same factor (header replaced with a recomputed copy), so duration
    /// is preserved and pitch shifts.
    pub fn resample(&mut self, speed_factor: f64) -> Result<(), DomainError> {
        let (samples, new_rate) = resample(&self.samples, speed_factor, self.header.sample_rate)?;
        self.samples = samples;
        self.header = self.header.with_sample_rate(new_rate);
        Ok(())
    }

    /// Serialize the current state back to WAV bytes, saturating and
    /// reporting any out-of-range samples.
    ///
    /// # Errors
    /// [`FormatError::OversizedData`] when the payload no longer fits a
    /// RIFF container's 32-bit size fields.
    pub fn encode(&self) -> Result<EncodedWav, FormatError> {
        codec::encode(&self.header, &self.samples)
    }

    /// Take the header and samples out of the processor.
    pub fn into_parts(self) -> (WavHeader, Vec<i64>) {
        (self.header, self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor(samples: Vec<i64>) -> SampleProcessor {
        SampleProcessor::new(WavHeader::new(1, 44100, 16), samples)
    }

    #[test]
    fn test_transforms_chain_in_order() {
        let mut proc = processor(vec![100, -200, 300]);
        proc.amplify(2.0, false);
        proc.amplify(0.5, false);
        assert_eq!(proc.samples(), &[100, -200, 300]);
    }

    #[test]
    fn test_failed_transform_leaves_state_untouched() {
        let mut proc = processor(vec![100, -200]);
        assert!(proc.soft_clip(1.0).is_err());
        assert!(proc.resample(-2.0).is_err());
        assert_eq!(proc.samples(), &[100, -200]);
        assert_eq!(proc.header().sample_rate, 44100);
    }

    #[test]
    fn test_resample_replaces_header() {
        let mut proc = processor(vec![0; 100]);
        let before = *proc.header();
        proc.resample(2.0).unwrap();

        assert_eq!(proc.header().sample_rate, 88200);
        assert_eq!(proc.header().byte_rate, 88200 * 2);
        // the pre-transform header value is unchanged
        assert_eq!(before.sample_rate, 44100);
        assert_eq!(proc.samples().len(), 50);
    }

    #[test]
    fn test_range_frozen_at_construction() {
        let proc = processor(vec![0]);
        assert_eq!(proc.sample_range(), SampleRange::for_bits(16));
    }

    #[test]
    fn test_denoise_reports_format_mismatch() {
        let mut proc = processor(vec![50, 400]);
        let reference = DecodedWav {
            header: WavHeader::new(1, 22050, 8),
            samples: vec![100; 5],
            warnings: Vec::new(),
        };
        let (report, warnings) = proc.denoise_with_reference(&reference).unwrap();

        assert_eq!(report.noise_profile, 100.0);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&RangeWarning::ReferenceMismatch {
            field: "sample_rate",
            signal: 44100,
            reference: 22050,
        }));
    }

    #[test]
    fn test_encode_after_unlimited_gain_reports_saturation() {
        let mut proc = processor(vec![30_000, 10]);
        proc.amplify(2.0, false);
        let encoded = proc.encode().unwrap();
        assert_eq!(
            encoded.warnings,
            vec![RangeWarning::Saturated {
                clipped: 1,
                total: 2
            }]
        );
    }
}
