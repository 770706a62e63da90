//! Reference-based noise suppression
//!
//! A clip of representative noise (room tone, hiss) sets the profile: its
//! mean magnitude. Samples near the profile are treated as noise and cut
//! hard; suppression then eases off continuously as the signal rises above
//! the floor, approaching unity near full scale.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec::SampleRange;
use crate::error::DomainError;

/// Floor multiplier below which a sample counts as pure noise
const NOISE_BAND: f64 = 1.5;

/// Gain applied inside the noise band
const FLOOR_REDUCTION: f64 = 0.2;

/// Observable numbers behind a denoise run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenoiseReport {
    /// Mean magnitude of the reference clip
    pub noise_profile: f64,
}

/// Suppress noise using a reference clip of noise-only samples.
///
/// # Errors
/// [`DomainError::EmptyReference`] when the reference clip holds no samples;
/// the profile is a mean and has no value to take.
pub fn denoise_with_reference(
    samples: &[i64],
    range: SampleRange,
    noise_samples: &[i64],
) -> Result<(Vec<i64>, DenoiseReport), DomainError> {
    if noise_samples.is_empty() {
        return Err(DomainError::EmptyReference);
    }

    let noise_profile = noise_samples
        .iter()
        .map(|&n| n.abs() as f64)
        .sum::<f64>()
        / noise_samples.len() as f64;
    debug!("denoise: noise profile {noise_profile:.1}");

    let max_value = range.max as f64;
    let out = samples
        .iter()
        .map(|&sample| {
            let magnitude = sample.abs() as f64;
            if magnitude <= NOISE_BAND * noise_profile {
                (sample as f64 * FLOOR_REDUCTION) as i64
            } else {
                let ratio = ((magnitude - noise_profile) / (max_value - noise_profile)).min(1.0);
                let reduction = FLOOR_REDUCTION + (1.0 - FLOOR_REDUCTION) * ratio;
                (sample as f64 * reduction) as i64
            }
        })
        .collect();

    Ok((out, DenoiseReport { noise_profile }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn range16() -> SampleRange {
        SampleRange::for_bits(16)
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        assert_eq!(
            denoise_with_reference(&[1, 2, 3], range16(), &[]).unwrap_err(),
            DomainError::EmptyReference
        );
    }

    #[test]
    fn test_profile_is_mean_magnitude() {
        let (_, report) =
            denoise_with_reference(&[0], range16(), &[100, -300, 200]).unwrap();
        assert_relative_eq!(report.noise_profile, 200.0);
    }

    #[test]
    fn test_below_band_is_cut_to_twenty_percent() {
        // profile 100, band edge 150: 50 is noise, cut to 0.2x
        let (out, _) = denoise_with_reference(&[50, -50, 150], range16(), &[100; 10]).unwrap();
        assert_eq!(out, vec![10, -10, 30]);
    }

    #[test]
    fn test_above_band_reduction_eases_off() {
        // profile 100, sample 10000 against 16-bit full scale:
        // ratio = (10000-100)/(32767-100), reduction = 0.2 + 0.8*ratio
        let (out, _) = denoise_with_reference(&[10_000], range16(), &[100; 4]).unwrap();
        assert_eq!(out, vec![4424]);
    }

    #[test]
    fn test_full_scale_is_barely_touched() {
        let (out, _) = denoise_with_reference(&[32_767], range16(), &[100; 4]).unwrap();
        // ratio caps at 1.0, reduction 1.0
        assert_eq!(out, vec![32_767]);
    }

    #[test]
    fn test_reduction_is_monotonic_in_magnitude() {
        let inputs: Vec<i64> = (200..32_000).step_by(321).collect();
        let (outputs, _) = denoise_with_reference(&inputs, range16(), &[100; 8]).unwrap();
        for pair in outputs.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}
