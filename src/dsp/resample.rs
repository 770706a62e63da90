//! Variable-rate resampler
//!
//! Speeding up strides through the input with a fractional step and keeps
//! the sample at each truncated index; no interpolation, so high factors
//! alias. Slowing down interpolates linearly between neighboring samples.
//! The asymmetry is long-standing observable behavior and is kept as-is
//! rather than symmetrized.
//!
//! The caller's sample rate is scaled by the same factor, so playback
//! duration is preserved and perceived pitch shifts instead.

use crate::error::DomainError;

/// Resample by `speed_factor`, returning the new samples and the new sample
/// rate `trunc(sample_rate * speed_factor)`.
///
/// # Errors
/// [`DomainError::InvalidSpeedFactor`] unless `speed_factor > 0`.
pub fn resample(
    samples: &[i64],
    speed_factor: f64,
    sample_rate: u32,
) -> Result<(Vec<i64>, u32), DomainError> {
    if !(speed_factor > 0.0) {
        return Err(DomainError::InvalidSpeedFactor(speed_factor));
    }
    if speed_factor == 1.0 {
        return Ok((samples.to_vec(), sample_rate));
    }

    let new_rate = (sample_rate as f64 * speed_factor) as u32;
    if samples.is_empty() {
        return Ok((Vec::new(), new_rate));
    }

    let out = if speed_factor > 1.0 {
        decimate(samples, speed_factor)
    } else {
        interpolate(samples, speed_factor)
    };

    Ok((out, new_rate))
}

/// Floor-stride decimation for speed-up.
fn decimate(samples: &[i64], speed_factor: f64) -> Vec<i64> {
    let mut out = Vec::with_capacity((samples.len() as f64 / speed_factor) as usize + 1);
    let mut position = 0.0f64;
    while (position as usize) < samples.len() {
        out.push(samples[position as usize]);
        position += speed_factor;
    }
    out
}

/// Linear interpolation for slow-down.
fn interpolate(samples: &[i64], speed_factor: f64) -> Vec<i64> {
    let output_len = (samples.len() as f64 / speed_factor) as usize;
    let mut out = Vec::with_capacity(output_len);
    for i in 0..output_len {
        let orig_pos = i as f64 * speed_factor;
        let before = orig_pos as usize;
        let after = (before + 1).min(samples.len() - 1);
        let fraction = orig_pos - before as f64;
        let value =
            (1.0 - fraction) * samples[before] as f64 + fraction * samples[after] as f64;
        out.push(value as i64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ramp(len: i64) -> Vec<i64> {
        (0..len).collect()
    }

    #[test_case(0.0; "zero")]
    #[test_case(-1.5; "negative")]
    #[test_case(f64::NAN; "nan")]
    fn test_invalid_speed_factor(speed: f64) {
        assert!(matches!(
            resample(&[1, 2, 3], speed, 44100),
            Err(DomainError::InvalidSpeedFactor(_))
        ));
    }

    #[test]
    fn test_unity_factor_is_a_no_op() {
        let samples = ramp(10);
        let (out, rate) = resample(&samples, 1.0, 44100).unwrap();
        assert_eq!(out, samples);
        assert_eq!(rate, 44100);
    }

    #[test]
    fn test_double_speed_decimates_even_indices() {
        let (out, rate) = resample(&ramp(100), 2.0, 44100).unwrap();
        assert_eq!(out.len(), 50);
        let expected: Vec<i64> = (0..100).step_by(2).collect();
        assert_eq!(out, expected);
        assert_eq!(rate, 88200);
    }

    #[test]
    fn test_half_speed_interpolates() {
        let (out, rate) = resample(&ramp(100), 0.5, 44100).unwrap();
        assert_eq!(out.len(), 200);
        assert_eq!(out[0], 0);
        // output[1] sits halfway between samples 0 and 1: 0.5 truncates to 0
        assert_eq!(out[1], 0);
        assert_eq!(out[2], 1);
        assert_eq!(out[199], 99);
        assert_eq!(rate, 22050);
    }

    #[test]
    fn test_half_speed_midpoints() {
        let (out, _) = resample(&[0, 100, 200], 0.5, 8000).unwrap();
        assert_eq!(out, vec![0, 50, 100, 150, 200, 200]);
    }

    #[test]
    fn test_fractional_speed_up() {
        let (out, rate) = resample(&ramp(10), 1.5, 10000).unwrap();
        // positions 0, 1.5, 3.0, 4.5, 6.0, 7.5, 9.0 floor to these indices
        assert_eq!(out, vec![0, 1, 3, 4, 6, 7, 9]);
        assert_eq!(rate, 15000);
    }

    #[test]
    fn test_new_rate_truncates() {
        let (_, rate) = resample(&ramp(4), 1.1, 44100).unwrap();
        assert_eq!(rate, (44100.0 * 1.1) as u32);
    }

    #[test]
    fn test_empty_input() {
        let (out, rate) = resample(&[], 2.0, 44100).unwrap();
        assert!(out.is_empty());
        assert_eq!(rate, 88200);
        let (out, _) = resample(&[], 0.25, 44100).unwrap();
        assert!(out.is_empty());
    }
}
