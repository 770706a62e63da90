//! Soft-clip limiter
//!
//! Samples above the threshold knee are compressed along a tanh curve whose
//! output approaches (but never reaches) full scale, instead of hard-clipping
//! at the rail. The curve is continuous and monotonic above the knee;
//! samples at or below the knee pass through untouched.

use crate::codec::SampleRange;
use crate::error::DomainError;

/// Apply a tanh knee to every sample whose magnitude exceeds
/// `max_value * threshold`.
///
/// `threshold` is a fraction of full scale in the open interval (0, 1); the
/// curve divides by `1 - threshold`, so 1.0 exactly is rejected rather than
/// guarded around.
pub fn soft_clip(
    samples: &[i64],
    range: SampleRange,
    threshold: f64,
) -> Result<Vec<i64>, DomainError> {
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(DomainError::InvalidThreshold(threshold));
    }

    let max_value = range.max as f64;
    let threshold_value = (max_value * threshold) as i64;

    let out = samples
        .iter()
        .map(|&sample| {
            if sample.abs() <= threshold_value {
                return sample;
            }
            let normalized = sample.abs() as f64 / max_value;
            let shaped =
                threshold + (1.0 - threshold) * ((normalized - threshold) / (1.0 - threshold)).tanh();
            sample.signum() * (shaped * max_value) as i64
        })
        .collect();

    Ok(out)
}
