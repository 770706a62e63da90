//! Gain with optional saturating limiter
//!
//! Gain application and overflow prevention are deliberately separate modes:
//! with `limit` off the output may exceed the nominal range, letting a gain
//! stage chain into later transforms before a final saturation pass at
//! encode time.

use crate::codec::SampleRange;

/// Multiply every sample by `gain`, truncating toward zero.
///
/// With `limit` set, each result is saturated into `range`; without it,
/// out-of-range magnitudes are kept as-is and will be saturated (and
/// reported) by a later encode.
pub fn amplify(samples: &[i64], range: SampleRange, gain: f64, limit: bool) -> Vec<i64> {
    samples
        .iter()
        .map(|&sample| {
            let scaled = (sample as f64 * gain) as i64;
            if limit {
                range.clamp(scaled)
            } else {
                scaled
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range16() -> SampleRange {
        SampleRange::for_bits(16)
    }

    #[test]
    fn test_amplify_scales_and_truncates() {
        let out = amplify(&[100, -100, 3], range16(), 1.5, false);
        // 4.5 truncates toward zero, not down
        assert_eq!(out, vec![150, -150, 4]);
        let negative = amplify(&[-3], range16(), 1.5, false);
        assert_eq!(negative, vec![-4]);
    }

    #[test]
    fn test_amplify_limit_saturates() {
        let out = amplify(&[30_000, -30_000], range16(), 2.0, true);
        assert_eq!(out, vec![32767, -32768]);
    }

    #[test]
    fn test_amplify_unlimited_exceeds_range() {
        let out = amplify(&[30_000], range16(), 2.0, false);
        assert_eq!(out, vec![60_000]);
    }

    #[test]
    fn test_amplify_fractional_gain_attenuates() {
        let out = amplify(&[1000, -999], range16(), 0.5, true);
        assert_eq!(out, vec![500, -499]);
    }

    #[test]
    fn test_amplify_limit_never_out_of_range() {
        let range = range16();
        let samples: Vec<i64> = (-40_000..40_000).step_by(997).collect();
        for &value in amplify(&samples, range, 7.3, true).iter() {
            assert!(range.contains(value));
        }
    }
}
