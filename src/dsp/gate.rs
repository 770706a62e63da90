//! Noise gate
//!
//! Two passes: a global scan estimates the noise floor (mean magnitude of
//! everything below the dB threshold), then a sequential fold runs a small
//! attack/hold/release machine over the samples. The second pass is
//! inherently order-dependent; only the floor estimate could be parallelized.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec::SampleRange;
use crate::dsp::db_to_linear;

/// Release tail length in seconds once the gate stops being held open
const RELEASE_SECS: f64 = 0.1;

/// Attenuation applied while the gate is closed. Noise is reduced, never
/// zeroed outright, to avoid an unnaturally dead floor.
const CLOSED_ATTENUATION: f64 = 0.1;

/// Gate position while folding over the sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    /// Signal above trigger; samples pass unmodified
    Open,
    /// Gate recently open; tail samples fade over the release window
    Releasing { remaining: u64 },
    /// Gate shut; samples are attenuated
    Closed,
}

/// Observable numbers behind a gate run, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    /// Mean magnitude of the samples considered noise
    pub noise_floor: f64,
    /// Linear amplitude corresponding to the dB threshold
    pub threshold: f64,
    /// Release tail length in samples
    pub release_samples: u64,
}

/// Gate the sample sequence against a threshold given in dBFS.
///
/// A sample louder than twice the estimated noise floor opens the gate and
/// re-arms the release counter; quieter samples either ride the release tail
/// down or, once the tail is spent, are attenuated to 10%.
pub fn noise_gate(
    samples: &[i64],
    range: SampleRange,
    threshold_db: f64,
    sample_rate: u32,
) -> (Vec<i64>, GateReport) {
    let threshold = range.max as f64 * db_to_linear(threshold_db);

    // Noise floor: mean magnitude over samples strictly below threshold.
    // No qualifying samples is a valid degenerate case, floor 0.
    let mut sum = 0.0;
    let mut count = 0u64;
    for &sample in samples {
        let magnitude = sample.abs() as f64;
        if magnitude < threshold {
            sum += magnitude;
            count += 1;
        }
    }
    let noise_floor = if count > 0 { sum / count as f64 } else { 0.0 };

    let release_samples = (sample_rate as f64 * RELEASE_SECS) as u64;
    let trigger = 2.0 * noise_floor;
    debug!(
        "noise gate: floor {noise_floor:.1}, trigger {trigger:.1}, release {release_samples} samples"
    );

    let mut state = GateState::Closed;
    let out = samples
        .iter()
        .map(|&sample| {
            if sample.abs() as f64 > trigger {
                state = GateState::Open;
                return sample;
            }
            let (next, output) = match state {
                // First tail sample: counter is fully armed, so the fade
                // factor is exactly 1.
                GateState::Open if release_samples > 0 => (
                    GateState::Releasing {
                        remaining: release_samples - 1,
                    },
                    sample,
                ),
                GateState::Releasing { remaining } if remaining > 0 => (
                    GateState::Releasing {
                        remaining: remaining - 1,
                    },
                    (sample as f64 * remaining as f64 / release_samples as f64) as i64,
                ),
                _ => (
                    GateState::Closed,
                    (sample as f64 * CLOSED_ATTENUATION) as i64,
                ),
            };
            state = next;
            output
        })
        .collect();

    (
        out,
        GateReport {
            noise_floor,
            threshold,
            release_samples,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn range16() -> SampleRange {
        SampleRange::for_bits(16)
    }

    #[test]
    fn test_silence_stays_silent() {
        for threshold_db in [-80.0, -40.0, -6.0] {
            let (out, report) = noise_gate(&[0; 500], range16(), threshold_db, 44100);
            assert!(out.iter().all(|&s| s == 0));
            assert_eq!(report.noise_floor, 0.0);
        }
    }

    #[test]
    fn test_loud_signal_passes_unmodified() {
        // Quiet bed establishes a floor, loud samples must pass verbatim
        let mut samples = vec![10i64; 100];
        samples.extend_from_slice(&[20_000, -20_000, 20_000]);
        let (out, report) = noise_gate(&samples, range16(), -40.0, 44100);

        assert_relative_eq!(report.noise_floor, 10.0);
        assert_eq!(&out[100..], &[20_000, -20_000, 20_000]);
    }

    #[test]
    fn test_closed_gate_attenuates_to_ten_percent() {
        // All samples below trigger and the gate never opens
        let (out, _) = noise_gate(&[100i64; 50], range16(), -6.0, 44100);
        // floor is 100, trigger 200, so everything is noise: 100 * 0.1
        assert!(out.iter().all(|&s| s == 10));
    }

    #[test]
    fn test_release_tail_fades_after_open() {
        // release window of 10 samples at 100 Hz
        let mut samples = vec![20_000i64];
        samples.extend_from_slice(&[1000; 12]);
        // Floor comes from the 1000s (threshold -6 dB keeps them as noise);
        // trigger 2000, so only the first sample opens the gate.
        let (out, report) = noise_gate(&samples, range16(), -6.0, 100);

        assert_eq!(report.release_samples, 10);
        assert_eq!(out[0], 20_000);
        // First tail sample at full scale, then a linear fade
        assert_eq!(out[1], 1000);
        assert_eq!(out[2], 900);
        assert_eq!(out[3], 800);
        assert_eq!(out[10], 100);
        // Tail spent: closed attenuation
        assert_eq!(out[11], 100);
        assert_eq!(out[12], 100);
    }

    #[test]
    fn test_reopening_rearms_release() {
        let mut samples = vec![20_000i64, 1000, 1000, 20_000];
        samples.push(1000);
        let (out, _) = noise_gate(&samples, range16(), -6.0, 100);
        // Tail restarts at full scale after the second burst
        assert_eq!(out[4], 1000);
    }

    #[test]
    fn test_zero_release_window_closes_immediately() {
        // 5 Hz: release window truncates to 0 samples
        let samples = [20_000i64, 1000, 1000];
        let (out, report) = noise_gate(&samples, range16(), -6.0, 5);
        assert_eq!(report.release_samples, 0);
        assert_eq!(out[1], 100);
        assert_eq!(out[2], 100);
    }

    #[test]
    fn test_report_threshold_is_linear_amplitude() {
        let (_, report) = noise_gate(&[0], range16(), -20.0, 44100);
        assert_relative_eq!(report.threshold, 3276.7, max_relative = 1e-9);
    }
}
