//! Sample-domain transforms
//!
//! Each transform is a pure function over a sample sequence: it consumes the
//! input and produces a fresh output, so no transform ever observes another
//! one mid-flight. [`SampleProcessor`] threads a decoded (header, samples)
//! pair through them in caller-chosen order.
//!
//! Float-to-sample conversion truncates toward zero throughout. That biases
//! quantization compared to round-to-nearest, but it is the established
//! behavior and round-trip parity depends on it.

mod amplifier;
mod denoise;
mod gate;
mod processor;
mod resample;
mod soft_clip;

pub use amplifier::amplify;
pub use denoise::{denoise_with_reference, DenoiseReport};
pub use gate::{noise_gate, GateReport};
pub use processor::SampleProcessor;
pub use resample::resample;
pub use soft_clip::soft_clip;

/// Convert decibels to a linear amplitude factor
#[inline]
pub(crate) fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_db_to_linear_conversion() {
        assert_relative_eq!(db_to_linear(0.0), 1.0);
        assert_relative_eq!(db_to_linear(-20.0), 0.1);
        assert_relative_eq!(db_to_linear(-40.0), 0.01);
    }
}
