//! Error handling for ClearWave
//!
//! Three severities: `FormatError` aborts a decode with no partial result,
//! `DomainError` fails a single transform call and leaves the pipeline state
//! untouched, and `RangeWarning` is structured diagnostic data that never
//! stops processing.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for ClearWave operations
pub type Result<T> = std::result::Result<T, ClearWaveError>;

/// Malformed container: always fatal to the decode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing RIFF header")]
    MissingRiff,

    #[error("missing WAVE marker")]
    MissingWave,

    #[error("missing fmt chunk")]
    MissingFmt,

    #[error("header truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("fmt chunk declares zero channels")]
    ZeroChannels,

    #[error("unsupported bit depth: {0} (must be a multiple of 8 between 8 and 64)")]
    UnsupportedBitDepth(u16),

    #[error("no data chunk found")]
    NoDataChunk,

    #[error("sample data too large for a RIFF container: {bytes} bytes")]
    OversizedData { bytes: u64 },
}

/// Invalid transform parameter: fatal to that single transform call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("soft-clip threshold must be in (0, 1), got {0}")]
    InvalidThreshold(f64),

    #[error("speed factor must be positive, got {0}")]
    InvalidSpeedFactor(f64),

    #[error("reference noise clip contains no samples")]
    EmptyReference,
}

/// Main error type for ClearWave operations
#[derive(Error, Debug)]
pub enum ClearWaveError {
    #[error("invalid WAV file: {0}")]
    Format(#[from] FormatError),

    #[error("invalid parameter: {0}")]
    Domain(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClearWaveError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ClearWaveError::Format(_) => "FORMAT_ERROR",
            ClearWaveError::Domain(_) => "DOMAIN_ERROR",
            ClearWaveError::Io(_) => "IO_ERROR",
        }
    }
}

/// Non-fatal diagnostic surfaced alongside a result.
///
/// The library reports these as values (and mirrors them to the `log` facade)
/// so callers and tests can assert on them; presentation belongs to the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeWarning {
    /// Input had more than one channel; only the first was kept.
    MultiChannel { channels: u16 },

    /// Samples fell outside the representable range and were saturated
    /// during encode.
    Saturated { clipped: usize, total: usize },

    /// The denoise reference clip was recorded with a different format
    /// than the signal being cleaned.
    ReferenceMismatch {
        field: &'static str,
        signal: u32,
        reference: u32,
    },
}

impl RangeWarning {
    /// Percentage of affected samples for `Saturated`, 0 otherwise.
    pub fn percent(&self) -> f64 {
        match self {
            RangeWarning::Saturated { clipped, total } if *total > 0 => {
                *clipped as f64 / *total as f64 * 100.0
            }
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeWarning::MultiChannel { channels } => write!(
                f,
                "input has {channels} channels; only the first channel is processed"
            ),
            RangeWarning::Saturated { clipped, total } => write!(
                f,
                "{clipped} of {total} samples ({:.2}%) saturated to the sample range",
                self.percent()
            ),
            RangeWarning::ReferenceMismatch {
                field,
                signal,
                reference,
            } => write!(
                f,
                "reference {field} ({reference}) does not match signal {field} ({signal})"
            ),
        }
    }
}
