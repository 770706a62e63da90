//! ClearWave CLI - Mono PCM Audio Cleanup
//!
//! Thin front-end over the library: reads a WAV file, runs one transform,
//! writes the result. All domain logic lives in the library; this layer only
//! parses arguments and presents diagnostics.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use clearwave::{decode, DecodedWav, RangeWarning, SampleProcessor};

#[derive(Parser)]
#[command(name = "clearwave", version, about = "Mono PCM audio cleanup")]
struct Cli {
    /// Print diagnostics as JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply gain, optionally saturating into the sample range
    Amplify {
        input: PathBuf,
        output: PathBuf,
        /// Linear gain factor
        #[arg(long, default_value_t = 2.0)]
        gain: f64,
        /// Saturate the result instead of letting it exceed the range
        #[arg(long)]
        limit: bool,
    },
    /// Compress peaks above a threshold along a tanh curve
    SoftClip {
        input: PathBuf,
        output: PathBuf,
        /// Knee position as a fraction of full scale, in (0, 1)
        #[arg(long, default_value_t = 0.8)]
        threshold: f64,
    },
    /// Attenuate passages below a noise threshold
    Gate {
        input: PathBuf,
        output: PathBuf,
        /// Threshold in dBFS
        #[arg(long, default_value_t = -40.0)]
        threshold_db: f64,
    },
    /// Suppress noise using a reference clip of noise-only audio
    Denoise {
        input: PathBuf,
        output: PathBuf,
        /// WAV file containing representative noise
        #[arg(long)]
        reference: PathBuf,
    },
    /// Change playback speed (and sample rate) by a factor
    Resample {
        input: PathBuf,
        output: PathBuf,
        /// Speed factor; above 1 speeds up, below 1 slows down
        #[arg(long)]
        speed: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Amplify {
            input,
            output,
            gain,
            limit,
        } => run(&input, &output, cli.json, |proc| {
            proc.amplify(gain, limit);
            Ok(Vec::new())
        }),
        Commands::SoftClip {
            input,
            output,
            threshold,
        } => run(&input, &output, cli.json, |proc| {
            proc.soft_clip(threshold)?;
            Ok(Vec::new())
        }),
        Commands::Gate {
            input,
            output,
            threshold_db,
        } => run(&input, &output, cli.json, |proc| {
            let report = proc.noise_gate(threshold_db);
            info!(
                "noise floor {:.1}, release {} samples",
                report.noise_floor, report.release_samples
            );
            Ok(Vec::new())
        }),
        Commands::Denoise {
            input,
            output,
            reference,
        } => {
            let reference = load(&reference)?;
            run(&input, &output, cli.json, |proc| {
                let (report, warnings) = proc.denoise_with_reference(&reference)?;
                info!("noise profile {:.1}", report.noise_profile);
                Ok(warnings)
            })
        }
        Commands::Resample {
            input,
            output,
            speed,
        } => run(&input, &output, cli.json, |proc| {
            proc.resample(speed)?;
            Ok(Vec::new())
        }),
    }
}

fn load(path: &Path) -> anyhow::Result<DecodedWav> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = decode(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    Ok(decoded)
}

/// Decode, transform, encode, write; collect warnings from every stage.
fn run(
    input: &Path,
    output: &Path,
    json: bool,
    transform: impl FnOnce(&mut SampleProcessor) -> clearwave::Result<Vec<RangeWarning>>,
) -> anyhow::Result<()> {
    let decoded = load(input)?;
    let mut warnings = decoded.warnings.clone();

    let mut proc = SampleProcessor::from_decoded(decoded);
    warnings.extend(transform(&mut proc)?);

    let encoded = proc.encode()?;
    warnings.extend(encoded.warnings);
    fs::write(output, &encoded.bytes).with_context(|| format!("writing {}", output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
    } else {
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }
        println!("wrote {}", output.display());
    }
    Ok(())
}
