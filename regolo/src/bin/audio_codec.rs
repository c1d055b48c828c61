use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libgolo::{AudioDecoder, AudioEncoder};
use regolo::audio;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audio_codec")]
#[command(version)]
#[command(about = "Golomb-coded lossless audio codec", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a 16-bit PCM WAV file to a Golomb block stream
    Encode {
        /// Input WAV file (16-bit PCM, mono or stereo)
        input: PathBuf,
        /// Output block stream
        output: PathBuf,
        /// Frames per block
        #[arg(default_value_t = 4096)]
        block_samples: u32,
        /// Golomb parameter (0 = per-block adaptive)
        #[arg(default_value_t = 0)]
        m: u32,
        /// Fixed predictor order (0 = none, 1..3 = linear taps)
        #[arg(default_value_t = 2)]
        predictor_order: u8,
        /// Print stream parameters and compression results
        #[arg(short, long)]
        verbose: bool,
    },
    /// Decode a Golomb block stream back to WAV
    Decode {
        /// Input block stream
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
        /// Print stream parameters
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            block_samples,
            m,
            predictor_order,
            verbose,
        } => encode(&input, &output, block_samples, m, predictor_order, verbose),
        Commands::Decode {
            input,
            output,
            verbose,
        } => decode(&input, &output, verbose),
    }
}

fn describe_order(order: u8) -> &'static str {
    match order {
        0 => "none",
        1 => "1-tap: s[n-1]",
        2 => "2-tap: 2*s[n-1] - s[n-2]",
        3 => "3-tap: 3*s[n-1] - 3*s[n-2] + s[n-3]",
        _ => "unknown",
    }
}

fn encode(
    input: &PathBuf,
    output: &PathBuf,
    block_samples: u32,
    m: u32,
    predictor_order: u8,
    verbose: bool,
) -> Result<()> {
    let wav = audio::read_wav(input)?;

    if verbose {
        println!("Encoding: {} -> {}", input.display(), output.display());
        println!(
            "  Sample rate: {} Hz, channels: {}, frames: {}",
            wav.sample_rate,
            wav.channels,
            wav.frames()
        );
        if m == 0 {
            println!("  Block samples: {block_samples}, m: adaptive");
        } else {
            println!("  Block samples: {block_samples}, m: {m}");
        }
        println!(
            "  Predictor order: {predictor_order} ({})",
            describe_order(predictor_order)
        );
        if wav.channels == 2 {
            println!("  Using mid/side stereo coding");
        }
    }

    let encoded = AudioEncoder::new(wav.sample_rate, wav.channels)
        .with_block_samples(block_samples)
        .with_parameter(m)
        .with_predictor_order(predictor_order)
        .encode(&wav.samples)
        .context("encoding failed")?;

    fs::write(output, &encoded)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if verbose {
        let raw_size = wav.samples.len() * 2;
        println!("Done.");
        println!(
            "  Size: {} bytes ({:.1}% of raw PCM)",
            encoded.len(),
            100.0 * encoded.len() as f64 / raw_size.max(1) as f64
        );
    }

    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf, verbose: bool) -> Result<()> {
    let data =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let decoded = AudioDecoder::new()
        .decode(&data)
        .context("decoding failed")?;

    if verbose {
        println!("Decoding: {} -> {}", input.display(), output.display());
        println!(
            "  Sample rate: {} Hz, channels: {}, frames: {}",
            decoded.sample_rate, decoded.channels, decoded.frames
        );
        println!(
            "  Block samples: {}, predictor order: {} ({})",
            decoded.block_samples,
            decoded.predictor_order,
            describe_order(decoded.predictor_order)
        );
        if decoded.channels == 2 {
            println!("  Using mid/side stereo decoding");
        }
    }

    audio::write_wav(output, &decoded.samples, decoded.sample_rate, decoded.channels)?;

    if verbose {
        println!("Done.");
        println!("  Output: {}", output.display());
    }

    Ok(())
}
