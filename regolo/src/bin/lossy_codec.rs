use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libgolo::{LossyDecoder, LossyEncoder};
use regolo::audio;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lossy_codec")]
#[command(version)]
#[command(about = "Lossy DCT audio codec with psychoacoustic quantization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a mono 16-bit PCM WAV file
    Encode {
        /// Input WAV file
        input: PathBuf,
        /// Output transform stream
        output: PathBuf,
    },
    /// Decode a transform stream back to WAV
    Decode {
        /// Input transform stream
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => encode(&input, &output),
        Commands::Decode { input, output } => decode(&input, &output),
    }
}

fn encode(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let wav = audio::read_wav(input)?;
    if wav.channels != 1 {
        bail!("only mono audio files are supported");
    }

    println!("Sample rate: {} Hz", wav.sample_rate);
    println!("Total frames: {}", wav.frames());

    let samples = audio::samples_to_f64(&wav.samples);
    let encoded = LossyEncoder::new(wav.sample_rate)
        .encode(&samples)
        .context("encoding failed")?;

    fs::write(output, &encoded)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Encoding complete.");
    println!(
        "Output: {} ({} bytes, {:.1}% of raw PCM)",
        output.display(),
        encoded.len(),
        100.0 * encoded.len() as f64 / (wav.samples.len() * 2).max(1) as f64
    );

    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let data =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let decoded = LossyDecoder::new().decode(&data).context("decoding failed")?;

    println!("Sample rate: {} Hz", decoded.sample_rate);
    println!("Total frames: {}", decoded.frames);
    println!("Block size: {}", decoded.block_size);

    let samples: Vec<i16> = decoded.samples.iter().map(|&s| audio::f64_to_i16(s)).collect();
    audio::write_wav(output, &samples, decoded.sample_rate, 1)?;

    println!("Decoding complete.");
    println!("Reconstructed {} frames", samples.len());

    Ok(())
}
