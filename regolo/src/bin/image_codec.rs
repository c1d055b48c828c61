use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libgolo::image::effects;
use libgolo::{ImageDecoder, ImageEncoder, ImagePredictor};
use regolo::ppm;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image_codec")]
#[command(version)]
#[command(about = "Golomb-coded lossless grayscale image codec", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a grayscale PPM (P5) image
    Encode {
        /// Input P5 image
        input: PathBuf,
        /// Output compressed image
        output: PathBuf,
        /// Predictor id 0..8, or -1 to test all and keep the best
        #[arg(default_value_t = 8, allow_hyphen_values = true)]
        predictor: i32,
        /// Golomb parameter (0 = per-block adaptive, 1..255 = fixed)
        #[arg(default_value_t = 0)]
        m: u32,
        /// Pixels per block (0 = one image row)
        #[arg(default_value_t = 0)]
        block_size: u32,
        /// Print image parameters and compression results
        #[arg(short, long)]
        verbose: bool,
        /// Auto-select the best predictor (same as predictor -1)
        #[arg(long)]
        auto: bool,
    },
    /// Decode a compressed image back to PPM (P5)
    Decode {
        /// Input compressed image
        input: PathBuf,
        /// Output P5 image
        output: PathBuf,
        /// Print image parameters
        #[arg(short, long)]
        verbose: bool,
    },
    /// Convert a color PPM (P6) to grayscale (P5)
    Grayscale {
        /// Input P6 image
        input: PathBuf,
        /// Output P5 image
        output: PathBuf,
    },
    /// Apply a demo effect to a grayscale PPM (P5) image
    Effect {
        /// Which effect to apply
        #[arg(value_enum)]
        effect: Effect,
        /// Input P5 image
        input: PathBuf,
        /// Output P5 image
        output: PathBuf,
        /// Brightness delta (only for the brightness effect)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        amount: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Effect {
    Negative,
    MirrorH,
    MirrorV,
    Rotate90,
    Rotate180,
    Rotate270,
    Brightness,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            predictor,
            m,
            block_size,
            verbose,
            auto,
        } => encode(&input, &output, predictor, m, block_size, verbose, auto),
        Commands::Decode {
            input,
            output,
            verbose,
        } => decode(&input, &output, verbose),
        Commands::Grayscale { input, output } => {
            let gray = ppm::read_p6_as_grayscale(&input)?;
            ppm::write_p5(&output, &gray)?;
            println!(
                "Converted {} ({}x{} RGB) -> {} (grayscale)",
                input.display(),
                gray.width(),
                gray.height(),
                output.display()
            );
            Ok(())
        }
        Commands::Effect {
            effect,
            input,
            output,
            amount,
        } => {
            let image = ppm::read_p5(&input)?;
            let result = match effect {
                Effect::Negative => effects::negative(&image),
                Effect::MirrorH => effects::mirror_horizontal(&image),
                Effect::MirrorV => effects::mirror_vertical(&image),
                Effect::Rotate90 => effects::rotate90(&image),
                Effect::Rotate180 => effects::rotate_multiple_90(&image, 2),
                Effect::Rotate270 => effects::rotate_multiple_90(&image, 3),
                Effect::Brightness => effects::adjust_brightness(&image, amount),
            };
            ppm::write_p5(&output, &result)?;
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn encode(
    input: &PathBuf,
    output: &PathBuf,
    predictor: i32,
    m: u32,
    block_size: u32,
    verbose: bool,
    auto: bool,
) -> Result<()> {
    let auto = auto || predictor == -1;
    if !auto && !(0..=8).contains(&predictor) {
        bail!("predictor must be 0..8, or -1 for auto-selection");
    }

    let image = ppm::read_p5(input)?;

    if verbose {
        println!("Encoding: {} -> {}", input.display(), output.display());
        println!(
            "  Image: {}x{} (8-bit grayscale)",
            image.width(),
            image.height()
        );
        if m == 0 {
            println!("  Golomb m: adaptive");
        } else {
            println!("  Golomb m: {m}");
        }
        if block_size == 0 {
            println!("  Block size: {} pixels (one row)", image.width());
        } else {
            println!("  Block size: {block_size} pixels");
        }
    }

    let encoder = ImageEncoder::new(if auto {
        ImagePredictor::JpegLs
    } else {
        ImagePredictor::try_from(predictor as u8)?
    })
    .with_parameter(m)
    .with_block_size(block_size);

    let encoded = if auto {
        let (encoded, chosen) = encoder.encode_auto(&image).context("encoding failed")?;
        if verbose {
            println!(
                "  Auto-selected predictor {} ({})",
                chosen.id(),
                chosen.name()
            );
        }
        encoded
    } else {
        encoder.encode(&image).context("encoding failed")?
    };

    fs::write(output, &encoded)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if verbose {
        let original = image.pixels().len();
        println!("Done.");
        println!(
            "  Original: {} bytes, compressed: {} bytes ({:.1}%)",
            original,
            encoded.len(),
            100.0 * encoded.len() as f64 / original.max(1) as f64
        );
    }

    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf, verbose: bool) -> Result<()> {
    let data =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let decoder = ImageDecoder::new();

    if verbose {
        let header = decoder.read_header(&data)?;
        println!("Decoding: {} -> {}", input.display(), output.display());
        println!("  Image: {}x{}", header.width, header.height);
        println!(
            "  Predictor: {} ({})",
            header.predictor.id(),
            header.predictor.name()
        );
        if header.m_flag == 0 {
            println!("  Golomb m: adaptive, block size: {} pixels", header.block_size);
        } else {
            println!(
                "  Golomb m: {}, block size: {} pixels",
                header.m_flag, header.block_size
            );
        }
    }

    let image = decoder.decode(&data).context("decoding failed")?;
    ppm::write_p5(output, &image)?;

    if verbose {
        println!("Done.");
        println!("  Output: {}", output.display());
    }

    Ok(())
}
